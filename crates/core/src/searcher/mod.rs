//! Torrent candidate search abstraction.
//!
//! This module provides a `CandidateSearch` trait for fetching raw torrent
//! hits from a search backend (Jackett), plus deduplication and release-name
//! attribute parsing for the results.

mod dedup;
mod jackett;
mod release;
mod types;

pub use dedup::dedup_candidates;
pub use jackett::JackettSearcher;
pub use release::parse_release_attributes;
pub use types::*;
