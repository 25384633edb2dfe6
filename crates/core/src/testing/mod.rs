//! Testing utilities and mock implementations.
//!
//! Mock implementations of the external collaborator traits, allowing the
//! ranking pipeline and the server to be tested without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use peerstream_core::testing::{fixtures, MockMetadataResolver, MockSearcher};
//!
//! let metadata = MockMetadataResolver::with_title("The Matrix", Some(1999));
//! let searcher = MockSearcher::new();
//! searcher.set_results(vec![
//!     fixtures::movie_candidate("The Matrix 1080p", "abc123", 50),
//! ]).await;
//! ```

mod mock_metadata;
mod mock_searcher;
mod static_tracker;

pub use mock_metadata::MockMetadataResolver;
pub use mock_searcher::MockSearcher;
pub use static_tracker::StaticTrackerSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::candidate::{Candidate, ContentType, TorrentInfo, VideoAttributes};

    const GIB: u64 = 1024 * 1024 * 1024;

    /// Create a movie candidate with reasonable defaults (4 GiB, magnet
    /// URI derived from the hash).
    pub fn movie_candidate(name: &str, info_hash: &str, seeders: u32) -> Candidate {
        candidate(name, info_hash, seeders, ContentType::Movie, 4 * GIB)
    }

    /// Movie candidate with an explicit size in GiB.
    pub fn movie_candidate_sized(
        name: &str,
        info_hash: &str,
        seeders: u32,
        size_gib: f64,
    ) -> Candidate {
        let size_bytes = (size_gib * GIB as f64) as u64;
        candidate(name, info_hash, seeders, ContentType::Movie, size_bytes)
    }

    /// Create a series candidate (episode membership is inferred from the
    /// name by the pipeline, exactly as with live indexer results).
    pub fn series_candidate(name: &str, info_hash: &str) -> Candidate {
        candidate(name, info_hash, 10, ContentType::Series, 2 * GIB)
    }

    fn candidate(
        name: &str,
        info_hash: &str,
        seeders: u32,
        content_type: ContentType,
        size_bytes: u64,
    ) -> Candidate {
        Candidate {
            info_hash: info_hash.to_string(),
            content_type,
            title: name.to_string(),
            languages: vec![],
            episodes: vec![],
            video: VideoAttributes::default(),
            torrent: TorrentInfo {
                name: name.to_string(),
                size_bytes,
                file_type: None,
                tag_names: vec![],
                magnet_uri: Some(format!("magnet:?xt=urn:btih:{}", info_hash)),
            },
            seeders,
            leechers: seeders / 2,
            published_at: None,
        }
    }
}
