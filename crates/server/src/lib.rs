//! HTTP server for the stream ranking pipeline.
//!
//! Library target so integration tests can build the router in-process.

pub mod api;
pub mod metrics;
pub mod state;
