use std::sync::Arc;

use peerstream_core::{Config, SanitizedConfig, StreamRanker};

/// Shared application state
pub struct AppState {
    config: Config,
    /// Absent when no search backend is configured; stream requests then
    /// resolve to empty sets instead of failing.
    ranker: Option<Arc<StreamRanker>>,
}

impl AppState {
    pub fn new(config: Config, ranker: Option<Arc<StreamRanker>>) -> Self {
        Self { config, ranker }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn ranker(&self) -> Option<&Arc<StreamRanker>> {
        self.ranker.as_ref()
    }
}
