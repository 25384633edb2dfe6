//! Fixed tracker list for testing.

use async_trait::async_trait;

use crate::tracker::TrackerSource;

/// [`TrackerSource`] backed by a fixed list, no network involved.
pub struct StaticTrackerSource {
    trackers: Vec<String>,
}

impl StaticTrackerSource {
    pub fn new(trackers: Vec<String>) -> Self {
        Self { trackers }
    }
}

#[async_trait]
impl TrackerSource for StaticTrackerSource {
    async fn get(&self) -> Vec<String> {
        self.trackers.clone()
    }
}
