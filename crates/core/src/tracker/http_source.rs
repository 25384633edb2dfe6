//! Public tracker list fetching.
//!
//! The public tracker list is a background-refreshable resource behind its
//! own TTL. The pipeline must keep working with an empty list, so every
//! failure path here degrades to "whatever we had before" or nothing.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Errors from the tracker list fetch. Internal to this module's refresh
/// path; consumers of [`TrackerSource`] only ever see a (possibly empty)
/// list.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Tracker list request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Tracker list returned HTTP {0}")]
    BadStatus(u16),
}

/// Provider of public tracker announce URLs.
#[async_trait]
pub trait TrackerSource: Send + Sync {
    /// Current public tracker list. May be empty; never fails.
    async fn get(&self) -> Vec<String>;
}

/// Fetches a newline-delimited tracker list over HTTP and caches it.
///
/// A fresh cached list is served without touching the network. When the
/// cache is stale the fetch is retried; on failure the stale list keeps
/// being served so a flaky upstream never empties the sources.
pub struct HttpTrackerSource {
    client: Client,
    url: String,
    ttl: Duration,
    cached: RwLock<Option<(Instant, Vec<String>)>>,
}

impl HttpTrackerSource {
    pub fn new(url: String, ttl: Duration) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            url,
            ttl,
            cached: RwLock::new(None),
        }
    }

    async fn fetch(&self) -> Result<Vec<String>, TrackerError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::BadStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(parse_tracker_list(&body))
    }
}

/// Parse a newline-delimited tracker list, skipping blanks and comments.
fn parse_tracker_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect()
}

#[async_trait]
impl TrackerSource for HttpTrackerSource {
    async fn get(&self) -> Vec<String> {
        {
            let cached = self.cached.read().await;
            if let Some((fetched_at, trackers)) = cached.as_ref() {
                if fetched_at.elapsed() < self.ttl {
                    return trackers.clone();
                }
            }
        }

        match self.fetch().await {
            Ok(trackers) => {
                debug!(count = trackers.len(), "Refreshed public tracker list");
                let mut cached = self.cached.write().await;
                *cached = Some((Instant::now(), trackers.clone()));
                trackers
            }
            Err(e) => {
                warn!(error = %e, "Tracker list refresh failed, serving cached list");
                let cached = self.cached.read().await;
                cached
                    .as_ref()
                    .map(|(_, trackers)| trackers.clone())
                    .unwrap_or_default()
            }
        }
    }
}
