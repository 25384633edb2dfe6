//! Title/year metadata resolution.
//!
//! Two independent upstreams (TMDB and OMDb) are queried as a fan-out/fan-in
//! join: either side failing alone is not a failure, and the first usable
//! answer wins. The ranking pipeline treats a total miss as "no streams",
//! never as an error.

mod omdb;
mod tmdb;

pub use omdb::OmdbClient;
pub use tmdb::TmdbClient;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::candidate::ContentType;

/// Errors from a single metadata upstream.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

/// A resolved media title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTitle {
    pub title: String,
    pub year: Option<u32>,
}

/// Resolves a media identifier (IMDb id) to a title and year.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// `Ok(None)` means the id is simply unknown; errors are transport or
    /// configuration problems with this particular upstream.
    async fn resolve(
        &self,
        media_id: &str,
        content_type: ContentType,
    ) -> Result<Option<ResolvedTitle>, MetadataError>;
}

/// Fan-out resolver over TMDB and OMDb.
///
/// Both upstreams are queried concurrently; TMDB is preferred when both
/// answer. Partial success is success.
pub struct CombinedMetadataResolver {
    tmdb: Option<Arc<TmdbClient>>,
    omdb: Option<Arc<OmdbClient>>,
}

impl CombinedMetadataResolver {
    pub fn new(tmdb: Option<TmdbClient>, omdb: Option<OmdbClient>) -> Self {
        Self {
            tmdb: tmdb.map(Arc::new),
            omdb: omdb.map(Arc::new),
        }
    }

    pub fn has_upstream(&self) -> bool {
        self.tmdb.is_some() || self.omdb.is_some()
    }
}

#[async_trait]
impl MetadataResolver for CombinedMetadataResolver {
    async fn resolve(
        &self,
        media_id: &str,
        content_type: ContentType,
    ) -> Result<Option<ResolvedTitle>, MetadataError> {
        let tmdb_fut = async {
            match &self.tmdb {
                Some(client) => client.resolve(media_id, content_type).await,
                None => Ok(None),
            }
        };
        let omdb_fut = async {
            match &self.omdb {
                Some(client) => client.resolve(media_id, content_type).await,
                None => Ok(None),
            }
        };

        let (tmdb_result, omdb_result) = tokio::join!(tmdb_fut, omdb_fut);

        let tmdb_title = tmdb_result.unwrap_or_else(|e| {
            warn!(media_id = media_id, error = %e, "TMDB resolution failed");
            None
        });
        let omdb_title = omdb_result.unwrap_or_else(|e| {
            warn!(media_id = media_id, error = %e, "OMDb resolution failed");
            None
        });

        let resolved = tmdb_title.or(omdb_title);
        debug!(media_id = media_id, resolved = ?resolved, "Metadata resolution complete");
        Ok(resolved)
    }
}

/// Extract the year from a date string like "1999-03-30" or "1999".
pub(crate) fn parse_year(date: &str) -> Option<u32> {
    let digits: String = date.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}
