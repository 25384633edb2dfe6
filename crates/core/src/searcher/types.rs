//! Types for the candidate search system.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::candidate::{Candidate, ContentType};

/// Query parameters for a candidate search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text search query.
    pub query: String,
    /// What the query is looking for; backends map this to their category
    /// taxonomy.
    pub content_type: ContentType,
    /// Maximum results to return (backend default applies when absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Errors that can occur during search operations.
///
/// The ranking pipeline catches all of these at its boundary and treats
/// the failing search as an empty contribution.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search backend connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Search backend API error: {0}")]
    ApiError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Trait for torrent search backends.
#[async_trait]
pub trait CandidateSearch: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Execute a search, returning raw (possibly overlapping) candidates.
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Candidate>, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_serialization() {
        let query = SearchQuery {
            query: "the matrix 1999".to_string(),
            content_type: ContentType::Movie,
            limit: Some(50),
        };

        let json = serde_json::to_string(&query).unwrap();
        let parsed: SearchQuery = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.query, "the matrix 1999");
        assert_eq!(parsed.content_type, ContentType::Movie);
        assert_eq!(parsed.limit, Some(50));
    }

    #[test]
    fn test_search_query_minimal() {
        let json = r#"{"query": "minimal", "content_type": "series"}"#;
        let parsed: SearchQuery = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.query, "minimal");
        assert_eq!(parsed.content_type, ContentType::Series);
        assert!(parsed.limit.is_none());
    }
}
