//! Mock candidate search for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::candidate::Candidate;
use crate::searcher::{CandidateSearch, SearchError, SearchQuery};

/// Mock implementation of the [`CandidateSearch`] trait.
///
/// Controllable behavior for tests:
/// - Return configurable candidates (the full set for every query,
///   regardless of query text — strategy overlap is the point)
/// - Track search queries for assertions
/// - Simulate one-shot or permanent failures
pub struct MockSearcher {
    /// Configured candidates to return.
    results: RwLock<Vec<Candidate>>,
    /// Recorded search queries.
    searches: RwLock<Vec<SearchQuery>>,
    /// If set, the next search fails with this error (consumed).
    next_error: RwLock<Option<SearchError>>,
    /// If set, every search fails.
    fail_all: RwLock<bool>,
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    /// Create a new mock searcher with empty results.
    pub fn new() -> Self {
        Self {
            results: RwLock::new(Vec::new()),
            searches: RwLock::new(Vec::new()),
            next_error: RwLock::new(None),
            fail_all: RwLock::new(false),
        }
    }

    /// Set the candidates to return for subsequent searches.
    pub async fn set_results(&self, results: Vec<Candidate>) {
        *self.results.write().await = results;
    }

    /// Add a single candidate.
    pub async fn add_result(&self, result: Candidate) {
        self.results.write().await.push(result);
    }

    /// Get recorded search queries.
    pub async fn recorded_searches(&self) -> Vec<SearchQuery> {
        self.searches.read().await.clone()
    }

    /// Configure the next search to fail with the given error.
    pub async fn set_next_error(&self, error: SearchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every subsequent search fail.
    pub async fn fail_all(&self) {
        *self.fail_all.write().await = true;
    }
}

#[async_trait]
impl CandidateSearch for MockSearcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn search(&self, query: &SearchQuery) -> Result<Vec<Candidate>, SearchError> {
        if *self.fail_all.read().await {
            return Err(SearchError::ConnectionFailed("mock failure".to_string()));
        }
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        self.searches.write().await.push(query.clone());

        let candidates = self.results.read().await.clone();
        Ok(match query.limit {
            Some(limit) => candidates.into_iter().take(limit as usize).collect(),
            None => candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::ContentType;
    use crate::testing::fixtures;

    fn make_query(query: &str) -> SearchQuery {
        SearchQuery {
            query: query.to_string(),
            content_type: ContentType::Movie,
            limit: None,
        }
    }

    #[tokio::test]
    async fn test_returns_configured_results_for_any_query() {
        let searcher = MockSearcher::new();
        searcher
            .set_results(vec![
                fixtures::movie_candidate("The Matrix 1080p", "abc", 50),
                fixtures::movie_candidate("The Matrix 720p", "def", 20),
            ])
            .await;

        let candidates = searcher.search(&make_query("anything")).await.unwrap();
        assert_eq!(candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_recorded_searches() {
        let searcher = MockSearcher::new();
        searcher.search(&make_query("first")).await.unwrap();
        searcher.search(&make_query("second")).await.unwrap();

        let searches = searcher.recorded_searches().await;
        assert_eq!(searches.len(), 2);
        assert_eq!(searches[0].query, "first");
        assert_eq!(searches[1].query, "second");
    }

    #[tokio::test]
    async fn test_next_error_is_consumed() {
        let searcher = MockSearcher::new();
        searcher
            .set_next_error(SearchError::Timeout)
            .await;

        assert!(searcher.search(&make_query("a")).await.is_err());
        assert!(searcher.search(&make_query("a")).await.is_ok());
    }

    #[tokio::test]
    async fn test_fail_all() {
        let searcher = MockSearcher::new();
        searcher.fail_all().await;

        assert!(searcher.search(&make_query("a")).await.is_err());
        assert!(searcher.search(&make_query("b")).await.is_err());
    }

    #[tokio::test]
    async fn test_limit() {
        let searcher = MockSearcher::new();
        searcher
            .set_results(vec![
                fixtures::movie_candidate("A", "h1", 1),
                fixtures::movie_candidate("B", "h2", 2),
                fixtures::movie_candidate("C", "h3", 3),
            ])
            .await;

        let query = SearchQuery {
            query: String::new(),
            content_type: ContentType::Movie,
            limit: Some(2),
        };
        let candidates = searcher.search(&query).await.unwrap();
        assert_eq!(candidates.len(), 2);
    }
}
