//! Common test utilities for in-process API testing with mocks.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use peerstream_core::{
    testing::{MockMetadataResolver, MockSearcher, StaticTrackerSource},
    CandidateSearch, Config, MemoryResultCache, RankingConfig, StreamRanker,
};
use peerstream_server::api::create_router;
use peerstream_server::state::AppState;

/// Re-export fixtures for test convenience
pub use peerstream_core::testing::fixtures;

/// In-process server with mock collaborators injected.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock searcher - configure candidates per test
    pub searcher: Arc<MockSearcher>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Fixture with a working search backend and default ranking config.
    pub fn new() -> Self {
        Self::with_ranking(RankingConfig::default())
    }

    pub fn with_ranking(ranking: RankingConfig) -> Self {
        let searcher = Arc::new(MockSearcher::new());

        let ranker = StreamRanker::new(
            Arc::new(MockMetadataResolver::with_title("The Matrix", Some(1999))),
            Arc::clone(&searcher) as Arc<dyn CandidateSearch>,
            Arc::new(StaticTrackerSource::new(vec![
                "udp://tracker.example.org:1337/announce".to_string(),
            ])),
            Arc::new(MemoryResultCache::new()),
            ranking,
        );

        let state = Arc::new(AppState::new(Config::default(), Some(Arc::new(ranker))));
        Self {
            router: create_router(state),
            searcher,
        }
    }

    /// Fixture without any search backend configured.
    pub fn without_searcher() -> Self {
        let state = Arc::new(AppState::new(Config::default(), None));
        Self {
            router: create_router(state),
            searcher: Arc::new(MockSearcher::new()),
        }
    }

    /// Perform a GET request against the in-process router.
    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// GET returning the raw body as text (for /metrics).
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).to_string())
    }
}
