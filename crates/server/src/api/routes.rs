use axum::{middleware as axum_middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use super::{handlers, middleware, streams};
use crate::state::AppState;

/// Assemble the addon router.
///
/// Stremio expects `/manifest.json` and `/stream/...` at the root, so
/// there is no API prefix. CORS is wide open: addon clients are random
/// web origins by design.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/manifest.json", get(handlers::manifest))
        .route("/stream/{type}/{id}", get(streams::get_streams))
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::metrics))
        .layer(axum_middleware::from_fn(middleware::metrics_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
