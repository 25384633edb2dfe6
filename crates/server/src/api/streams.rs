//! The stream resource endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use peerstream_core::{ContentType, OutputStream};

use crate::state::AppState;

/// Stremio stream response envelope.
#[derive(Serialize)]
pub struct StreamResponse {
    pub streams: Vec<OutputStream>,
}

/// `GET /stream/{type}/{id}.json`
///
/// Always answers 200 with a stream list; malformed ids, unknown types,
/// and a missing search backend all produce an empty list. Addon clients
/// treat non-200 answers as addon failures, so errors stay in the logs.
pub async fn get_streams(
    State(state): State<Arc<AppState>>,
    Path((content_type, id)): Path<(String, String)>,
) -> Json<StreamResponse> {
    let Some(raw_id) = id.strip_suffix(".json") else {
        debug!(id = %id, "Stream id missing .json suffix");
        return Json(StreamResponse { streams: vec![] });
    };

    let Some(content_type) = ContentType::parse(&content_type) else {
        debug!(content_type = %content_type, "Unknown content type");
        return Json(StreamResponse { streams: vec![] });
    };

    let Some(ranker) = state.ranker() else {
        debug!("No search backend configured");
        return Json(StreamResponse { streams: vec![] });
    };

    let result = ranker.rank(content_type, raw_id).await;
    Json(StreamResponse {
        streams: result.streams,
    })
}
