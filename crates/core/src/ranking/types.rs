//! Wire and request types for the ranking pipeline.

use serde::{Deserialize, Serialize};

use crate::candidate::ContentType;
use crate::tracker::StreamSource;

/// A parsed stream request.
///
/// Series identifiers encode as `<mediaId>:<season>:<episode>`; anything
/// malformed parses to `None` and resolves to an empty stream set upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRequest {
    pub content_type: ContentType,
    pub media_id: String,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

impl StreamRequest {
    pub fn parse(content_type: ContentType, raw_id: &str) -> Option<Self> {
        let raw_id = raw_id.trim();
        if raw_id.is_empty() {
            return None;
        }

        match content_type {
            ContentType::Movie => Some(Self {
                content_type,
                media_id: raw_id.to_string(),
                season: None,
                episode: None,
            }),
            ContentType::Series => {
                let mut parts = raw_id.split(':');
                let media_id = parts.next()?.to_string();
                let season = parts.next()?.parse().ok()?;
                let episode = parts.next()?.parse().ok()?;
                if parts.next().is_some() || media_id.is_empty() {
                    return None;
                }
                Some(Self {
                    content_type,
                    media_id,
                    season: Some(season),
                    episode: Some(episode),
                })
            }
        }
    }

    /// Cache key for the ranked result of this request.
    pub fn cache_key(&self) -> String {
        match (self.season, self.episode) {
            (Some(season), Some(episode)) => format!(
                "{}:{}:{}:{}",
                self.content_type, self.media_id, season, episode
            ),
            _ => format!("{}:{}", self.content_type, self.media_id),
        }
    }
}

/// The ranked result of one stream request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamSet {
    pub streams: Vec<OutputStream>,
}

impl StreamSet {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One playable stream descriptor, serialized in the addon wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputStream {
    pub info_hash: String,
    /// Addon display name line (addon + quality label).
    pub name: String,
    /// Descriptive title block (release name, seeders, size).
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub quality: String,
    pub seeders: u32,
    pub sources: Vec<StreamSource>,
    pub behavior_hints: BehaviorHints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorHints {
    pub bittorrent: bool,
}
