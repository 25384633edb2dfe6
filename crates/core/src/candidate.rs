//! Candidate data model for torrent search hits.
//!
//! A `Candidate` is one raw search result. The `info_hash` is the only
//! field that can be relied on across search strategies - everything else
//! is advisory and may be missing or contradictory between indexers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of media a stream request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    /// Parse from the URL path segment used by addon clients.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(ContentType::Movie),
            "series" => Some(ContentType::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Video resolution tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    #[serde(rename = "4320p")]
    R4320p,
    #[serde(rename = "2160p")]
    R2160p,
    #[serde(rename = "1440p")]
    R1440p,
    #[serde(rename = "1080p")]
    R1080p,
    #[serde(rename = "720p")]
    R720p,
    #[serde(rename = "576p")]
    R576p,
    #[serde(rename = "540p")]
    R540p,
    #[serde(rename = "480p")]
    R480p,
    #[serde(rename = "360p")]
    R360p,
}

impl Resolution {
    /// Vertical pixel count of this tier.
    pub fn height(&self) -> u32 {
        match self {
            Resolution::R4320p => 4320,
            Resolution::R2160p => 2160,
            Resolution::R1440p => 1440,
            Resolution::R1080p => 1080,
            Resolution::R720p => 720,
            Resolution::R576p => 576,
            Resolution::R540p => 540,
            Resolution::R480p => 480,
            Resolution::R360p => 360,
        }
    }

    /// Human-readable label ("1080p", "2160p", ...).
    pub fn label(&self) -> &'static str {
        match self {
            Resolution::R4320p => "4320p",
            Resolution::R2160p => "2160p",
            Resolution::R1440p => "1440p",
            Resolution::R1080p => "1080p",
            Resolution::R720p => "720p",
            Resolution::R576p => "576p",
            Resolution::R540p => "540p",
            Resolution::R480p => "480p",
            Resolution::R360p => "360p",
        }
    }

    /// Recognize a tier from a free-text token like "2160p" or "4k".
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "8k" | "4320p" => Some(Resolution::R4320p),
            "4k" | "uhd" | "2160p" => Some(Resolution::R2160p),
            "1440p" | "2k" => Some(Resolution::R1440p),
            "1080p" => Some(Resolution::R1080p),
            "720p" => Some(Resolution::R720p),
            "576p" => Some(Resolution::R576p),
            "540p" => Some(Resolution::R540p),
            "480p" => Some(Resolution::R480p),
            "360p" => Some(Resolution::R360p),
            _ => None,
        }
    }
}

/// A spoken/subtitle language attached to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 code ("en", "it", ...).
    pub code: String,
    /// Display name ("English", "Italiano", ...).
    pub name: String,
}

/// Structured season/episode membership reported by an indexer.
///
/// An empty `episodes` list means the whole season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeGroup {
    pub season: u32,
    #[serde(default)]
    pub episodes: Vec<u32>,
}

/// Video attributes parsed from the release name or reported by the indexer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    /// Release modifier such as "REMUX" or "EXTENDED".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
    /// Release source such as "BluRay", "WEB-DL", "CAM".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub is_3d: bool,
}

/// Torrent-level attributes of a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TorrentInfo {
    /// Release name, free text.
    pub name: String,
    /// Total size in bytes.
    pub size_bytes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnet_uri: Option<String>,
}

/// One raw search hit, before any pipeline stage has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Swarm identifier (lowercase hex). Sole deduplication key.
    /// Empty string when the indexer did not report one.
    pub info_hash: String,
    pub content_type: ContentType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,
    /// Structured episode membership. Empty means "not reported";
    /// the name-based parser runs instead.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<EpisodeGroup>,
    #[serde(default)]
    pub video: VideoAttributes,
    pub torrent: TorrentInfo,
    pub seeders: u32,
    pub leechers: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Candidate {
    /// Torrent size in GiB.
    pub fn size_gib(&self) -> f64 {
        self.torrent.size_bytes as f64 / (1024.0 * 1024.0 * 1024.0)
    }
}
