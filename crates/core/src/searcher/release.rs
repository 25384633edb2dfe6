//! Release-name attribute parsing.
//!
//! Indexers rarely report structured video attributes, so resolution,
//! codec, source, and modifier are recovered from the release name with
//! the same kind of loose token matching scene names actually follow.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::candidate::{Resolution, VideoAttributes};

static RESOLUTION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{3,4}p|4k|8k|uhd)\b").expect("resolution token pattern"));

const SOURCES: [&str; 7] = [
    "bluray", "blu-ray", "web-dl", "webdl", "webrip", "hdtv", "dvdrip",
];

/// Parse video attributes out of a free-text release name.
pub fn parse_release_attributes(name: &str) -> VideoAttributes {
    let lower = name.to_lowercase();

    let resolution = RESOLUTION_TOKEN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| Resolution::from_token(m.as_str()));

    let codec = if lower.contains("x265") || lower.contains("h265") || lower.contains("h.265") {
        Some("H265".to_string())
    } else if lower.contains("x264") || lower.contains("h264") || lower.contains("h.264") {
        Some("H264".to_string())
    } else {
        None
    };

    let modifier = lower.contains("remux").then(|| "REMUX".to_string());

    let source = SOURCES
        .iter()
        .find(|s| lower.contains(*s))
        .map(|s| s.to_string());

    let is_3d = lower.contains(" 3d ") || lower.contains(".3d.") || lower.ends_with(" 3d");

    VideoAttributes {
        resolution,
        codec,
        modifier,
        source,
        is_3d,
    }
}
