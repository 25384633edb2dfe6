//! Peer-discovery source reconciliation.
//!
//! Each output stream carries a set of `StreamSource` entries merged from
//! three inputs: announce URLs embedded in the candidate's magnet URI, the
//! externally fetched public tracker list, and a DHT pseudo-source derived
//! from the info hash. All three inputs are unreliable; a malformed magnet
//! degrades that candidate's tracker list and nothing else.

mod http_source;

pub use http_source::{HttpTrackerSource, TrackerError, TrackerSource};

use std::collections::BTreeSet;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::candidate::Candidate;

/// One peer-discovery source, serialized as a tagged string:
/// `tracker:<url>` or `dht:<lowercase infohash>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StreamSource {
    Tracker(String),
    Dht(String),
}

impl std::fmt::Display for StreamSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamSource::Tracker(url) => write!(f, "tracker:{}", url),
            StreamSource::Dht(hash) => write!(f, "dht:{}", hash),
        }
    }
}

impl std::str::FromStr for StreamSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(url) = s.strip_prefix("tracker:") {
            Ok(StreamSource::Tracker(url.to_string()))
        } else if let Some(hash) = s.strip_prefix("dht:") {
            Ok(StreamSource::Dht(hash.to_string()))
        } else {
            Err(format!("unknown stream source tag: {}", s))
        }
    }
}

impl Serialize for StreamSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for StreamSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Merge the peer-discovery sources for one candidate.
///
/// Set semantics: duplicates across the magnet's embedded trackers and the
/// public list collapse. A missing info hash just omits the DHT entry.
pub fn build_sources(candidate: &Candidate, public_trackers: &[String]) -> BTreeSet<StreamSource> {
    let mut sources = BTreeSet::new();

    if let Some(magnet) = &candidate.torrent.magnet_uri {
        for url in parse_magnet_trackers(magnet) {
            sources.insert(StreamSource::Tracker(url));
        }
    }

    for url in public_trackers {
        let url = url.trim();
        if !url.is_empty() {
            sources.insert(StreamSource::Tracker(url.to_string()));
        }
    }

    if !candidate.info_hash.is_empty() {
        sources.insert(StreamSource::Dht(candidate.info_hash.to_lowercase()));
    }

    sources
}

/// Extract announce URLs (`tr=` parameters) from a magnet URI.
///
/// Anything that does not look like a magnet query yields an empty list;
/// a broken magnet must never abort the pipeline.
pub fn parse_magnet_trackers(uri: &str) -> Vec<String> {
    let query = match uri.split_once('?') {
        Some((scheme, query)) if scheme.eq_ignore_ascii_case("magnet:") => query,
        _ => return vec![],
    };

    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            if key != "tr" {
                return None;
            }
            let decoded = urlencoding::decode(value).ok()?;
            let decoded = decoded.trim();
            if decoded.is_empty() {
                None
            } else {
                Some(decoded.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{ContentType, TorrentInfo, VideoAttributes};

    fn make_candidate(info_hash: &str, magnet_uri: Option<&str>) -> Candidate {
        Candidate {
            info_hash: info_hash.to_string(),
            content_type: ContentType::Movie,
            title: "Test".to_string(),
            languages: vec![],
            episodes: vec![],
            video: VideoAttributes::default(),
            torrent: TorrentInfo {
                name: "Test".to_string(),
                size_bytes: 0,
                file_type: None,
                tag_names: vec![],
                magnet_uri: magnet_uri.map(|s| s.to_string()),
            },
            seeders: 0,
            leechers: 0,
            published_at: None,
        }
    }

    #[test]
    fn test_parse_magnet_trackers() {
        let magnet = "magnet:?xt=urn:btih:abc123\
                      &tr=udp%3A%2F%2Ftracker.example%3A1337%2Fannounce\
                      &tr=http%3A%2F%2Fother.example%2Fannounce";
        let trackers = parse_magnet_trackers(magnet);
        assert_eq!(
            trackers,
            vec![
                "udp://tracker.example:1337/announce",
                "http://other.example/announce"
            ]
        );
    }

    #[test]
    fn test_parse_magnet_garbage_is_empty() {
        assert!(parse_magnet_trackers("not a magnet at all").is_empty());
        assert!(parse_magnet_trackers("http://example.com?tr=x").is_empty());
        assert!(parse_magnet_trackers("").is_empty());
    }

    #[test]
    fn test_parse_magnet_without_trackers() {
        assert!(parse_magnet_trackers("magnet:?xt=urn:btih:abc123").is_empty());
    }

    #[test]
    fn test_build_sources_merges_and_dedups() {
        // Embedded [a, b], public [b, c], hash ABCDEF -> 4 unique entries.
        let candidate = make_candidate(
            "ABCDEF",
            Some("magnet:?xt=urn:btih:ABCDEF&tr=udp%3A%2F%2Fa&tr=udp%3A%2F%2Fb"),
        );
        let public = vec!["udp://b".to_string(), "udp://c".to_string()];

        let sources = build_sources(&candidate, &public);

        assert_eq!(sources.len(), 4);
        assert!(sources.contains(&StreamSource::Tracker("udp://a".to_string())));
        assert!(sources.contains(&StreamSource::Tracker("udp://b".to_string())));
        assert!(sources.contains(&StreamSource::Tracker("udp://c".to_string())));
        assert!(sources.contains(&StreamSource::Dht("abcdef".to_string())));
    }

    #[test]
    fn test_build_sources_missing_hash_omits_dht() {
        let candidate = make_candidate("", None);
        let sources = build_sources(&candidate, &["udp://a".to_string()]);
        assert_eq!(sources.len(), 1);
        assert!(!sources
            .iter()
            .any(|s| matches!(s, StreamSource::Dht(_))));
    }

    #[test]
    fn test_build_sources_broken_magnet_degrades() {
        let candidate = make_candidate("abc", Some("magnet without a query"));
        let sources = build_sources(&candidate, &[]);
        assert_eq!(sources.len(), 1);
        assert!(sources.contains(&StreamSource::Dht("abc".to_string())));
    }

    #[test]
    fn test_blank_public_trackers_skipped() {
        let candidate = make_candidate("abc", None);
        let sources = build_sources(&candidate, &["  ".to_string(), "".to_string()]);
        assert_eq!(sources.len(), 1); // only the DHT entry
    }

    #[test]
    fn test_stream_source_serialization_round_trip() {
        let source = StreamSource::Tracker("udp://tracker.example:1337".to_string());
        let json = serde_json::to_string(&source).unwrap();
        assert_eq!(json, "\"tracker:udp://tracker.example:1337\"");

        let back: StreamSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);

        let dht: StreamSource = serde_json::from_str("\"dht:abcdef\"").unwrap();
        assert_eq!(dht, StreamSource::Dht("abcdef".to_string()));
    }

    #[test]
    fn test_stream_source_unknown_tag_rejected() {
        let result: Result<StreamSource, _> = serde_json::from_str("\"peer:1.2.3.4\"");
        assert!(result.is_err());
    }
}
