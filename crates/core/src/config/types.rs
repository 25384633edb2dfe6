use std::net::IpAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ranking::SortPolicy;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub searcher: Option<SearcherConfig>,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub trackers: TrackerConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Searcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearcherConfig {
    /// Search backend type
    pub backend: SearcherBackend,
    /// Jackett-specific configuration (required when backend = "jackett")
    #[serde(default)]
    pub jackett: Option<JackettConfig>,
}

/// Available search backends
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearcherBackend {
    Jackett,
    // Future: Prowlarr, DirectApi
}

/// Jackett search backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JackettConfig {
    /// Jackett server URL (e.g., "http://localhost:9117")
    pub url: String,
    /// Jackett API key
    pub api_key: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Metadata resolution configuration. Both upstreams are optional; when
/// both are configured they are queried concurrently, TMDB preferred.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MetadataConfig {
    #[serde(default)]
    pub tmdb: Option<TmdbConfig>,
    #[serde(default)]
    pub omdb: Option<OmdbConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    pub api_key: String,
    /// Override for testing; defaults to the public API.
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OmdbConfig {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Public tracker list configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    /// URL of a newline-separated tracker list.
    #[serde(default = "default_tracker_url")]
    pub url: String,
    /// How long a fetched list stays fresh, in seconds.
    #[serde(default = "default_tracker_ttl")]
    pub ttl_secs: u64,
}

impl TrackerConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            url: default_tracker_url(),
            ttl_secs: default_tracker_ttl(),
        }
    }
}

fn default_tracker_url() -> String {
    "https://raw.githubusercontent.com/ngosang/trackerslist/master/trackers_best.txt".to_string()
}

fn default_tracker_ttl() -> u64 {
    86_400
}

/// Ranking pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    /// Maximum streams in a response (default: 10).
    #[serde(default = "default_max_streams")]
    pub max_streams: usize,
    /// Drop candidates larger than this, in GiB. Absent or non-positive
    /// disables the filter.
    #[serde(default)]
    pub max_size_gib: Option<f64>,
    /// Ranked-result cache lifetime in seconds; 0 disables caching.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Language codes in preference order, for the optional
    /// language-preference sort step.
    #[serde(default)]
    pub preferred_languages: Vec<String>,
    #[serde(default)]
    pub sort: SortPolicy,
}

impl RankingConfig {
    /// Effective stream cap. A misconfigured zero falls back to the
    /// default rather than emptying every response.
    pub fn max_stream_count(&self) -> usize {
        if self.max_streams == 0 {
            default_max_streams()
        } else {
            self.max_streams
        }
    }

    /// Effective size cap; `None` when unset or not a usable bound.
    pub fn size_cap_gib(&self) -> Option<f64> {
        self.max_size_gib.filter(|cap| cap.is_finite() && *cap > 0.0)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn sort_policy(&self) -> &SortPolicy {
        &self.sort
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            max_streams: default_max_streams(),
            max_size_gib: None,
            cache_ttl_secs: default_cache_ttl(),
            preferred_languages: vec![],
            sort: SortPolicy::default(),
        }
    }
}

fn default_max_streams() -> usize {
    10
}

fn default_cache_ttl() -> u64 {
    3600
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searcher: Option<SanitizedSearcherConfig>,
    pub metadata: SanitizedMetadataConfig,
    pub trackers: TrackerConfig,
    pub ranking: RankingConfig,
}

/// Sanitized searcher config (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSearcherConfig {
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jackett: Option<SanitizedJackettConfig>,
}

/// Sanitized Jackett config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedJackettConfig {
    pub url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedMetadataConfig {
    pub tmdb_configured: bool,
    pub omdb_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            searcher: config.searcher.as_ref().map(|s| SanitizedSearcherConfig {
                backend: match s.backend {
                    SearcherBackend::Jackett => "jackett".to_string(),
                },
                jackett: s.jackett.as_ref().map(|j| SanitizedJackettConfig {
                    url: j.url.clone(),
                    api_key_configured: !j.api_key.is_empty(),
                    timeout_secs: j.timeout_secs,
                }),
            }),
            metadata: SanitizedMetadataConfig {
                tmdb_configured: config
                    .metadata
                    .tmdb
                    .as_ref()
                    .is_some_and(|t| !t.api_key.is_empty()),
                omdb_configured: config
                    .metadata
                    .omdb
                    .as_ref()
                    .is_some_and(|o| !o.api_key.is_empty()),
            },
            trackers: config.trackers.clone(),
            ranking: config.ranking.clone(),
        }
    }
}
