pub mod cache;
pub mod candidate;
pub mod config;
pub mod episode;
pub mod metadata;
pub mod metrics;
pub mod quality;
pub mod ranking;
pub mod searcher;
pub mod testing;
pub mod tracker;

pub use cache::{MemoryResultCache, ResultCache};
pub use candidate::{
    Candidate, ContentType, EpisodeGroup, Language, Resolution, TorrentInfo, VideoAttributes,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, JackettConfig,
    MetadataConfig, OmdbConfig, RankingConfig, SanitizedConfig, SearcherBackend, SearcherConfig,
    ServerConfig, TmdbConfig, TrackerConfig,
};
pub use episode::{matches_episode, parse_episodes, ParsedEpisodeEntry};
pub use metadata::{
    CombinedMetadataResolver, MetadataError, MetadataResolver, OmdbClient, ResolvedTitle,
    TmdbClient,
};
pub use ranking::{
    BehaviorHints, Direction, OutputStream, SortKey, SortPolicy, StreamRanker, StreamRequest,
    StreamSet,
};
pub use searcher::{CandidateSearch, JackettSearcher, SearchError, SearchQuery};
pub use tracker::{build_sources, HttpTrackerSource, StreamSource, TrackerSource};
