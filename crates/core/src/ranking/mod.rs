//! Stream ranking pipeline.
//!
//! Orchestrates the whole request: metadata resolution, candidate search
//! fan-out, deduplication, the filter stages, sorting, truncation, and
//! tracker reconciliation. Every stage is a pure transformation over an
//! in-memory candidate list; the pipeline owns no shared mutable state.
//!
//! The public entry point never fails: malformed identifiers, unreachable
//! collaborators, and empty search results all resolve to an empty stream
//! set. Availability beats completeness here.

mod policy;
mod types;

pub use policy::{Direction, ScoredCandidate, SortKey, SortPolicy, SortStep};
pub use types::{BehaviorHints, OutputStream, StreamRequest, StreamSet};

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, warn};

use crate::cache::ResultCache;
use crate::candidate::ContentType;
use crate::config::RankingConfig;
use crate::episode::{matches_episode, parse_episodes};
use crate::metadata::{MetadataResolver, ResolvedTitle};
use crate::metrics;
use crate::quality;
use crate::searcher::{dedup_candidates, CandidateSearch, SearchQuery};
use crate::tracker::{build_sources, TrackerSource};

/// Display name prefixed to every stream's `name` line.
const ADDON_NAME: &str = "Peerstream";

/// The ranking pipeline with its injected collaborators.
pub struct StreamRanker {
    metadata: Arc<dyn MetadataResolver>,
    search: Arc<dyn CandidateSearch>,
    trackers: Arc<dyn TrackerSource>,
    cache: Arc<dyn ResultCache>,
    config: RankingConfig,
}

impl StreamRanker {
    pub fn new(
        metadata: Arc<dyn MetadataResolver>,
        search: Arc<dyn CandidateSearch>,
        trackers: Arc<dyn TrackerSource>,
        cache: Arc<dyn ResultCache>,
        config: RankingConfig,
    ) -> Self {
        Self {
            metadata,
            search,
            trackers,
            cache,
            config,
        }
    }

    /// Rank streams for a raw request identifier.
    ///
    /// Never fails: all failure modes resolve to an empty stream set.
    pub async fn rank(&self, content_type: ContentType, raw_id: &str) -> StreamSet {
        metrics::STREAM_REQUESTS
            .with_label_values(&[content_type.as_str()])
            .inc();

        let Some(request) = StreamRequest::parse(content_type, raw_id) else {
            debug!(id = raw_id, "Malformed stream identifier");
            return StreamSet::empty();
        };

        let cache_ttl = self.config.cache_ttl();
        let key = request.cache_key();
        if !cache_ttl.is_zero() {
            if let Some(streams) = self.cache.get(&key).await {
                metrics::CACHE_HITS.inc();
                debug!(key = %key, streams = streams.len(), "Serving ranked result from cache");
                return StreamSet { streams };
            }
            metrics::CACHE_MISSES.inc();
        }

        let start = Instant::now();
        let streams = self.rank_uncached(&request).await;
        metrics::RANK_DURATION.observe(start.elapsed().as_secs_f64());

        if !cache_ttl.is_zero() {
            self.cache.set(&key, streams.clone(), cache_ttl).await;
        }

        StreamSet { streams }
    }

    async fn rank_uncached(&self, request: &StreamRequest) -> Vec<OutputStream> {
        let resolved = match self
            .metadata
            .resolve(&request.media_id, request.content_type)
            .await
        {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                debug!(media_id = %request.media_id, "Unknown media identifier");
                return vec![];
            }
            Err(e) => {
                warn!(media_id = %request.media_id, error = %e, "Metadata resolution failed");
                return vec![];
            }
        };

        let raw = self.search_all(request, &resolved).await;
        let candidates = dedup_candidates(raw);
        metrics::CANDIDATES_FOUND.observe(candidates.len() as f64);
        debug!(
            media_id = %request.media_id,
            candidates = candidates.len(),
            "Candidate search complete"
        );

        let is_series_lookup = request.season.is_some() && request.episode.is_some();
        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| ScoredCandidate {
                entries: if is_series_lookup {
                    parse_episodes(&candidate)
                } else {
                    vec![]
                },
                score: quality::score(&candidate),
                candidate,
            })
            .collect();

        if let Some(cap_gib) = self.config.size_cap_gib() {
            scored.retain(|s| s.candidate.size_gib() <= cap_gib);
        }

        // Low-quality candidates are only dropped when something better
        // survives; filtering must never empty a non-empty list on its own.
        if scored.iter().any(|s| !quality::is_low_quality(&s.candidate)) {
            scored.retain(|s| !quality::is_low_quality(&s.candidate));
        }

        if let (Some(season), Some(episode)) = (request.season, request.episode) {
            scored.retain(|s| matches_episode(&s.entries, season, episode));
        }

        self.config
            .sort_policy()
            .sort(&mut scored, &self.config.preferred_languages);
        scored.truncate(self.config.max_stream_count());

        let public_trackers = self.trackers.get().await;
        scored
            .into_iter()
            .map(|s| make_output_stream(s, &public_trackers))
            .collect()
    }

    /// Run every search strategy concurrently; a failing strategy is an
    /// empty contribution, never a request failure.
    async fn search_all(
        &self,
        request: &StreamRequest,
        resolved: &ResolvedTitle,
    ) -> Vec<crate::candidate::Candidate> {
        let queries = build_queries(request, resolved);
        let searches = queries.iter().map(|query| self.search.search(query));

        let mut raw = Vec::new();
        for (query, result) in queries.iter().zip(join_all(searches).await) {
            match result {
                Ok(candidates) => raw.extend(candidates),
                Err(e) => {
                    metrics::SEARCH_FAILURES.inc();
                    warn!(query = %query.query, error = %e, "Search strategy failed");
                }
            }
        }
        raw
    }
}

/// Build the search strategies for a request.
///
/// Strategies intentionally overlap (dedup handles it): an episode-specific
/// query finds single-episode releases, the season query finds packs.
fn build_queries(request: &StreamRequest, resolved: &ResolvedTitle) -> Vec<SearchQuery> {
    let title = resolved.title.to_lowercase();
    let texts = match (request.season, request.episode) {
        (Some(season), Some(episode)) => vec![
            format!("{} s{:02}e{:02}", title, season, episode),
            format!("{} season {}", title, season),
        ],
        _ => match resolved.year {
            Some(year) => vec![format!("{} {}", title, year), title],
            None => vec![title],
        },
    };

    texts
        .into_iter()
        .map(|query| SearchQuery {
            query,
            content_type: request.content_type,
            limit: None,
        })
        .collect()
}

fn make_output_stream(scored: ScoredCandidate, public_trackers: &[String]) -> OutputStream {
    let candidate = scored.candidate;
    let quality_label = quality::quality_label(&candidate);
    let sources = build_sources(&candidate, public_trackers);

    OutputStream {
        name: format!("{}\n{}", ADDON_NAME, quality_label),
        title: format!(
            "{}\n{} seeders, {:.1} GiB",
            candidate.torrent.name,
            candidate.seeders,
            candidate.size_gib()
        ),
        content_type: candidate.content_type,
        quality: quality_label,
        seeders: candidate.seeders,
        sources: sources.into_iter().collect(),
        behavior_hints: BehaviorHints { bittorrent: true },
        info_hash: candidate.info_hash,
    }
}
