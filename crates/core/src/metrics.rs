//! Prometheus metrics for the ranking core.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry};

/// Stream requests total by content type.
pub static STREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("peerstream_stream_requests_total", "Total stream requests"),
        &["type"],
    )
    .unwrap()
});

/// Ranked-result cache hits.
pub static CACHE_HITS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("peerstream_cache_hits_total", "Ranked result cache hits").unwrap()
});

/// Ranked-result cache misses.
pub static CACHE_MISSES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("peerstream_cache_misses_total", "Ranked result cache misses").unwrap()
});

/// Search backend failures absorbed by the pipeline.
pub static SEARCH_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "peerstream_search_failures_total",
        "Search backend failures treated as empty contributions",
    )
    .unwrap()
});

/// Candidates found per request, after deduplication.
pub static CANDIDATES_FOUND: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "peerstream_candidates_found",
            "Deduplicated candidates per request",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
    )
    .unwrap()
});

/// Rank duration in seconds (cache misses only).
pub static RANK_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("peerstream_rank_duration_seconds", "Ranking pipeline duration")
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
    )
    .unwrap()
});

/// Register all core metrics on a registry.
pub fn register_metrics(registry: &Registry) {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(STREAM_REQUESTS.clone()),
        Box::new(CACHE_HITS.clone()),
        Box::new(CACHE_MISSES.clone()),
        Box::new(SEARCH_FAILURES.clone()),
        Box::new(CANDIDATES_FOUND.clone()),
        Box::new(RANK_DURATION.clone()),
    ];
    for collector in collectors {
        // Duplicate registration only happens in tests sharing a registry.
        let _ = registry.register(collector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_metrics() {
        let registry = Registry::new();
        register_metrics(&registry);
        // Re-registering must not panic.
        register_metrics(&registry);

        STREAM_REQUESTS.with_label_values(&["movie"]).inc();
        let families = registry.gather();
        assert!(families
            .iter()
            .any(|f| f.get_name() == "peerstream_stream_requests_total"));
    }
}
