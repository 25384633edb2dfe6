//! Prometheus metrics for the HTTP surface.
//!
//! The registry also carries the ranking pipeline metrics defined in
//! `peerstream_core::metrics`, so a single `/metrics` scrape covers both.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    peerstream_core::metrics::register_metrics(&registry);
    registry
});

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "peerstream_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("peerstream_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "peerstream_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();
}

/// Encode all registered metrics in Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Normalize a request path for metric labels, collapsing per-request
/// identifiers so label cardinality stays bounded.
pub fn normalize_path(path: &str) -> String {
    let stream_regex = regex_lite::Regex::new(r"^/stream/([^/]+)/.+$").unwrap();
    if let Some(captures) = stream_regex.captures(path) {
        return format!("/stream/{}/{{id}}", &captures[1]);
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_stream_path() {
        assert_eq!(
            normalize_path("/stream/movie/tt0133093.json"),
            "/stream/movie/{id}"
        );
        assert_eq!(
            normalize_path("/stream/series/tt0903747:1:2.json"),
            "/stream/series/{id}"
        );
    }

    #[test]
    fn test_normalize_static_path() {
        assert_eq!(normalize_path("/manifest.json"), "/manifest.json");
        assert_eq!(normalize_path("/health"), "/health");
    }

    #[test]
    fn test_encode_metrics_includes_http_and_pipeline() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/health", "200"])
            .inc();

        let encoded = encode_metrics();
        assert!(encoded.contains("peerstream_http_requests_total"));
        assert!(encoded.contains("peerstream_stream_requests_total"));
    }
}
