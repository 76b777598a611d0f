// Prometheus metrics registry and collectors

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_gauge_vec_with_registry,
    register_histogram_vec_with_registry, CounterVec, Encoder, GaugeVec, HistogramVec, Opts,
    Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Total number of API requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of API requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["method", "endpoint"],
        REGISTRY
    ).unwrap();

    /// Total outbound image-generation calls
    pub static ref UPSTREAM_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_calls_total", "Total outbound image API calls"),
        &["model", "outcome"],
        REGISTRY
    ).unwrap();

    /// Outbound call duration
    pub static ref UPSTREAM_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("upstream_duration_seconds", "Outbound image API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["model"],
        REGISTRY
    ).unwrap();

    /// Retries scheduled after failed attempts
    pub static ref UPSTREAM_RETRIES: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_retries_total", "Retries scheduled after failed upstream attempts"),
        &["model"],
        REGISTRY
    ).unwrap();

    /// Result cache operations
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("cache_operations_total", "Result cache operations"),
        &["operation"],
        REGISTRY
    ).unwrap();

    /// Live cache entries
    pub static ref CACHE_ENTRIES: GaugeVec = register_gauge_vec_with_registry!(
        Opts::new("cache_entries", "Live result cache entries"),
        &["state"],
        REGISTRY
    ).unwrap();
}

/// Encode all registered metrics in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
