// Metrics module for Prometheus observability

mod registry;

pub use registry::{
    gather_metrics, CACHE_ENTRIES, CACHE_OPERATIONS, REQUESTS_TOTAL, REQUEST_DURATION,
    UPSTREAM_CALLS, UPSTREAM_DURATION, UPSTREAM_RETRIES,
};

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint])
        .observe(duration_secs);
}

/// Helper to record outbound call metrics
pub fn record_upstream_call(model: &str, outcome: &str, duration_secs: f64) {
    UPSTREAM_CALLS.with_label_values(&[model, outcome]).inc();
    UPSTREAM_DURATION
        .with_label_values(&[model])
        .observe(duration_secs);
}

pub fn record_upstream_retry(model: &str) {
    UPSTREAM_RETRIES.with_label_values(&[model]).inc();
}

/// Helpers to record result cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_insert() {
    CACHE_OPERATIONS.with_label_values(&["insert"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES
        .with_label_values(&["active"])
        .set(count as f64);
}
