//! Metrics collection.
//!
//! # Metrics
//! - `wallet_submissions_total` (counter): submissions by request kind
//! - `wallet_poll_outcomes_total` (counter): receipt polls by outcome
//! - `wallet_directory_cache_size` (gauge): cached directory entries
//! - `custody_requests_total` (counter): custody API calls by endpoint, result
//! - `chain_endpoint_health` (gauge): 1=healthy, 0=unhealthy
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Goes through the `metrics` facade; the embedding process picks the
//!   exporter

/// Record a transaction submission by request kind ("transfer" or
/// "contract_call").
pub fn record_submission(kind: &'static str) {
    metrics::counter!("wallet_submissions_total", "kind" => kind).increment(1);
}

/// Record the outcome of a receipt poll.
pub fn record_poll_outcome(outcome: &'static str) {
    metrics::counter!("wallet_poll_outcomes_total", "outcome" => outcome).increment(1);
}

/// Record the current size of a directory cache.
pub fn record_directory_cache_size(cache: &'static str, size: usize) {
    metrics::gauge!("wallet_directory_cache_size", "cache" => cache).set(size as f64);
}

/// Record a custody API request result.
pub fn record_custody_request(endpoint: &'static str, ok: bool) {
    let result = if ok { "ok" } else { "error" };
    metrics::counter!("custody_requests_total", "endpoint" => endpoint, "result" => result)
        .increment(1);
}

/// Record chain endpoint health.
pub fn record_endpoint_health(endpoint: &'static str, healthy: bool) {
    metrics::gauge!("chain_endpoint_health", "endpoint" => endpoint)
        .set(if healthy { 1.0 } else { 0.0 });
}
