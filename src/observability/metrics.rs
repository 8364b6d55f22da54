//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mock_requests_total` (counter): requests by method, status, matched;
//!   extension methods are counted as `OTHER`
//! - `mock_request_duration_seconds` (histogram): latency incl. configured delay
//! - `mock_definition_files` (gauge): files currently contributing routes
//! - `mock_reloads_total` (counter): per-file reload outcomes

use std::net::SocketAddr;
use std::time::Instant;

use axum::http::Method;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with an HTTP scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record one dispatched request.
pub fn record_request(method: &Method, status: u16, matched: bool, start: Instant) {
    metrics::counter!(
        "mock_requests_total",
        "method" => method_label(method),
        "status" => status.to_string(),
        "matched" => if matched { "true" } else { "false" }
    )
    .increment(1);
    metrics::histogram!("mock_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record the outcome of reloading one file.
pub fn record_reload(outcome: &'static str) {
    metrics::counter!("mock_reloads_total", "outcome" => outcome).increment(1);
}

/// Record how many files currently contribute routes.
pub fn record_definition_files(count: usize) {
    metrics::gauge!("mock_definition_files").set(count as f64);
}

const STANDARD_METHODS: [&str; 9] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "CONNECT", "TRACE",
];

/// Label for a request method. Clients may send any token as a method, so
/// only the standard ones get their own series.
fn method_label(method: &Method) -> &'static str {
    STANDARD_METHODS
        .iter()
        .copied()
        .find(|standard| *standard == method.as_str())
        .unwrap_or("OTHER")
}
