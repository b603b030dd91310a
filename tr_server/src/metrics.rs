//! Prometheus metrics for monitoring reservation traffic and pool health.
//!
//! Metrics are exposed in Prometheus text format for scraping by monitoring
//! systems. Recording is a no-op until [`init_metrics`] installs the exporter.
//!
//! # Metrics Categories
//!
//! - **HTTP Metrics**: Request counts, duration, status codes
//! - **Reservation Metrics**: Reservations and cancellations, rejected requests
//! - **Pool Metrics**: Available tables
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use tr_server::metrics;
//! use std::net::SocketAddr;
//!
//! // Initialize metrics exporter
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! // Record HTTP request
//! metrics::http_requests_total("POST", "/secure/reservations", 200);
//!
//! // Record pool state
//! metrics::tables_available(8);
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Sets up a Prometheus scrape endpoint on the specified address.
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
///
/// Increments the total HTTP request counter with method, path, and status labels.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Reservation Metrics
// ============================================================================

/// Increment successful reservations counter.
pub fn reservations_total(tables_reserved: i64) {
    metrics::counter!("reservations_total").increment(1);
    metrics::histogram!("reservation_size_tables").record(tables_reserved as f64);
}

/// Increment successful cancellations counter.
pub fn cancellations_total() {
    metrics::counter!("cancellations_total").increment(1);
}

/// Increment rejected operations counter, labelled by error kind.
pub fn reservation_errors_total(kind: &str) {
    metrics::counter!("reservation_errors_total",
        "kind" => kind.to_string()
    )
    .increment(1);
}

// ============================================================================
// Pool Metrics
// ============================================================================

/// Set current available tables count.
pub fn tables_available(count: i64) {
    metrics::gauge!("tables_available").set(count as f64);
}
