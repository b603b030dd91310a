//! HTTP server for the table reservation engine.
//!
//! - [`api`]: Router, handlers and middleware
//! - [`config`]: Environment-driven server configuration
//! - [`logging`]: Tracing subscriber setup
//! - [`metrics`]: Prometheus exporter and recorders

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
