//! Table reservation server.
//!
//! Spawns the serialization engine, wires the table and reservation services
//! to it, and serves the HTTP API until Ctrl+C.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Error;
use pico_args::Arguments;
use table_reservation::{
    engine::Engine,
    service::{ReservationManager, TableManager},
};
use tokio::sync::oneshot;
use tr_server::{
    api::{self, AppState},
    config::ServerConfig,
    logging, metrics,
};

const HELP: &str = "\
Run the table reservation server

USAGE:
  tr_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8080]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  APP_ENV                      development | production  [default: development]
  SERVER_BIND                  Server bind address (e.g., 0.0.0.0:8080)
  METRICS_BIND                 Prometheus scrape address; metrics disabled when unset
  ENGINE_CHANNEL_CAPACITY      Engine inbox capacity  [default: 100]
  ENGINE_RESPONSE_TIMEOUT_MS   Per-request deadline in milliseconds  [default: 5000]
  RUST_LOG                     Log filter  [default: info]
  (A .env file in the working directory is loaded if present)
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let bind_override: Option<SocketAddr> = pargs
        .opt_value_from_str("--bind")
        .map_err(|e| anyhow::anyhow!("Invalid --bind argument: {}", e))?;

    let config = ServerConfig::from_env(bind_override)?;
    config.validate()?;

    logging::init(config.app_env);
    tracing::info!(
        bind = %config.bind,
        app_env = %config.app_env,
        channel_capacity = config.engine.channel_capacity,
        response_timeout_ms = config.engine.response_timeout.as_millis() as u64,
        "Starting table reservation server"
    );

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(|e| anyhow::anyhow!(e))?;
        tracing::info!("Prometheus metrics available at http://{}/metrics", metrics_bind);
    }

    // Start the engine; it runs until the stop signal after the HTTP server drains
    let (engine, handle) = Engine::in_memory(&config.engine);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let engine_task = tokio::spawn(engine.run_until(async {
        let _ = stop_rx.await;
    }));

    let state = AppState {
        table_service: Arc::new(TableManager::new(handle.clone())),
        reservation_service: Arc::new(ReservationManager::new(handle)),
    };
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    tracing::info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    tracing::info!("Shutting down server...");

    let _ = stop_tx.send(());
    engine_task
        .await
        .map_err(|e| anyhow::anyhow!("Engine task failed: {}", e))?;

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
