//! HTTP API for the table reservation server.
//!
//! Handlers are thin: they bind JSON, call the table or reservation service,
//! and wrap the result in the `{"code", "data"}` envelope. All state changes
//! happen inside the serialization engine behind those services.
//!
//! # Modules
//!
//! - [`tables`]: Pool initialization and snapshot
//! - [`reservations`]: Reserve and cancel
//! - [`response`]: Envelope, response codes, error-to-status mapping
//! - [`request_id`]: Request correlation, request logging and HTTP metrics
//!
//! # Endpoints Overview
//!
//! ## Public
//! - `POST /public/table/init` - Initialize the pool
//! - `GET /public/table` - Pool snapshot
//!
//! ## Reservations
//! - `POST /secure/reservations` - Reserve tables for a party
//! - `DELETE /secure/reservations/{id}` - Cancel a reservation
//!
//! ## Health Check
//! - `GET /` - Liveness check, plain text
//! - `GET /health` - Engine health status
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use table_reservation::{
//!     engine::{Engine, EngineConfig},
//!     service::{ReservationManager, TableManager},
//! };
//! use tr_server::api::{AppState, create_router};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (engine, handle) = Engine::in_memory(&EngineConfig::default());
//! tokio::spawn(engine.run());
//!
//! let state = AppState {
//!     table_service: Arc::new(TableManager::new(handle.clone())),
//!     reservation_service: Arc::new(ReservationManager::new(handle)),
//! };
//!
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively. In production, configure appropriate
//! origins, methods, and headers.

pub mod request_id;
pub mod reservations;
pub mod response;
pub mod tables;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
};
use serde_json::json;
use std::sync::Arc;
use table_reservation::{ReservationService, TableService};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// Cloned for each request (cheap due to Arc wrappers).
#[derive(Clone)]
pub struct AppState {
    pub table_service: Arc<dyn TableService>,
    pub reservation_service: Arc<dyn ReservationService>,
}

/// Create the complete API router with all endpoints and middleware.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/table/init", post(tables::initialize_tables))
        .route("/table", get(tables::get_tables));

    let secure_routes = Router::new()
        .route("/reservations", post(reservations::reserve))
        .route(
            "/reservations/{id}",
            delete(reservations::cancel_reservation),
        );

    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .nest("/public", public_routes)
        .nest("/secure", secure_routes)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(axum::middleware::from_fn(request_id::request_id_middleware)),
        )
        .with_state(state)
}

async fn liveness() -> &'static str {
    "Healthy"
}

/// Health check endpoint for monitoring and load balancers.
///
/// Round-trips a snapshot request through the engine, so a stopped or
/// stalled engine reports unhealthy.
///
/// # Response
///
/// Returns `200 OK` if the engine answers, or `503 Service Unavailable` otherwise.
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"healthy","version":"1.0.0","engine":{"responsive":true,...},"timestamp":"..."}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.table_service.snapshot().await;
    let engine_healthy = snapshot.is_ok();

    let status_code = if engine_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let engine = match &snapshot {
        Ok(snapshot) => json!({
            "responsive": true,
            "initialized": snapshot.is_initialized(),
            "total_tables": snapshot.total_tables,
            "available_tables": snapshot.available_tables,
        }),
        Err(e) => json!({
            "responsive": false,
            "error": e.to_string(),
        }),
    };

    let response = json!({
        "status": if engine_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "engine": engine,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
