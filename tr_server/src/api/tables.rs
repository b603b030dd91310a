//! Table pool API handlers.
//!
//! This module provides HTTP REST endpoints for pool-level operations:
//! - Initializing the pool with its fixed number of tables (once)
//! - Reading a consistent snapshot of the pool
//!
//! # Examples
//!
//! Initialize the pool:
//! ```bash
//! curl -X POST http://localhost:8080/public/table/init \
//!   -H "Content-Type: application/json" \
//!   -d '{"num_tables": 10}'
//! ```

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use table_reservation::PoolSnapshot;

use super::{
    AppState,
    request_id::RequestId,
    response::{ApiError, ApiResult, success},
};
use crate::metrics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeTableRequest {
    pub num_tables: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeTableResponse {
    pub total_tables: i64,
}

/// Initialize the table pool.
///
/// Must be called first and only once.
///
/// # Request Body
///
/// ```json
/// {"num_tables": 10}
/// ```
///
/// # Response
///
/// Returns `200 OK` with:
/// ```json
/// {"code": "SUCCESS", "data": {"total_tables": 10}}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body, `num_tables <= 0`, or already initialized
/// - `503 Service Unavailable`: Engine stopped or timed out
pub async fn initialize_tables(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<InitializeTableRequest>, JsonRejection>,
) -> ApiResult<InitializeTableResponse> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::error!(request_id = %request_id.as_str(), error = %rejection, "Failed to bind request");
        ApiError::from(rejection)
    })?;

    state
        .table_service
        .initialize_tables(request.num_tables)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id.as_str(), error = %e, "Failed to initialize tables");
            ApiError::from(e)
        })?;

    metrics::tables_available(state.table_service.available_tables());
    tracing::info!(
        request_id = %request_id.as_str(),
        total_tables = request.num_tables,
        "Tables initialized"
    );

    success(InitializeTableResponse {
        total_tables: request.num_tables,
    })
}

/// Get a consistent snapshot of the pool.
///
/// # Response
///
/// Returns `200 OK` with:
/// ```json
/// {
///   "code": "SUCCESS",
///   "data": {
///     "total_tables": 10,
///     "available_tables": 8,
///     "reserved_tables": 2,
///     "reservations": [
///       {"id": "...", "num_tables": 2, "created_at": "2026-01-01T12:00:00Z"}
///     ]
///   }
/// }
/// ```
///
/// # Errors
///
/// - `503 Service Unavailable`: Engine stopped or timed out
pub async fn get_tables(
    State(state): State<AppState>,
    request_id: RequestId,
) -> ApiResult<PoolSnapshot> {
    let snapshot = state.table_service.snapshot().await.map_err(|e| {
        tracing::error!(request_id = %request_id.as_str(), error = %e, "Failed to read table pool");
        ApiError::from(e)
    })?;

    success(snapshot)
}
