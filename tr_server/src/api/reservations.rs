//! Reservation API handlers.
//!
//! # Examples
//!
//! Reserve tables for a party of five:
//! ```bash
//! curl -X POST http://localhost:8080/secure/reservations \
//!   -H "Content-Type: application/json" \
//!   -d '{"num_customers": 5}'
//! ```
//!
//! Cancel a reservation:
//! ```bash
//! curl -X DELETE http://localhost:8080/secure/reservations/BOOKING_ID
//! ```

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};

use super::{
    AppState,
    request_id::RequestId,
    response::{ApiError, ApiResult, success},
};
use crate::metrics;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub num_customers: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub booking_id: String,
    pub tables_reserved: i64,
    pub remaining_tables: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelReservationResponse {
    pub freed_tables: i64,
    pub remaining_tables: i64,
}

/// Reserve tables for a group of customers.
///
/// Each table seats four; the party size is rounded up to whole tables.
///
/// # Request Body
///
/// ```json
/// {"num_customers": 5}
/// ```
///
/// # Response
///
/// Returns `200 OK` with:
/// ```json
/// {
///   "code": "SUCCESS",
///   "data": {"booking_id": "...", "tables_reserved": 2, "remaining_tables": 8}
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body, `num_customers <= 0`, pool not
///   initialized, or not enough tables
/// - `503 Service Unavailable`: Engine stopped or timed out
pub async fn reserve(
    State(state): State<AppState>,
    request_id: RequestId,
    payload: Result<Json<ReservationRequest>, JsonRejection>,
) -> ApiResult<ReservationResponse> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::error!(request_id = %request_id.as_str(), error = %rejection, "Failed to bind request");
        ApiError::from(rejection)
    })?;

    let receipt = state
        .reservation_service
        .reserve_tables(request.num_customers)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id.as_str(), error = %e, "Failed to reserve tables");
            ApiError::from(e)
        })?;

    let remaining_tables = state.table_service.available_tables();
    metrics::reservations_total(receipt.tables_reserved);
    metrics::tables_available(remaining_tables);

    tracing::info!(
        request_id = %request_id.as_str(),
        booking_id = %receipt.reservation_id,
        tables_reserved = receipt.tables_reserved,
        remaining_tables,
        "Tables reserved"
    );

    success(ReservationResponse {
        booking_id: receipt.reservation_id.into_string(),
        tables_reserved: receipt.tables_reserved,
        remaining_tables,
    })
}

/// Cancel a reservation and release its tables.
///
/// # Path Parameters
///
/// - `id`: Booking id returned by [`reserve`]
///
/// # Response
///
/// Returns `200 OK` with:
/// ```json
/// {"code": "SUCCESS", "data": {"freed_tables": 2, "remaining_tables": 10}}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Blank id, pool not initialized, or unknown reservation
/// - `503 Service Unavailable`: Engine stopped or timed out
pub async fn cancel_reservation(
    State(state): State<AppState>,
    request_id: RequestId,
    Path(id): Path<String>,
) -> ApiResult<CancelReservationResponse> {
    let id = id.trim();
    if id.is_empty() {
        tracing::error!(request_id = %request_id.as_str(), "Missing reservation id");
        return Err(ApiError::invalid_request("reservation id is required"));
    }

    let freed_tables = state
        .reservation_service
        .cancel_reservation(id)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id.as_str(), error = %e, "Failed to cancel reservation");
            ApiError::from(e)
        })?;

    let remaining_tables = state.table_service.available_tables();
    metrics::cancellations_total();
    metrics::tables_available(remaining_tables);

    tracing::info!(
        request_id = %request_id.as_str(),
        booking_id = %id,
        freed_tables,
        remaining_tables,
        "Reservation cancelled"
    );

    success(CancelReservationResponse {
        freed_tables,
        remaining_tables,
    })
}
