//! Response envelope and error mapping shared by all handlers.
//!
//! Every JSON response has the shape `{"code": <CODE>, "data": <payload>}`.
//! Failures carry the error message as `data`.

use crate::metrics;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use table_reservation::ReservationError;

/// Outcome code carried in the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    Success,
    InvalidRequest,
    ServiceUnavailable,
}

/// JSON response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: ResponseCode,
    pub data: T,
}

/// Error response: a status code plus an envelope carrying the message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: ResponseCode,
    pub message: String,
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Wrap a payload in a `SUCCESS` envelope
pub fn success<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse {
        code: ResponseCode::Success,
        data,
    }))
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: ResponseCode::InvalidRequest,
            message: message.into(),
        }
    }
}

impl From<ReservationError> for ApiError {
    fn from(err: ReservationError) -> Self {
        metrics::reservation_errors_total(err.kind());

        if err.is_business_error() {
            Self::invalid_request(err.to_string())
        } else {
            Self {
                status: StatusCode::SERVICE_UNAVAILABLE,
                code: ResponseCode::ServiceUnavailable,
                message: err.to_string(),
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse {
            code: self.code,
            data: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
