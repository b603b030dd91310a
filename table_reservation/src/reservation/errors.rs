//! Reservation error types.

use std::time::Duration;
use thiserror::Error;

/// Errors produced by the table pool, the reservation ledger, the engine and
/// the client-facing services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// Tables were already initialized
    #[error("tables already initialized")]
    AlreadyInitialized,

    /// Tables have not been initialized yet
    #[error("tables have not been initialized")]
    NotInitialized,

    /// Argument outside the accepted domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Not enough free tables for the request
    #[error("not enough tables available: requested {requested}, available {available}")]
    InsufficientCapacity { requested: i64, available: i64 },

    /// Reservation id is unknown
    #[error("reservation not found: {0}")]
    NotFound(String),

    /// Textual action name does not match any engine action
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// Engine task is gone; the request was never answered
    #[error("reservation engine is not running")]
    EngineStopped,

    /// No response arrived before the deadline
    #[error("reservation engine did not respond within {0:?}")]
    Timeout(Duration),
}

impl ReservationError {
    /// Whether this is a business-rule violation (as opposed to the engine
    /// being unavailable).
    ///
    /// Business errors are terminal for the request and never retried by the
    /// engine. Infrastructure errors say nothing about the request itself.
    pub fn is_business_error(&self) -> bool {
        !matches!(
            self,
            ReservationError::EngineStopped | ReservationError::Timeout(_)
        )
    }

    /// Stable, lowercase name of the error kind, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            ReservationError::AlreadyInitialized => "already_initialized",
            ReservationError::NotInitialized => "not_initialized",
            ReservationError::InvalidArgument(_) => "invalid_argument",
            ReservationError::InsufficientCapacity { .. } => "insufficient_capacity",
            ReservationError::NotFound(_) => "not_found",
            ReservationError::UnknownAction(_) => "unknown_action",
            ReservationError::EngineStopped => "engine_stopped",
            ReservationError::Timeout(_) => "timeout",
        }
    }
}

/// Result type for reservation operations
pub type ReservationResult<T> = Result<T, ReservationError>;
