//! Client-facing services.
//!
//! The services are the only producers of engine requests. Each call builds a
//! request with a fresh correlation id, waits for the engine's single answer
//! and turns it into a typed value or a [`ReservationError`].
//!
//! Outer layers such as the HTTP handlers depend on the traits, not on the
//! managers.

pub mod reservation;
pub mod table;

pub use reservation::ReservationManager;
pub use table::TableManager;

use crate::{
    engine::PoolSnapshot,
    reservation::{ReservationReceipt, ReservationResult},
};
use async_trait::async_trait;
use uuid::Uuid;

/// Table pool operations
#[async_trait]
pub trait TableService: Send + Sync {
    /// Initialize the pool. Succeeds once; later calls fail with
    /// `AlreadyInitialized`.
    async fn initialize_tables(&self, num_tables: i64) -> ReservationResult<()>;

    /// Available tables as of the last completed reserve or cancel
    fn available_tables(&self) -> i64;

    /// Consistent view of the whole pool
    async fn snapshot(&self) -> ReservationResult<PoolSnapshot>;
}

/// Reservation operations
#[async_trait]
pub trait ReservationService: Send + Sync {
    /// Reserve enough tables to seat `num_customers`
    async fn reserve_tables(&self, num_customers: i64) -> ReservationResult<ReservationReceipt>;

    /// Cancel a reservation, returning the number of tables freed
    async fn cancel_reservation(&self, reservation_id: &str) -> ReservationResult<i64>;
}

/// Fresh correlation id for an engine request
pub(crate) fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}
