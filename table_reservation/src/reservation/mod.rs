//! Reservation module: the ledger of reservations and the shared error type.
//!
//! This module implements:
//! - Reservation model with collision-resistant ids
//! - Ledger trait and its memory-resident implementation
//! - The error taxonomy shared by every layer of the crate

pub mod errors;
pub mod models;
pub mod repository;

pub use errors::{ReservationError, ReservationResult};
pub use models::{
    Reservation, ReservationId, ReservationReceipt, SEATS_PER_TABLE, tables_for_customers,
};
pub use repository::{InMemoryReservationRepository, ReservationRepository};
