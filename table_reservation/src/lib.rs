//! # Table Reservation
//!
//! Books a fixed pool of tables against competing requests without
//! double-allocation.
//!
//! All mutation of shared state goes through a single-writer serialization
//! engine: an async actor that owns the table pool and the reservation ledger
//! exclusively and applies requests one at a time, in arrival order. Callers
//! never touch the state directly; they send a request and wait for exactly
//! one typed response.
//!
//! ## Architecture
//!
//! - **Table pool**: total/available counts and the active-reservation index
//! - **Reservation ledger**: the canonical record of reservations
//! - **Engine**: the only task allowed to mutate pool and ledger
//! - **Services**: table and reservation façades, the only request producers
//!
//! ## Core Modules
//!
//! - [`table`]: Table pool trait, in-memory pool and availability gauge
//! - [`reservation`]: Reservation model, ledger and error types
//! - [`engine`]: Serialization engine, request protocol and configuration
//! - [`service`]: Client-facing table and reservation services
//!
//! ## Example
//!
//! ```
//! use table_reservation::{
//!     engine::{Engine, EngineConfig},
//!     service::{ReservationManager, ReservationService, TableManager, TableService},
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let (engine, handle) = Engine::in_memory(&EngineConfig::default());
//!     tokio::spawn(engine.run());
//!
//!     let tables = TableManager::new(handle.clone());
//!     let reservations = ReservationManager::new(handle);
//!
//!     tables.initialize_tables(10).await.unwrap();
//!     let receipt = reservations.reserve_tables(5).await.unwrap();
//!     assert_eq!(receipt.tables_reserved, 2);
//!     assert_eq!(tables.available_tables(), 8);
//! }
//! ```

pub mod engine;
pub mod reservation;
pub mod service;
pub mod table;

pub use engine::{Engine, EngineConfig, EngineHandle, PoolSnapshot};
pub use reservation::{
    Reservation, ReservationError, ReservationId, ReservationReceipt, ReservationResult,
};
pub use service::{ReservationManager, ReservationService, TableManager, TableService};
