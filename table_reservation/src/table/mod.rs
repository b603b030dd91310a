//! Table pool: total/available table accounting and the active-reservation
//! index.
//!
//! The pool has no concurrency control of its own. It is owned by the
//! [`Engine`](crate::engine::Engine), which applies every mutation from a
//! single task. The only state shared outside the engine is the
//! [`AvailabilityGauge`], a read-only view of the available count.

pub mod pool;
pub mod repository;

pub use pool::InMemoryTableRepository;
pub use repository::{AvailabilityGauge, TableRepository};
