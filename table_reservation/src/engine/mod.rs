//! Serialization engine: the single writer of the table pool and the
//! reservation ledger.
//!
//! This module implements:
//! - Engine: async actor owning the pool and the ledger exclusively
//! - EngineHandle: cloneable producer side with a per-call deadline
//! - Request envelope with one typed `oneshot` response slot per request
//!
//! ## Architecture
//!
//! The engine runs in its own Tokio task and reads requests from a bounded
//! mpsc inbox, one at a time, in arrival order. Each request is applied to
//! completion before the next one is read, so pool and ledger need no locks.
//! A full inbox makes producers wait; that is the only backpressure.
//!
//! ## Example
//!
//! ```
//! use table_reservation::engine::{Engine, EngineConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (engine, handle) = Engine::in_memory(&EngineConfig::default());
//!     tokio::spawn(engine.run());
//!
//!     handle.initialize("req-1", 10).await.unwrap();
//!     let reservation_id = handle.reserve("req-2", 2).await.unwrap();
//!     assert_eq!(handle.available_tables(), 8);
//!
//!     let freed = handle.cancel("req-3", reservation_id).await.unwrap();
//!     assert_eq!(freed, 2);
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{Engine, EngineHandle, InMemoryEngine};
pub use config::EngineConfig;
pub use messages::{ActionKind, EngineAction, EngineRequest, PoolSnapshot};
