//! Table service backed by the engine.

use super::{TableService, correlation_id};
use crate::{
    engine::{EngineHandle, PoolSnapshot},
    reservation::ReservationResult,
};
use async_trait::async_trait;

/// Table manager forwarding pool operations to the engine
#[derive(Clone)]
pub struct TableManager {
    engine: EngineHandle,
}

impl TableManager {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl TableService for TableManager {
    async fn initialize_tables(&self, num_tables: i64) -> ReservationResult<()> {
        let request_id = correlation_id();
        log::debug!("Request {}: initialize {} tables", request_id, num_tables);
        self.engine.initialize(request_id, num_tables).await
    }

    fn available_tables(&self) -> i64 {
        self.engine.available_tables()
    }

    async fn snapshot(&self) -> ReservationResult<PoolSnapshot> {
        self.engine.snapshot(correlation_id()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        engine::{Engine, EngineConfig},
        reservation::ReservationError,
    };

    fn manager() -> TableManager {
        let (engine, handle) = Engine::in_memory(&EngineConfig::default());
        tokio::spawn(engine.run());
        TableManager::new(handle)
    }

    #[tokio::test]
    async fn test_initialize_tables() {
        let tables = manager();

        tables.initialize_tables(10).await.unwrap();
        assert_eq!(tables.available_tables(), 10);
    }

    #[tokio::test]
    async fn test_initialize_tables_only_once() {
        let tables = manager();

        tables.initialize_tables(10).await.unwrap();
        assert_eq!(
            tables.initialize_tables(20).await,
            Err(ReservationError::AlreadyInitialized)
        );
        assert_eq!(tables.available_tables(), 10);
    }

    #[tokio::test]
    async fn test_snapshot_before_initialize() {
        let tables = manager();

        let snapshot = tables.snapshot().await.unwrap();
        assert_eq!(snapshot.total_tables, 0);
        assert!(snapshot.reservations.is_empty());
    }
}
