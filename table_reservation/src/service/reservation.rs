//! Reservation service backed by the engine.

use super::{ReservationService, correlation_id};
use crate::{
    engine::EngineHandle,
    reservation::{
        ReservationError, ReservationId, ReservationReceipt, ReservationResult,
        tables_for_customers,
    },
};
use async_trait::async_trait;

/// Reservation manager: converts party sizes into table counts and forwards
/// reserve/cancel requests to the engine
#[derive(Clone)]
pub struct ReservationManager {
    engine: EngineHandle,
}

impl ReservationManager {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ReservationService for ReservationManager {
    async fn reserve_tables(&self, num_customers: i64) -> ReservationResult<ReservationReceipt> {
        if num_customers <= 0 {
            return Err(ReservationError::InvalidArgument(
                "number of customers must be greater than zero".to_string(),
            ));
        }

        let tables_reserved = tables_for_customers(num_customers);
        let request_id = correlation_id();
        log::debug!(
            "Request {}: reserve {} tables for {} customers",
            request_id,
            tables_reserved,
            num_customers
        );

        let reservation_id = self.engine.reserve(request_id, tables_reserved).await?;

        Ok(ReservationReceipt {
            reservation_id,
            tables_reserved,
        })
    }

    async fn cancel_reservation(&self, reservation_id: &str) -> ReservationResult<i64> {
        let request_id = correlation_id();
        log::debug!("Request {}: cancel reservation {}", request_id, reservation_id);
        self.engine
            .cancel(request_id, ReservationId::from(reservation_id))
            .await
    }
}
