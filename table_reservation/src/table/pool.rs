//! Memory-resident table pool.

use super::repository::{AvailabilityGauge, TableRepository};
use crate::reservation::{Reservation, ReservationError, ReservationId, ReservationResult};
use std::collections::HashMap;

/// Table pool holding total/available counts and the active reservations
#[derive(Debug, Default)]
pub struct InMemoryTableRepository {
    /// Total tables; 0 until initialized
    total_tables: i64,

    /// Tables not held by any active reservation
    available_tables: i64,

    /// Reservations currently holding tables
    active: HashMap<ReservationId, Reservation>,

    /// Published copy of `available_tables`
    gauge: AvailabilityGauge,
}

impl InMemoryTableRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_available(&mut self, available: i64) {
        self.available_tables = available;
        self.gauge.publish(available);
    }
}

impl TableRepository for InMemoryTableRepository {
    fn initialize(&mut self, num_tables: i64) -> ReservationResult<()> {
        if self.total_tables > 0 {
            return Err(ReservationError::AlreadyInitialized);
        }

        self.total_tables = num_tables;
        self.set_available(num_tables);
        Ok(())
    }

    fn reserve(&mut self, reservation: Reservation) -> ReservationResult<()> {
        let available = self.available_tables - reservation.num_tables;
        self.active.insert(reservation.id.clone(), reservation);
        self.set_available(available);
        Ok(())
    }

    fn cancel_reserved(
        &mut self,
        reservation_id: &ReservationId,
    ) -> ReservationResult<Reservation> {
        let reservation = self
            .active
            .remove(reservation_id)
            .ok_or_else(|| ReservationError::NotFound(reservation_id.to_string()))?;

        self.set_available(self.available_tables + reservation.num_tables);
        Ok(reservation)
    }

    fn is_initialized(&self) -> bool {
        self.total_tables > 0
    }

    fn available_tables(&self) -> i64 {
        self.available_tables
    }

    fn total_tables(&self) -> i64 {
        self.total_tables
    }

    fn reserved_tables(&self) -> i64 {
        self.active.values().map(|r| r.num_tables).sum()
    }

    fn active_reservations(&self) -> Vec<Reservation> {
        self.active.values().cloned().collect()
    }

    fn availability_gauge(&self) -> AvailabilityGauge {
        self.gauge.clone()
    }
}
