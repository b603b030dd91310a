//! Table pool trait and the shared availability gauge.

use crate::reservation::{Reservation, ReservationId, ReservationResult};
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

/// Read-only view of the pool's available-table count.
///
/// The pool is the only writer (from inside the engine task). Readers see the
/// value as of the last completed mutation, so a read taken after a reserve or
/// cancel call has returned reflects that call. Reads racing in-flight
/// mutations carry no consistency guarantee and must not drive mutations.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityGauge(Arc<AtomicI64>);

impl AvailabilityGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current available-table count
    pub fn get(&self) -> i64 {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn publish(&self, available: i64) {
        self.0.store(available, Ordering::Release);
    }
}

/// Trait for table pool operations.
///
/// Every mutator is called only from the engine's serial context, never
/// concurrently with itself.
pub trait TableRepository: Send {
    /// Set the total and available counts. Fails with `AlreadyInitialized`
    /// once the pool holds a positive total. No bounds check on `num_tables`.
    fn initialize(&mut self, num_tables: i64) -> ReservationResult<()>;

    /// Record a reservation as active and take its tables.
    ///
    /// Performs no availability check; the engine validates first.
    fn reserve(&mut self, reservation: Reservation) -> ReservationResult<()>;

    /// Release an active reservation's tables, returning the removed record
    fn cancel_reserved(&mut self, reservation_id: &ReservationId)
    -> ReservationResult<Reservation>;

    fn is_initialized(&self) -> bool;

    fn available_tables(&self) -> i64;

    fn total_tables(&self) -> i64;

    /// Sum of tables held by active reservations
    fn reserved_tables(&self) -> i64;

    /// Active reservations, in no particular order
    fn active_reservations(&self) -> Vec<Reservation>;

    /// Gauge for reading availability outside the engine
    fn availability_gauge(&self) -> AvailabilityGauge;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_clones_share_value() {
        let gauge = AvailabilityGauge::new();
        let reader = gauge.clone();
        assert_eq!(reader.get(), 0);

        gauge.publish(7);
        assert_eq!(reader.get(), 7);
    }
}
