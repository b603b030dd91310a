//! Reservation ledger: the canonical record of every reservation.

use super::{
    errors::{ReservationError, ReservationResult},
    models::{Reservation, ReservationId},
};
use std::collections::HashMap;

/// Trait for reservation ledger operations.
///
/// Implementations carry no synchronization of their own; the engine owns the
/// ledger exclusively and calls it from a single task.
pub trait ReservationRepository: Send {
    /// Synthesize a new reservation with a fresh id and record it.
    ///
    /// Does not touch the table pool; the engine sequences that separately.
    fn create(&mut self, num_tables: i64) -> Reservation;

    /// Find a reservation by id
    fn find_by_id(&self, id: &ReservationId) -> ReservationResult<Reservation>;

    /// Delete a reservation, returning the removed record
    fn cancel(&mut self, id: &ReservationId) -> ReservationResult<Reservation>;

    /// Re-insert a record removed by [`ReservationRepository::cancel`]
    fn restore(&mut self, reservation: Reservation);

    /// Number of recorded reservations
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime, memory-resident ledger
#[derive(Debug, Default)]
pub struct InMemoryReservationRepository {
    reservations: HashMap<ReservationId, Reservation>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReservationRepository for InMemoryReservationRepository {
    fn create(&mut self, num_tables: i64) -> Reservation {
        let reservation = Reservation::new(num_tables);
        self.reservations
            .insert(reservation.id.clone(), reservation.clone());
        reservation
    }

    fn find_by_id(&self, id: &ReservationId) -> ReservationResult<Reservation> {
        self.reservations
            .get(id)
            .cloned()
            .ok_or_else(|| ReservationError::NotFound(id.to_string()))
    }

    fn cancel(&mut self, id: &ReservationId) -> ReservationResult<Reservation> {
        self.reservations
            .remove(id)
            .ok_or_else(|| ReservationError::NotFound(id.to_string()))
    }

    fn restore(&mut self, reservation: Reservation) {
        self.reservations.insert(reservation.id.clone(), reservation);
    }

    fn len(&self) -> usize {
        self.reservations.len()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_records_reservation() {
        let mut ledger = InMemoryReservationRepository::new();
        let reservation = ledger.create(2);

        assert_eq!(ledger.len(), 1);
        let found = ledger.find_by_id(&reservation.id).unwrap();
        assert_eq!(found, reservation);
    }

    #[test]
    fn test_create_generates_distinct_ids() {
        let mut ledger = InMemoryReservationRepository::new();
        let a = ledger.create(1);
        let b = ledger.create(1);
        assert_ne!(a.id, b.id);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_find_unknown_id_fails() {
        let ledger = InMemoryReservationRepository::new();
        let err = ledger.find_by_id(&ReservationId::from("missing")).unwrap_err();
        assert_eq!(err, ReservationError::NotFound("missing".to_string()));
    }

    #[test]
    fn test_cancel_removes_entry() {
        let mut ledger = InMemoryReservationRepository::new();
        let reservation = ledger.create(3);

        let removed = ledger.cancel(&reservation.id).unwrap();
        assert_eq!(removed.num_tables, 3);
        assert!(ledger.is_empty());

        // Second cancel of the same id fails
        assert!(matches!(
            ledger.cancel(&reservation.id),
            Err(ReservationError::NotFound(_))
        ));
    }

    #[test]
    fn test_restore_reinserts_record() {
        let mut ledger = InMemoryReservationRepository::new();
        let reservation = ledger.create(1);
        let removed = ledger.cancel(&reservation.id).unwrap();

        ledger.restore(removed);
        assert_eq!(ledger.find_by_id(&reservation.id).unwrap(), reservation);
    }
}
