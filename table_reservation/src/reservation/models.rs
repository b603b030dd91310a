//! Reservation data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seats at a single table
pub const SEATS_PER_TABLE: i64 = 4;

/// Unique reservation identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(String);

impl ReservationId {
    /// Generate a fresh, collision-resistant id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for ReservationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ReservationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A claim on a number of tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub num_tables: i64,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Create a reservation with a freshly generated id
    pub fn new(num_tables: i64) -> Self {
        Self {
            id: ReservationId::generate(),
            num_tables,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a successful reserve call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationReceipt {
    pub reservation_id: ReservationId,
    pub tables_reserved: i64,
}

/// Tables needed to seat a party, rounding up to whole tables.
///
/// Callers must reject `num_customers <= 0` first.
pub fn tables_for_customers(num_customers: i64) -> i64 {
    (num_customers - 1) / SEATS_PER_TABLE + 1
}
