//! Engine request and response types.

use crate::reservation::{Reservation, ReservationError, ReservationId, ReservationResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::sync::oneshot;

/// A request sent to the [`Engine`](super::Engine)
#[derive(Debug)]
pub struct EngineRequest {
    /// Correlation id for tracing; not a reservation id
    pub id: String,

    pub action: EngineAction,
}

impl EngineRequest {
    pub fn new(id: impl Into<String>, action: EngineAction) -> Self {
        Self {
            id: id.into(),
            action,
        }
    }
}

/// Action carried by an [`EngineRequest`], each with its own response slot.
///
/// The engine consumes the sender when it answers, so a request can be
/// answered at most once.
#[derive(Debug)]
pub enum EngineAction {
    /// Set the pool size (once)
    Initialize {
        num_tables: i64,
        response: oneshot::Sender<ReservationResult<()>>,
    },

    /// Take tables for a new reservation
    Reserve {
        num_tables: i64,
        response: oneshot::Sender<ReservationResult<ReservationId>>,
    },

    /// Release a reservation's tables, answering with the freed count
    Cancel {
        reservation_id: ReservationId,
        response: oneshot::Sender<ReservationResult<i64>>,
    },

    /// Consistent read of the whole pool
    Snapshot {
        response: oneshot::Sender<PoolSnapshot>,
    },
}

impl EngineAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            EngineAction::Initialize { .. } => ActionKind::Initialize,
            EngineAction::Reserve { .. } => ActionKind::Reserve,
            EngineAction::Cancel { .. } => ActionKind::Cancel,
            EngineAction::Snapshot { .. } => ActionKind::Snapshot,
        }
    }
}

/// Action names, as they appear in logs and textual requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Initialize,
    Reserve,
    Cancel,
    Snapshot,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Initialize => write!(f, "initialize"),
            ActionKind::Reserve => write!(f, "reserve"),
            ActionKind::Cancel => write!(f, "cancel"),
            ActionKind::Snapshot => write!(f, "snapshot"),
        }
    }
}

impl FromStr for ActionKind {
    type Err = ReservationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "initialize" => Ok(ActionKind::Initialize),
            "reserve" => Ok(ActionKind::Reserve),
            "cancel" => Ok(ActionKind::Cancel),
            "snapshot" => Ok(ActionKind::Snapshot),
            _ => Err(ReservationError::UnknownAction(s.to_string())),
        }
    }
}

/// Point-in-time view of the pool, taken inside the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub total_tables: i64,
    pub available_tables: i64,
    pub reserved_tables: i64,
    pub reservations: Vec<Reservation>,
}

impl PoolSnapshot {
    pub fn is_initialized(&self) -> bool {
        self.total_tables > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_parse() {
        assert_eq!("initialize".parse::<ActionKind>(), Ok(ActionKind::Initialize));
        assert_eq!("Reserve".parse::<ActionKind>(), Ok(ActionKind::Reserve));
        assert_eq!("CANCEL".parse::<ActionKind>(), Ok(ActionKind::Cancel));
        assert_eq!("snapshot".parse::<ActionKind>(), Ok(ActionKind::Snapshot));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let err = "book".parse::<ActionKind>().unwrap_err();
        assert_eq!(err, ReservationError::UnknownAction("book".to_string()));
    }

    #[test]
    fn test_action_kind_display_round_trips() {
        for kind in [
            ActionKind::Initialize,
            ActionKind::Reserve,
            ActionKind::Cancel,
            ActionKind::Snapshot,
        ] {
            assert_eq!(kind.to_string().parse::<ActionKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_request_reports_action_kind() {
        let (tx, _rx) = oneshot::channel();
        let request = EngineRequest::new(
            "req-1",
            EngineAction::Cancel {
                reservation_id: ReservationId::from("res-1"),
                response: tx,
            },
        );
        assert_eq!(request.id, "req-1");
        assert_eq!(request.action.kind(), ActionKind::Cancel);
    }
}
