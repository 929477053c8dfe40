//! Errors raised by entity mutations.

use thiserror::Error;

use crate::aircraft::AircraftType;
use crate::enums::{AircraftStatus, Side};

/// A task force mutation that would break the organisation rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("{side:?} task force cannot have more than {max} ships")]
    TaskForceFull { side: Side, max: usize },

    #[error("plane-carrying ships must be placed in task forces 1-9 (got {number})")]
    PlaneCarrierOutsideBoxes { number: u8 },

    #[error("a task force can only have one carrier (CV or CVL)")]
    SecondCarrier,

    #[error("a task force can only have one AV or CAV")]
    SecondTender,

    #[error("ship already in task force: {0}")]
    DuplicateShip(String),

    #[error("ship not in task force: {0}")]
    ShipNotFound(String),

    #[error("only Japanese battleships carry air factors")]
    NotJapaneseBattleship,
}

/// A malformed request to an air operations tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: AircraftStatus,
        to: AircraftStatus,
    },

    #[error("air formation number must be between 1 and 35 (got {0})")]
    FormationNumber(u8),

    #[error("nothing in flight to form an air formation")]
    NothingInFlight,

    #[error("{budget} factors overspent: {used} used of {cap}")]
    BudgetOverspent {
        budget: &'static str,
        used: u32,
        cap: u32,
    },

    #[error("{aircraft_type} listed twice in the {status:?} box")]
    DuplicateStack {
        status: AircraftStatus,
        aircraft_type: AircraftType,
    },

    #[error("empty {aircraft_type} stack in the {status:?} box")]
    EmptyStack {
        status: AircraftStatus,
        aircraft_type: AircraftType,
    },
}
