//! Errors surfaced by the turn engine, config loading and persistence.

use thiserror::Error;

use flattop_core::aircraft::AircraftType;
use flattop_core::error::{CompositionError, TrackerError};
use flattop_core::enums::Side;
use flattop_core::types::HexCoord;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{side:?} has no base named {name}")]
    UnknownBase { side: Side, name: String },

    #[error("{side:?} has no air formation {number}")]
    UnknownFormation { side: Side, number: u8 },

    #[error("{side:?} has no task force {number}")]
    UnknownTaskForce { side: Side, number: u8 },

    #[error("{side:?} air formation {number} is already in the air")]
    FormationInUse { side: Side, number: u8 },

    #[error("{ship} is not in {side:?} task force {task_force}")]
    UnknownShip {
        side: Side,
        task_force: u8,
        ship: String,
    },

    #[error("move of {distance} hexes exceeds the {movement} hexes of movement left")]
    OutOfReach { distance: u32, movement: u32 },

    #[error("hex ({}, {}) is off the mapboard", .0.q(), .0.r())]
    OffBoard(HexCoord),

    #[error("{what} is not in the same hex")]
    NotInHex { what: String },

    #[error("no ready {aircraft_type} at {base}")]
    NothingToArm {
        base: String,
        aircraft_type: AircraftType,
    },

    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
