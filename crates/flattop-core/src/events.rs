//! Events emitted by the turn engine for the log and the UI.

use serde::{Deserialize, Serialize};

use crate::aircraft::AircraftType;
use crate::enums::*;
use crate::types::HexCoord;

/// Something that happened during a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    FormationLaunched {
        side: Side,
        base: String,
        number: u8,
        aircraft: u32,
    },
    FormationLanded {
        side: Side,
        base: String,
        number: u8,
        aircraft: u32,
    },
    /// An enemy unit was seen this turn.
    UnitObserved {
        observer_side: Side,
        kind: UnitKind,
        hex: HexCoord,
        condition: ObservationCondition,
    },
    AirCombat {
        hex: HexCoord,
        altitude: Altitude,
        intercepting_side: Side,
        hits_on_escorts: u32,
        hits_on_interceptors: u32,
        hits_on_bombers: u32,
        bomber_stage_fought: bool,
    },
    AntiAircraftFire {
        hex: HexCoord,
        firing_side: Side,
        hits: u32,
    },
    ShipHit {
        side: Side,
        ship: String,
        hits: u32,
        sunk: bool,
    },
    BaseHit {
        side: Side,
        base: String,
        hits: u32,
        aircraft_destroyed: u32,
    },
    /// Stacks that ran out of range and were lost at sea.
    AircraftDitched {
        side: Side,
        aircraft_type: AircraftType,
        count: u32,
    },
    CommandRejected { reason: String },
}
