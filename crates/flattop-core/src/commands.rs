//! Player orders sent to the turn engine.
//!
//! Orders are queued and processed at the start of the next turn, before
//! observation and combat.

use serde::{Deserialize, Serialize};

use crate::aircraft::AircraftType;
use crate::enums::*;
use crate::types::HexCoord;

/// All possible player orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Air operations ---
    /// Move aircraft between two boxes of a base's operations chart.
    TransitionAircraft {
        side: Side,
        base: String,
        aircraft_type: AircraftType,
        from: AircraftStatus,
        to: AircraftStatus,
        count: u32,
    },
    /// Load or unload ordnance on a ready stack.
    ArmAircraft {
        side: Side,
        base: String,
        aircraft_type: AircraftType,
        armament: Option<Armament>,
    },
    /// Launch ready aircraft as a new air formation over the base.
    LaunchFormation {
        side: Side,
        base: String,
        number: u8,
        aircraft: Vec<(AircraftType, u32)>,
        altitude: Altitude,
    },
    /// Land a formation at a friendly base in the same hex.
    LandFormation { side: Side, number: u8, base: String },

    // --- Movement ---
    /// Move an air formation, at most its movement factor in hexes.
    MoveFormation { side: Side, number: u8, to: HexCoord },
    /// Change a formation's altitude band.
    SetAltitude {
        side: Side,
        number: u8,
        altitude: Altitude,
    },
    /// Move a task force, at most its movement factor in hexes.
    MoveTaskForce { side: Side, number: u8, to: HexCoord },

    // --- Combat ---
    /// Interception orders for one hex and altitude this turn.
    PlanInterception {
        side: Side,
        hex: HexCoord,
        altitude: Altitude,
        /// Formations whose interceptors go straight for the bombers.
        bomber_targeting: Vec<u8>,
        /// Join the bomber attack after winning the escort fight 2:1.
        merge_on_advantage: bool,
        /// Fight without expending a range factor (at -6).
        decline_range: bool,
    },
    /// Bomb or torpedo a ship in a task force sharing the formation's hex.
    AttackShip {
        side: Side,
        formation: u8,
        task_force: u8,
        ship: String,
        attack_type: AttackType,
    },
    /// Bomb an enemy base sharing the formation's hex.
    AttackBase {
        side: Side,
        formation: u8,
        base: String,
        attack_type: AttackType,
    },
}
