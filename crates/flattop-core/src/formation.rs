//! Air formations: the counters that carry aircraft across the map.

use serde::{Deserialize, Serialize};

use crate::aircraft::{AircraftGroup, AircraftType};
use crate::constants::AIR_FORMATION_MAX;
use crate::enums::{Altitude, ObservationCondition, Side};
use crate::error::TrackerError;

/// An air formation counter and the aircraft stacks it carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirFormation {
    /// Counter number, 1..=35.
    pub number: u8,
    pub name: String,
    pub side: Side,
    /// Hour of launch on the 24 hour clock.
    pub launch_hour: u8,
    pub altitude: Altitude,
    pub groups: Vec<AircraftGroup>,
    /// Best condition the opponent currently has on this formation.
    #[serde(default)]
    pub observed_condition: ObservationCondition,
}

impl AirFormation {
    pub fn new(number: u8, side: Side) -> Result<Self, TrackerError> {
        if !(1..=AIR_FORMATION_MAX).contains(&number) {
            return Err(TrackerError::FormationNumber(number));
        }
        Ok(Self {
            number,
            name: format!("Air Formation {number}"),
            side,
            launch_hour: 0,
            altitude: Altitude::High,
            groups: Vec::new(),
            observed_condition: ObservationCondition::Unseen,
        })
    }

    /// Counter number in range; used when reading a formation back from a save.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if !(1..=AIR_FORMATION_MAX).contains(&self.number) {
            return Err(TrackerError::FormationNumber(self.number));
        }
        Ok(())
    }

    /// Add a stack. The stack flies at the formation's altitude.
    pub fn add_group(&mut self, mut group: AircraftGroup) {
        group.altitude = self.altitude;
        self.groups.push(group);
    }

    /// Change altitude band for the whole formation.
    pub fn set_altitude(&mut self, altitude: Altitude) {
        self.altitude = altitude;
        for group in &mut self.groups {
            group.altitude = altitude;
        }
    }

    /// Slowest stack sets the pace. Zero when empty.
    pub fn movement_factor(&self) -> u32 {
        self.groups
            .iter()
            .map(|g| g.move_factor)
            .min()
            .unwrap_or(0)
    }

    pub fn total_aircraft(&self) -> u32 {
        self.groups.iter().map(|g| g.count).sum()
    }

    pub fn count_of(&self, aircraft_type: AircraftType) -> u32 {
        self.groups
            .iter()
            .filter(|g| g.aircraft_type == aircraft_type)
            .map(|g| g.count)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_aircraft() == 0
    }

    pub fn reset_for_new_turn(&mut self) {
        for group in &mut self.groups {
            group.range_spent_this_turn = false;
        }
    }

    /// Drop stacks that were shot down or ran out of range. Returns them.
    pub fn remove_spent(&mut self) -> Vec<AircraftGroup> {
        let (spent, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.groups).into_iter().partition(|g| g.is_spent());
        self.groups = kept;
        spent
    }
}
