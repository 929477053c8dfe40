//! Bases, carrier air groups, and the air operations tracker.
//!
//! A `Base` owns four status boxes (in flight, just landed, readying, ready)
//! and two per-turn budgets. Every status or counter change goes through the
//! methods here: callers never push aircraft between boxes directly.

use serde::{Deserialize, Serialize};

use crate::aircraft::{AircraftGroup, AircraftType};
use crate::enums::{Altitude, AircraftStatus, Armament, ObservationCondition, PlaneHandling, Side};
use crate::error::TrackerError;
use crate::formation::AirFormation;

/// Handling capacity of an airfield or plane-carrying ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirOperationsConfig {
    pub name: String,
    /// Air Factors the facility can hold.
    pub maximum_capacity: u32,
    pub launch_factor_min: u32,
    pub launch_factor_normal: u32,
    pub launch_factor_max: u32,
    /// Air Factors that can be moved through the readying boxes per turn.
    pub ready_factors: u32,
    pub plane_handling: PlaneHandling,
    /// Anti-aircraft factor of the facility itself (airfields only).
    #[serde(default)]
    pub anti_air_factor: u32,
}

impl Default for AirOperationsConfig {
    fn default() -> Self {
        Self {
            name: "Air Operations".to_string(),
            maximum_capacity: 1,
            launch_factor_min: 1,
            launch_factor_normal: 1,
            launch_factor_max: 1,
            ready_factors: 1,
            plane_handling: PlaneHandling::Carrier,
            anti_air_factor: 0,
        }
    }
}

/// The four status boxes of an air operations chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirOperationsTracker {
    in_flight: Vec<AircraftGroup>,
    just_landed: Vec<AircraftGroup>,
    readying: Vec<AircraftGroup>,
    ready: Vec<AircraftGroup>,
}

impl AirOperationsTracker {
    pub fn list(&self, status: AircraftStatus) -> &[AircraftGroup] {
        match status {
            AircraftStatus::InFlight => &self.in_flight,
            AircraftStatus::JustLanded => &self.just_landed,
            AircraftStatus::Readying => &self.readying,
            AircraftStatus::Ready => &self.ready,
        }
    }

    fn list_mut(&mut self, status: AircraftStatus) -> &mut Vec<AircraftGroup> {
        match status {
            AircraftStatus::InFlight => &mut self.in_flight,
            AircraftStatus::JustLanded => &mut self.just_landed,
            AircraftStatus::Readying => &mut self.readying,
            AircraftStatus::Ready => &mut self.ready,
        }
    }

    /// Air Factors across all four boxes.
    pub fn total_aircraft_count(&self) -> u32 {
        AircraftStatus::ALL
            .iter()
            .flat_map(|&s| self.list(s))
            .map(|g| g.count)
            .sum()
    }

    pub fn count_of(&self, status: AircraftStatus, aircraft_type: AircraftType) -> u32 {
        self.list(status)
            .iter()
            .filter(|g| g.aircraft_type == aircraft_type)
            .map(|g| g.count)
            .sum()
    }

    /// Air Factors of one type across all four boxes.
    pub fn type_total(&self, aircraft_type: AircraftType) -> u32 {
        AircraftStatus::ALL
            .iter()
            .map(|&s| self.count_of(s, aircraft_type))
            .sum()
    }

    /// Merge a stack into a box, adding to an existing stack of the same type
    /// and ordnance. Armed and unarmed aircraft never share a stack.
    fn merge(&mut self, status: AircraftStatus, group: AircraftGroup) {
        if group.count == 0 {
            return;
        }
        let list = self.list_mut(status);
        match list
            .iter_mut()
            .find(|g| g.aircraft_type == group.aircraft_type && g.armament == group.armament)
        {
            Some(existing) => {
                existing.count += group.count;
                existing.range_remaining = existing.range_remaining.min(group.range_remaining);
            }
            None => list.push(group),
        }
    }

    /// Split up to `count` Air Factors of a type out of a box, drawing on its
    /// stacks in order.
    fn take(
        &mut self,
        status: AircraftStatus,
        aircraft_type: AircraftType,
        count: u32,
    ) -> Vec<AircraftGroup> {
        let list = self.list_mut(status);
        let mut remaining = count;
        let mut taken = Vec::new();
        for group in list.iter_mut().filter(|g| g.aircraft_type == aircraft_type) {
            if remaining == 0 {
                break;
            }
            let part = group.split_off(remaining);
            remaining -= part.count;
            if part.count > 0 {
                taken.push(part);
            }
        }
        list.retain(|g| g.count > 0);
        taken
    }

    /// Every box holds at most one stack per type and ordnance, none empty.
    fn validate(&self) -> Result<(), TrackerError> {
        for status in AircraftStatus::ALL {
            let list = self.list(status);
            for (idx, group) in list.iter().enumerate() {
                if group.count == 0 {
                    return Err(TrackerError::EmptyStack {
                        status,
                        aircraft_type: group.aircraft_type,
                    });
                }
                let duplicate = list[..idx].iter().any(|g| {
                    g.aircraft_type == group.aircraft_type && g.armament == group.armament
                });
                if duplicate {
                    return Err(TrackerError::DuplicateStack {
                        status,
                        aircraft_type: group.aircraft_type,
                    });
                }
            }
        }
        Ok(())
    }
}

/// An airfield, or the flight deck of a plane-carrying ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base {
    pub name: String,
    pub side: Side,
    pub config: AirOperationsConfig,
    tracker: AirOperationsTracker,
    used_ready_factor: u32,
    used_launch_factor: u32,
    /// Hits taken. Each point reduces the launch caps by one.
    pub damage: u32,
    /// Set when the base is bombed; cleared at the start of each turn.
    #[serde(default)]
    pub attacked_this_turn: bool,
    #[serde(default)]
    pub radar: bool,
    #[serde(default)]
    pub observed_condition: ObservationCondition,
}

impl Base {
    pub fn new(name: impl Into<String>, side: Side, config: AirOperationsConfig) -> Self {
        Self {
            name: name.into(),
            side,
            config,
            tracker: AirOperationsTracker::default(),
            used_ready_factor: 0,
            used_launch_factor: 0,
            damage: 0,
            attacked_this_turn: false,
            radar: false,
            observed_condition: ObservationCondition::Unseen,
        }
    }

    pub fn with_radar(mut self) -> Self {
        self.radar = true;
        self
    }

    pub fn tracker(&self) -> &AirOperationsTracker {
        &self.tracker
    }

    pub fn used_ready_factor(&self) -> u32 {
        self.used_ready_factor
    }

    pub fn used_launch_factor(&self) -> u32 {
        self.used_launch_factor
    }

    pub fn available_ready_factor(&self) -> u32 {
        self.config.ready_factors
    }

    pub fn available_launch_factor_min(&self) -> u32 {
        self.config.launch_factor_min.saturating_sub(self.damage)
    }

    pub fn available_launch_factor_normal(&self) -> u32 {
        self.config.launch_factor_normal.saturating_sub(self.damage)
    }

    /// Launch cap after damage.
    pub fn available_launch_factor_max(&self) -> u32 {
        self.config.launch_factor_max.saturating_sub(self.damage)
    }

    pub fn remaining_ready_factor(&self) -> u32 {
        self.available_ready_factor()
            .saturating_sub(self.used_ready_factor)
    }

    pub fn remaining_launch_factor(&self) -> u32 {
        self.available_launch_factor_max()
            .saturating_sub(self.used_launch_factor)
    }

    /// Place aircraft directly into a box during scenario setup.
    pub fn station(&mut self, status: AircraftStatus, group: AircraftGroup) {
        self.tracker.merge(status, group);
    }

    /// Move up to `requested` Air Factors of a type from one box to the next.
    ///
    /// Returns the number actually moved. Moves that would exceed the ready
    /// or launch budget move only what fits; once the budget is spent the
    /// call moves nothing and returns 0.
    pub fn transition(
        &mut self,
        aircraft_type: AircraftType,
        from: AircraftStatus,
        to: AircraftStatus,
        requested: u32,
    ) -> Result<u32, TrackerError> {
        use AircraftStatus::*;

        let headroom = match (from, to) {
            (JustLanded, Readying) | (Readying, Ready) => self.remaining_ready_factor(),
            (Ready, InFlight) => self.remaining_launch_factor(),
            (InFlight, JustLanded) => u32::MAX,
            _ => return Err(TrackerError::InvalidTransition { from, to }),
        };

        let available = self.tracker.count_of(from, aircraft_type);
        let moved = requested.min(available).min(headroom);
        if moved < requested {
            tracing::debug!(
                base = %self.name,
                %aircraft_type,
                ?from,
                ?to,
                requested,
                available,
                headroom,
                moved,
                "partial transition"
            );
        }
        if moved == 0 {
            return Ok(0);
        }

        for mut group in self.tracker.take(from, aircraft_type, moved) {
            match to {
                Ready => group.refuel(),
                JustLanded => group.disarm(),
                _ => {}
            }
            self.tracker.merge(to, group);
        }

        match (from, to) {
            (JustLanded, Readying) | (Readying, Ready) => self.used_ready_factor += moved,
            (Ready, InFlight) => self.used_launch_factor += moved,
            _ => {}
        }
        Ok(moved)
    }

    /// Load (or unload) ordnance on every ready stack of a type.
    ///
    /// Returns false when no aircraft of the type are ready.
    pub fn arm(&mut self, aircraft_type: AircraftType, armament: Option<Armament>) -> bool {
        let stacks = self.tracker.take(AircraftStatus::Ready, aircraft_type, u32::MAX);
        if stacks.is_empty() {
            return false;
        }
        for mut group in stacks {
            group.armament = armament;
            group.attack_type = None;
            self.tracker.merge(AircraftStatus::Ready, group);
        }
        true
    }

    /// Form everything in flight from this base into a new air formation.
    pub fn create_air_formation(
        &mut self,
        number: u8,
        altitude: Altitude,
        launch_hour: u8,
    ) -> Result<AirFormation, TrackerError> {
        let mut formation = AirFormation::new(number, self.side)?;
        if self.tracker.in_flight.is_empty() {
            return Err(TrackerError::NothingInFlight);
        }
        formation.name = format!("{} Air Formation {number}", self.name);
        formation.launch_hour = launch_hour;
        formation.altitude = altitude;
        for group in std::mem::take(&mut self.tracker.in_flight) {
            formation.add_group(group);
        }
        tracing::info!(
            base = %self.name,
            formation = number,
            aircraft = formation.total_aircraft(),
            "air formation launched"
        );
        Ok(formation)
    }

    /// Launch the requested stacks from the ready box as one formation.
    ///
    /// Each request is cut back to the remaining launch budget in order.
    pub fn launch(
        &mut self,
        number: u8,
        requests: &[(AircraftType, u32)],
        altitude: Altitude,
        launch_hour: u8,
    ) -> Result<AirFormation, TrackerError> {
        if !(1..=crate::constants::AIR_FORMATION_MAX).contains(&number) {
            return Err(TrackerError::FormationNumber(number));
        }
        for &(aircraft_type, count) in requests {
            self.transition(
                aircraft_type,
                AircraftStatus::Ready,
                AircraftStatus::InFlight,
                count,
            )?;
        }
        self.create_air_formation(number, altitude, launch_hour)
    }

    /// Recover a formation: every surviving stack enters the just-landed box
    /// with its ordnance cleared. Landing is uncapped and spends no budget.
    pub fn recover(&mut self, formation: AirFormation) -> u32 {
        let mut landed = 0;
        for mut group in formation.groups.into_iter().filter(|g| g.count > 0) {
            group.disarm();
            landed += group.count;
            self.tracker.merge(AircraftStatus::JustLanded, group);
        }
        landed
    }

    /// Bomb damage: raise base damage and destroy aircraft caught in the ready box.
    ///
    /// Returns the aircraft destroyed, by type.
    pub fn take_hits(&mut self, hits: u32) -> Vec<(AircraftType, u32)> {
        self.damage += hits;
        self.attacked_this_turn = true;
        self.destroy_ready(hits)
    }

    /// Destroy up to `hits` Air Factors from the ready box, first stack first.
    pub fn destroy_ready(&mut self, hits: u32) -> Vec<(AircraftType, u32)> {
        let mut remaining = hits;
        let mut destroyed = Vec::new();
        for group in &mut self.tracker.ready {
            if remaining == 0 {
                break;
            }
            let lost = group.apply_hits(remaining);
            remaining -= lost;
            if lost > 0 {
                destroyed.push((group.aircraft_type, lost));
            }
        }
        self.tracker.ready.retain(|g| g.count > 0);
        destroyed
    }

    /// Destroy every aircraft aboard (the carrier went down).
    pub fn lose_all_aircraft(&mut self) -> u32 {
        let lost = self.tracker.total_aircraft_count();
        self.tracker = AirOperationsTracker::default();
        lost
    }

    /// Check a base read back from a save: budgets within their caps and
    /// well-formed status boxes.
    ///
    /// The launch budget is held to the undamaged maximum, since damage taken
    /// after a launch may legitimately drop the current cap below what was
    /// already used.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.used_ready_factor > self.config.ready_factors {
            return Err(TrackerError::BudgetOverspent {
                budget: "ready",
                used: self.used_ready_factor,
                cap: self.config.ready_factors,
            });
        }
        if self.used_launch_factor > self.config.launch_factor_max {
            return Err(TrackerError::BudgetOverspent {
                budget: "launch",
                used: self.used_launch_factor,
                cap: self.config.launch_factor_max,
            });
        }
        self.tracker.validate()
    }

    /// Start-of-turn reset. Safe to call more than once per turn.
    pub fn reset_for_new_turn(&mut self) {
        self.used_ready_factor = 0;
        self.used_launch_factor = 0;
        self.attacked_this_turn = false;
    }
}
