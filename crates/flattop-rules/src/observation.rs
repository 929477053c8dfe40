//! Fog of war: observation condition numbers and what they reveal.
//!
//! Each direction of an observer/target pair is resolved separately. The
//! result is a condition number 0..=3; reporting then decides what the
//! observing player is told about the target.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flattop_core::aircraft::AircraftType;
use flattop_core::base::Base;
use flattop_core::constants::{
    OBSERVATION_MAX_DISTANCE, RADAR_MAX_DISTANCE, SEARCH_SUCCESS_MAX,
};
use flattop_core::enums::{
    Altitude, AircraftStatus, ObservationCondition, ShipType, TimeOfDay, UnitKind, Weather,
};
use flattop_core::formation::AirFormation;
use flattop_core::naval::TaskForce;

use crate::crt::roll_die;

/// What the resolver needs to know about one side of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitProfile {
    pub kind: UnitKind,
    pub radar: bool,
    /// Only meaningful for air formations.
    pub altitude: Option<Altitude>,
}

impl UnitProfile {
    pub fn base(radar: bool) -> Self {
        Self {
            kind: UnitKind::Base,
            radar,
            altitude: None,
        }
    }

    pub fn task_force(radar: bool) -> Self {
        Self {
            kind: UnitKind::TaskForce,
            radar,
            altitude: None,
        }
    }

    pub fn air_formation(altitude: Altitude) -> Self {
        Self {
            kind: UnitKind::AirFormation,
            radar: false,
            altitude: Some(altitude),
        }
    }

    fn is_high_air(&self) -> bool {
        self.kind == UnitKind::AirFormation && self.altitude == Some(Altitude::High)
    }
}

/// Environment of one observation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationConditions {
    /// Weather in the observer's hex. Drives the search roll.
    pub observer_weather: Weather,
    /// Weather in the observed hex. Selects the table row.
    pub target_weather: Weather,
    /// Hexes between the two; 0 is the same hex.
    pub distance: u32,
    pub time_of_day: TimeOfDay,
}

/// Observer, target and the condition reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationFact {
    pub observer: UnitProfile,
    pub target: UnitProfile,
    pub condition: ObservationCondition,
}

// Condition numbers by distance 0..=3. Zero is a blank cell.
const CLEAR_DAY: [u8; 4] = [3, 2, 1, 0];
const CLOUD_DAY_AIR: [u8; 4] = [2, 1, 0, 0];
const ADJACENT_ONLY: [u8; 4] = [1, 0, 0, 0];
const BLANK: [u8; 4] = [0, 0, 0, 0];

fn table_row(observer: UnitKind, target: UnitKind, cloud: bool, night: bool) -> [u8; 4] {
    use UnitKind as K;
    match (night, observer, target, cloud) {
        // Bases are always on the board; nobody searches for them.
        (_, _, K::Base, _) => BLANK,

        (false, K::Base | K::TaskForce, K::AirFormation, false) => CLEAR_DAY,
        (false, K::Base | K::TaskForce, K::AirFormation, true) => CLOUD_DAY_AIR,
        (false, K::Base | K::TaskForce, K::TaskForce, _) => CLEAR_DAY,
        (false, K::AirFormation, _, false) => CLEAR_DAY,
        (false, K::AirFormation, _, true) => CLOUD_DAY_AIR,

        (true, K::Base | K::TaskForce, K::AirFormation, false) => ADJACENT_ONLY,
        (true, K::Base | K::TaskForce, K::AirFormation, true) => BLANK,
        (true, K::Base | K::TaskForce, K::TaskForce, _) => ADJACENT_ONLY,
        (true, K::AirFormation, K::AirFormation, false) => [2, 0, 0, 0],
        (true, K::AirFormation, K::AirFormation, true) => ADJACENT_ONLY,
        (true, K::AirFormation, K::TaskForce, false) => ADJACENT_ONLY,
        (true, K::AirFormation, K::TaskForce, true) => BLANK,
    }
}

/// Non-radar condition from the observation tables.
pub fn table_condition(
    observer: UnitKind,
    target: UnitKind,
    weather: Weather,
    time_of_day: TimeOfDay,
    distance: u32,
) -> ObservationCondition {
    if weather == Weather::Storm || distance > OBSERVATION_MAX_DISTANCE {
        return ObservationCondition::Unseen;
    }
    let row = table_row(observer, target, weather.is_cloud(), time_of_day.is_night());
    let number = row.get(distance as usize).copied().unwrap_or(0);
    ObservationCondition::try_from(number).unwrap_or_default()
}

/// Flat radar condition: high-altitude aircraft seen by a radar base or task force.
pub fn radar_condition(
    observer: &UnitProfile,
    target: &UnitProfile,
    distance: u32,
) -> ObservationCondition {
    let radar_observer =
        observer.radar && matches!(observer.kind, UnitKind::Base | UnitKind::TaskForce);
    if radar_observer && target.is_high_air() && distance <= RADAR_MAX_DISTANCE {
        ObservationCondition::Presence
    } else {
        ObservationCondition::Unseen
    }
}

/// Search Table: 1d6, +1 in cloud, +1 at night; success on 5 or less.
pub fn search_roll(cloud: bool, night: bool, rng: &mut ChaCha8Rng) -> bool {
    let die = roll_die(rng);
    let total = die + u8::from(cloud) + u8::from(night);
    let success = total <= SEARCH_SUCCESS_MAX;
    tracing::debug!(die, cloud, night, success, "search roll");
    success
}

/// One direction of observation.
///
/// Air formation observers consume one die for the search roll; base and
/// task force observers consume none.
pub fn attempt_observation(
    observer: &UnitProfile,
    target: &UnitProfile,
    conditions: &ObservationConditions,
    rng: &mut ChaCha8Rng,
) -> ObservationCondition {
    if conditions.observer_weather == Weather::Storm || conditions.target_weather == Weather::Storm
    {
        return ObservationCondition::Unseen;
    }
    if observer.kind == UnitKind::AirFormation
        && !search_roll(
            conditions.observer_weather.is_cloud(),
            conditions.time_of_day.is_night(),
            rng,
        )
    {
        return ObservationCondition::Unseen;
    }
    let table = table_condition(
        observer.kind,
        target.kind,
        conditions.target_weather,
        conditions.time_of_day,
        conditions.distance,
    );
    let radar = radar_condition(observer, target, conditions.distance);
    table.max(radar)
}

/// Resolve one direction and package it.
pub fn observe(
    observer: UnitProfile,
    target: UnitProfile,
    conditions: &ObservationConditions,
    rng: &mut ChaCha8Rng,
) -> ObservationFact {
    let condition = attempt_observation(&observer, &target, conditions, rng);
    ObservationFact {
        observer,
        target,
        condition,
    }
}

// ---------------------------------------------------------------------------
// Reporting
// ---------------------------------------------------------------------------

/// Coarse classes told to the opponent at condition 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObservedClass {
    Carriers,
    CapitalShips,
    SmallShips,
    /// Armed planes.
    Bombers,
    /// Unarmed planes.
    Interceptors,
}

impl ObservedClass {
    pub fn of_ship(ship_type: ShipType) -> Self {
        if ship_type.is_carrier() {
            ObservedClass::Carriers
        } else if ship_type.is_capital() {
            ObservedClass::CapitalShips
        } else {
            ObservedClass::SmallShips
        }
    }
}

/// A unit as seen by the opponent.
#[derive(Debug, Clone, Copy)]
pub enum ObservedUnit<'a> {
    AirFormation(&'a AirFormation),
    TaskForce(&'a TaskForce),
    Base(&'a Base),
}

impl ObservedUnit<'_> {
    pub fn kind(&self) -> UnitKind {
        match self {
            ObservedUnit::AirFormation(_) => UnitKind::AirFormation,
            ObservedUnit::TaskForce(_) => UnitKind::TaskForce,
            ObservedUnit::Base(_) => UnitKind::Base,
        }
    }

    pub fn profile(&self) -> UnitProfile {
        match self {
            ObservedUnit::AirFormation(f) => UnitProfile::air_formation(f.altitude),
            ObservedUnit::TaskForce(tf) => UnitProfile::task_force(tf.radar),
            ObservedUnit::Base(b) => UnitProfile::base(b.radar),
        }
    }
}

/// What the observing player is told. Unit and ship names never appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "condition")]
pub enum ObservationReport {
    Unseen,
    Presence {
        kind: UnitKind,
    },
    Aggregate {
        kind: UnitKind,
        classes: Vec<ObservedClass>,
        /// Total ships or Air Factors, inflated or deflated by up to half.
        reported_total: u32,
    },
    Exact {
        kind: UnitKind,
        ships: Vec<(ShipType, u32)>,
        aircraft: Vec<(AircraftType, u32)>,
        /// Planes on deck or on the field: just landed and ready boxes only.
        aircraft_in_boxes: Vec<(AircraftType, u32)>,
    },
}

fn add_count<K: PartialEq>(list: &mut Vec<(K, u32)>, key: K, count: u32) {
    if count == 0 {
        return;
    }
    match list.iter_mut().find(|(k, _)| *k == key) {
        Some((_, total)) => *total += count,
        None => list.push((key, count)),
    }
}

fn boxed_aircraft(base: &Base, into: &mut Vec<(AircraftType, u32)>) {
    for status in [AircraftStatus::JustLanded, AircraftStatus::Ready] {
        for group in base.tracker().list(status) {
            add_count(into, group.aircraft_type, group.count);
        }
    }
}

fn aggregate(unit: &ObservedUnit<'_>) -> (Vec<ObservedClass>, u32) {
    let mut classes = Vec::new();
    let total = match unit {
        ObservedUnit::AirFormation(f) => {
            for group in f.groups.iter().filter(|g| g.count > 0) {
                classes.push(if group.is_armed() {
                    ObservedClass::Bombers
                } else {
                    ObservedClass::Interceptors
                });
            }
            f.total_aircraft()
        }
        ObservedUnit::TaskForce(tf) => {
            for ship in tf.afloat() {
                classes.push(ObservedClass::of_ship(ship.ship_type));
            }
            tf.afloat().count() as u32
        }
        ObservedUnit::Base(_) => 0,
    };
    classes.sort();
    classes.dedup();
    (classes, total)
}

/// Build the report for a condition. Condition 2 totals are fudged.
pub fn report(
    unit: &ObservedUnit<'_>,
    condition: ObservationCondition,
    rng: &mut ChaCha8Rng,
) -> ObservationReport {
    let kind = unit.kind();
    match condition {
        ObservationCondition::Unseen => ObservationReport::Unseen,
        ObservationCondition::Presence => ObservationReport::Presence { kind },
        ObservationCondition::Aggregate => {
            let (classes, total) = aggregate(unit);
            let percent: u32 = rng.gen_range(50..=150);
            let reported_total = (total * percent / 100).max(u32::from(total > 0));
            ObservationReport::Aggregate {
                kind,
                classes,
                reported_total,
            }
        }
        ObservationCondition::Exact => {
            let mut ships = Vec::new();
            let mut aircraft = Vec::new();
            let mut aircraft_in_boxes = Vec::new();
            match unit {
                ObservedUnit::AirFormation(f) => {
                    for group in &f.groups {
                        add_count(&mut aircraft, group.aircraft_type, group.count);
                    }
                }
                ObservedUnit::TaskForce(tf) => {
                    for ship in tf.afloat() {
                        add_count(&mut ships, ship.ship_type, 1);
                    }
                    for base in tf.bases() {
                        boxed_aircraft(base, &mut aircraft_in_boxes);
                    }
                }
                ObservedUnit::Base(base) => boxed_aircraft(base, &mut aircraft_in_boxes),
            }
            ObservationReport::Exact {
                kind,
                ships,
                aircraft,
                aircraft_in_boxes,
            }
        }
    }
}
