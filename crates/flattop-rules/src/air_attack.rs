//! Bombing and torpedo attacks on ships and bases.
//!
//! Each stack attacks separately with its own die. No planes are lost here;
//! attacking stacks drop their ordnance and, except for high-level bombers,
//! burn a range factor.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flattop_core::aircraft::{AircraftGroup, AircraftType};
use flattop_core::base::Base;
use flattop_core::constants::{ANCHORED_BONUS, CLOUD_PENALTY, CRIPPLED_BONUS, NIGHT_PENALTY};
use flattop_core::enums::{Altitude, AttackTarget, AttackType, ShipStatus};
use flattop_core::formation::AirFormation;
use flattop_core::naval::Ship;

use crate::air_combat::CombatModifiers;
use crate::crt::{self, CombatRoll};

/// Rated BHT for the attack, or `None` if the stack cannot fly it.
pub fn bombing_rating(
    group: &AircraftGroup,
    attack: AttackType,
    target: AttackTarget,
) -> Option<u8> {
    let armament = group.armament?;
    let rating = group
        .combat_data()
        .bombing(attack, group.altitude, target, armament);
    (rating > 0).then_some(rating)
}

/// Basic Hit Table before clamping.
pub fn air_attack_bht(
    rating: u8,
    ship_status: Option<ShipStatus>,
    modifiers: CombatModifiers,
) -> i32 {
    let mut bht = i32::from(rating);
    if modifiers.cloud {
        bht -= CLOUD_PENALTY;
    }
    if modifiers.night {
        bht -= NIGHT_PENALTY;
    }
    match ship_status {
        Some(ShipStatus::Crippled) => bht += CRIPPLED_BONUS,
        Some(ShipStatus::Anchored) => bht += ANCHORED_BONUS,
        _ => {}
    }
    bht
}

/// One stack's attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRoll {
    pub aircraft_type: AircraftType,
    pub roll: CombatRoll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipAttackResult {
    pub ship: String,
    pub hits: u32,
    pub sunk: bool,
    pub rolls: Vec<AttackRoll>,
    /// Aircraft destroyed aboard a hit carrier.
    pub aircraft_destroyed: Vec<(AircraftType, u32)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAttackResult {
    pub base: String,
    pub hits: u32,
    pub rolls: Vec<AttackRoll>,
    pub aircraft_destroyed: Vec<(AircraftType, u32)>,
}

/// After an attack the stack is empty-handed; low and dive runs cost range.
fn spend_attack(group: &mut AircraftGroup, attack: AttackType) {
    if !(attack == AttackType::Level && group.altitude == Altitude::High) {
        group.expend_range();
    }
    group.disarm();
}

fn attacking_stacks(
    formation: &AirFormation,
    attack: AttackType,
    target: AttackTarget,
) -> Vec<(usize, u8)> {
    formation
        .groups
        .iter()
        .enumerate()
        .filter(|(_, g)| g.count > 0)
        .filter_map(|(idx, g)| bombing_rating(g, attack, target).map(|r| (idx, r)))
        .collect()
}

/// Attack one ship. Stops as soon as she sinks.
pub fn attack_ship(
    formation: &mut AirFormation,
    ship: &mut Ship,
    attack: AttackType,
    modifiers: CombatModifiers,
    rng: &mut ChaCha8Rng,
) -> ShipAttackResult {
    let mut result = ShipAttackResult {
        ship: ship.name.clone(),
        hits: 0,
        sunk: ship.is_sunk(),
        rolls: Vec::new(),
        aircraft_destroyed: Vec::new(),
    };
    if result.sunk {
        return result;
    }
    for (idx, rating) in attacking_stacks(formation, attack, AttackTarget::Ship) {
        let Some(group) = formation.groups.get_mut(idx) else {
            continue;
        };
        let bht = air_attack_bht(rating, Some(ship.status), modifiers);
        let Some(roll) = crt::resolve(bht, group.count, rng) else {
            continue;
        };
        result.rolls.push(AttackRoll {
            aircraft_type: group.aircraft_type,
            roll,
        });
        spend_attack(group, attack);
        if roll.hits == 0 {
            continue;
        }
        result.hits += roll.hits;
        if ship.take_hits(roll.hits) {
            result.sunk = true;
            tracing::info!(ship = %ship.name, damage = ship.damage, "ship sunk");
            break;
        }
        if let Some(deck) = ship.base.as_mut() {
            result
                .aircraft_destroyed
                .extend(deck.destroy_ready(roll.hits));
        }
    }
    tracing::debug!(ship = %ship.name, hits = result.hits, sunk = result.sunk, "ship attacked");
    result
}

/// Attack a base. Hits add to base damage and destroy ready aircraft.
pub fn attack_base(
    formation: &mut AirFormation,
    base: &mut Base,
    attack: AttackType,
    modifiers: CombatModifiers,
    rng: &mut ChaCha8Rng,
) -> BaseAttackResult {
    let mut rolls = Vec::new();
    let mut hits = 0;
    for (idx, rating) in attacking_stacks(formation, attack, AttackTarget::Base) {
        let Some(group) = formation.groups.get_mut(idx) else {
            continue;
        };
        let bht = air_attack_bht(rating, None, modifiers);
        let Some(roll) = crt::resolve(bht, group.count, rng) else {
            continue;
        };
        hits += roll.hits;
        rolls.push(AttackRoll {
            aircraft_type: group.aircraft_type,
            roll,
        });
        spend_attack(group, attack);
    }
    let aircraft_destroyed = if rolls.is_empty() {
        Vec::new()
    } else {
        base.take_hits(hits)
    };
    tracing::debug!(base = %base.name, hits, "base attacked");
    BaseAttackResult {
        base: base.name.clone(),
        hits,
        rolls,
        aircraft_destroyed,
    }
}
