//! Anti-aircraft fire from a task force or base against attacking bombers.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flattop_core::constants::{AA_BASE_BHT, BHT_MIN, CLOUD_PENALTY, NIGHT_PENALTY};
use flattop_core::formation::AirFormation;

use crate::air_combat::{spread_hits, CombatModifiers, Loss};
use crate::classifier::classify;
use crate::crt::{self, CombatRoll};

/// Basic Hit Table for flak: 4, -1 in cloud, -2 at night, never below 1.
pub fn anti_aircraft_bht(modifiers: CombatModifiers) -> i32 {
    let mut bht = AA_BASE_BHT;
    if modifiers.cloud {
        bht -= CLOUD_PENALTY;
    }
    if modifiers.night {
        bht -= NIGHT_PENALTY;
    }
    bht.max(BHT_MIN)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntiAircraftResult {
    /// `None` when the defender has no flak to fire.
    pub roll: Option<CombatRoll>,
    pub hits: u32,
    pub losses: Vec<Loss>,
}

/// One die of flak at the raid's attacking bombers, hits spread over them in
/// order. Stacks carrying no ordnance are not attacking and draw no fire.
///
/// `anti_air_factor` is the task force total over ships afloat, or the base's
/// own factor.
pub fn resolve_anti_aircraft(
    anti_air_factor: u32,
    raid: &mut [AirFormation],
    modifiers: CombatModifiers,
    rng: &mut ChaCha8Rng,
) -> AntiAircraftResult {
    let mut bombers = classify(raid).bombers;
    bombers.retain(|slot| slot.get(raid).is_some_and(|g| g.is_armed()));
    let roll = if bombers.is_empty() {
        None
    } else {
        crt::resolve(anti_aircraft_bht(modifiers), anti_air_factor, rng)
    };
    let hits = roll.map_or(0, |r| r.hits);
    let mut losses = Vec::new();
    spread_hits(raid, &bombers, hits, &mut losses);
    for formation in raid.iter_mut() {
        formation.groups.retain(|g| g.count > 0);
    }
    tracing::debug!(anti_air_factor, hits, "anti-aircraft fire");
    AntiAircraftResult { roll, hits, losses }
}
