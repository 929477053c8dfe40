//! Air-to-air combat for one hex and altitude.
//!
//! The intercepting side's interceptors fight the raid's escorts first, then,
//! depending on the 2:1 ratio check, its bombers. Within a stage every group
//! rolls before any hit is applied.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flattop_core::aircraft::{AircraftGroup, AircraftType};
use flattop_core::constants::{
    ARMED_FIGHTER_PENALTY, CLOUD_PENALTY, ESCORT_RATIO, NIGHT_PENALTY, NO_RANGE_EXPENDED_PENALTY,
};
use flattop_core::enums::Side;
use flattop_core::formation::AirFormation;

use crate::classifier::{classify, GroupRef};
use crate::crt::{self, CombatRoll};

/// Orders of the intercepting side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptionPlan {
    /// Formation numbers whose interceptors go straight for the bombers.
    pub bomber_targeting: Vec<u8>,
    /// Join the bomber stage after winning the escort fight 2:1.
    pub merge_on_advantage: bool,
    /// Fight at -6 without expending a range factor.
    pub decline_range: bool,
}

/// Environmental modifiers of the hex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatModifiers {
    pub cloud: bool,
    pub night: bool,
}

/// Basic Hit Table before clamping for one group in air-to-air combat.
pub fn air_to_air_bht(group: &AircraftGroup, opted_out: bool, modifiers: CombatModifiers) -> i32 {
    let mut bht = i32::from(group.combat_data().air_to_air);
    if opted_out {
        bht -= NO_RANGE_EXPENDED_PENALTY;
    }
    if modifiers.cloud {
        bht -= CLOUD_PENALTY;
    }
    if modifiers.night {
        bht -= NIGHT_PENALTY;
    }
    if group.is_armed() && group.aircraft_type.armed_penalty_applies() {
        bht -= ARMED_FIGHTER_PENALTY;
    }
    bht
}

/// Where the engagement ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementStage {
    Init,
    EscortStage,
    RatioCheck,
    BomberStage,
    /// Escorts held the interceptors off 2:1.
    Skipped,
    Done,
}

/// Hits scored in one stage, by target category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageHits {
    pub on_interceptors: u32,
    pub on_escorts: u32,
    pub on_bombers: u32,
}

/// Outcome of the 2:1 check after the escort stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatioOutcome {
    /// Interceptors at least twice the escorts.
    InterceptorAdvantage,
    /// Escorts at least twice the interceptors.
    EscortAdvantage,
    Even,
}

/// Surviving interceptor and escort Air Factors and what they mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioCheck {
    pub interceptors: u32,
    pub escorts: u32,
    pub outcome: RatioOutcome,
}

/// Inclusive 2:1 test. Interceptor advantage wins a tie at zero.
pub fn ratio_check(interceptors: u32, escorts: u32) -> RatioCheck {
    let outcome = if interceptors >= ESCORT_RATIO * escorts {
        RatioOutcome::InterceptorAdvantage
    } else if escorts >= ESCORT_RATIO * interceptors {
        RatioOutcome::EscortAdvantage
    } else {
        RatioOutcome::Even
    };
    RatioCheck {
        interceptors,
        escorts,
        outcome,
    }
}

/// Air Factors lost by one stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loss {
    pub side: Side,
    pub formation: u8,
    pub aircraft_type: AircraftType,
    pub count: u32,
}

/// A stack removed from its formation after combat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eliminated {
    pub side: Side,
    pub formation: u8,
    pub aircraft_type: AircraftType,
    /// Air Factors left when a stack was removed for running out of range.
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementResult {
    pub stage: EngagementStage,
    pub escort_stage: Option<StageHits>,
    pub ratio: Option<RatioCheck>,
    pub bomber_stage: Option<StageHits>,
    pub rolls: Vec<CombatRoll>,
    pub losses: Vec<Loss>,
    pub eliminated: Vec<Eliminated>,
}

impl EngagementResult {
    fn new() -> Self {
        Self {
            stage: EngagementStage::Init,
            escort_stage: None,
            ratio: None,
            bomber_stage: None,
            rolls: Vec::new(),
            losses: Vec::new(),
            eliminated: Vec::new(),
        }
    }

    pub fn bomber_stage_fought(&self) -> bool {
        self.bomber_stage.is_some()
    }

    /// All hits across both stages.
    pub fn total_hits(&self) -> StageHits {
        let mut total = StageHits::default();
        for stage in [self.escort_stage, self.bomber_stage].into_iter().flatten() {
            total.on_interceptors += stage.on_interceptors;
            total.on_escorts += stage.on_escorts;
            total.on_bombers += stage.on_bombers;
        }
        total
    }
}

fn live_count(formations: &[AirFormation], refs: &[GroupRef]) -> u32 {
    refs.iter()
        .filter_map(|r| r.get(formations))
        .map(|g| g.count)
        .sum()
}

/// Every listed group rolls once against a target; returns the summed hits.
fn volley(
    formations: &[AirFormation],
    attackers: &[GroupRef],
    opted_out: bool,
    modifiers: CombatModifiers,
    rng: &mut ChaCha8Rng,
    rolls: &mut Vec<CombatRoll>,
) -> u32 {
    let mut hits = 0;
    for slot in attackers {
        let Some(group) = slot.get(formations) else {
            continue;
        };
        let bht = air_to_air_bht(group, opted_out, modifiers);
        if let Some(roll) = crt::resolve(bht, group.count, rng) {
            hits += roll.hits;
            rolls.push(roll);
        }
    }
    hits
}

/// Spread hits over the targets in order; excess is discarded.
pub(crate) fn spread_hits(
    formations: &mut [AirFormation],
    targets: &[GroupRef],
    hits: u32,
    losses: &mut Vec<Loss>,
) {
    let mut remaining = hits;
    for slot in targets {
        if remaining == 0 {
            break;
        }
        let (side, number) = match formations.get(slot.formation) {
            Some(f) => (f.side, f.number),
            None => continue,
        };
        let Some(group) = slot.get_mut(formations) else {
            continue;
        };
        let lost = group.apply_hits(remaining);
        remaining -= lost;
        if lost > 0 {
            losses.push(Loss {
                side,
                formation: number,
                aircraft_type: group.aircraft_type,
                count: lost,
            });
        }
    }
}

fn burn_range(formations: &mut [AirFormation], groups: &[GroupRef]) {
    for slot in groups {
        if let Some(group) = slot.get_mut(formations) {
            if group.count > 0 {
                group.expend_combat_range();
            }
        }
    }
}

fn sweep(formations: &mut [AirFormation], eliminated: &mut Vec<Eliminated>) {
    for formation in formations.iter_mut() {
        for group in formation.remove_spent() {
            eliminated.push(Eliminated {
                side: formation.side,
                formation: formation.number,
                aircraft_type: group.aircraft_type,
                remaining: group.count,
            });
        }
    }
}

/// Run one air-to-air engagement.
///
/// `intercepting` holds the intercepting side's formations in the hex and
/// altitude band; only their interceptors fight. `raid` holds the other
/// side's formations; their escorts and bombers are the targets. Spent and
/// destroyed stacks are removed from both slices' formations before return.
///
/// This is one side's half of an airspace fight. Callers run it once with
/// each side intercepting, never more.
pub fn resolve_air_to_air(
    intercepting: &mut [AirFormation],
    raid: &mut [AirFormation],
    plan: &InterceptionPlan,
    modifiers: CombatModifiers,
    rng: &mut ChaCha8Rng,
) -> EngagementResult {
    let mut result = EngagementResult::new();
    let interceptors = classify(intercepting).interceptors;
    let raid_roles = classify(raid);

    let (mut to_bombers, mut to_escorts): (Vec<GroupRef>, Vec<GroupRef>) =
        interceptors.into_iter().partition(|slot| {
            intercepting
                .get(slot.formation)
                .is_some_and(|f| plan.bomber_targeting.contains(&f.number))
        });
    if raid_roles.escorts.is_empty() {
        to_bombers.append(&mut to_escorts);
        to_bombers.sort();
    }

    let mut escorts_fought = false;
    let mut bomber_attackers = to_bombers.clone();
    let any_interceptors = !to_escorts.is_empty() || !to_bombers.is_empty();

    // Escorted bombers are only reachable through the ratio check, even when
    // no interceptor was sent at the escorts.
    if any_interceptors && !raid_roles.escorts.is_empty() {
        if !to_escorts.is_empty() {
            result.stage = EngagementStage::EscortStage;
            escorts_fought = true;
            let on_escorts = volley(
                intercepting,
                &to_escorts,
                plan.decline_range,
                modifiers,
                rng,
                &mut result.rolls,
            );
            let on_interceptors = volley(
                raid,
                &raid_roles.escorts,
                false,
                modifiers,
                rng,
                &mut result.rolls,
            );
            spread_hits(raid, &raid_roles.escorts, on_escorts, &mut result.losses);
            spread_hits(intercepting, &to_escorts, on_interceptors, &mut result.losses);
            result.escort_stage = Some(StageHits {
                on_interceptors,
                on_escorts,
                on_bombers: 0,
            });
            tracing::debug!(on_escorts, on_interceptors, "escort stage");
        }

        result.stage = EngagementStage::RatioCheck;
        let check = ratio_check(
            live_count(intercepting, &to_escorts),
            live_count(raid, &raid_roles.escorts),
        );
        result.ratio = Some(check);
        tracing::debug!(
            interceptors = check.interceptors,
            escorts = check.escorts,
            outcome = ?check.outcome,
            "ratio check"
        );
        match check.outcome {
            RatioOutcome::InterceptorAdvantage if plan.merge_on_advantage => {
                bomber_attackers.extend(to_escorts.iter().copied());
                bomber_attackers.sort();
            }
            RatioOutcome::EscortAdvantage => {
                bomber_attackers.clear();
                result.stage = EngagementStage::Skipped;
            }
            _ => {}
        }
    }

    bomber_attackers.retain(|slot| slot.get(intercepting).is_some_and(|g| g.count > 0));
    let bombers = raid_roles.bombers.clone();
    if result.stage != EngagementStage::Skipped
        && !bomber_attackers.is_empty()
        && live_count(raid, &bombers) > 0
    {
        result.stage = EngagementStage::BomberStage;
        let on_bombers = volley(
            intercepting,
            &bomber_attackers,
            plan.decline_range,
            modifiers,
            rng,
            &mut result.rolls,
        );
        let on_interceptors = volley(raid, &bombers, false, modifiers, rng, &mut result.rolls);
        spread_hits(raid, &bombers, on_bombers, &mut result.losses);
        spread_hits(intercepting, &bomber_attackers, on_interceptors, &mut result.losses);
        result.bomber_stage = Some(StageHits {
            on_interceptors,
            on_escorts: 0,
            on_bombers,
        });
        tracing::debug!(on_bombers, on_interceptors, "bomber stage");
    }

    if !plan.decline_range {
        let mut fought: Vec<GroupRef> = Vec::new();
        if escorts_fought {
            fought.extend(to_escorts.iter().copied());
        }
        if result.bomber_stage.is_some() {
            fought.extend(bomber_attackers.iter().copied());
        }
        burn_range(intercepting, &fought);
    }
    if escorts_fought {
        burn_range(raid, &raid_roles.escorts);
    }

    sweep(intercepting, &mut result.eliminated);
    sweep(raid, &mut result.eliminated);
    if result.stage != EngagementStage::Skipped {
        result.stage = EngagementStage::Done;
    }
    result
}
