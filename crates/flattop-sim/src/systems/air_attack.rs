//! Air attack system: flak, then bombs, for each attack order in turn.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use flattop_core::base::Base;
use flattop_core::enums::{Side, Weather};
use flattop_core::events::GameEvent;
use flattop_core::formation::AirFormation;
use flattop_core::naval::TaskForce;
use flattop_core::types::HexCoord;
use flattop_rules::air_attack::{attack_base, attack_ship};
use flattop_rules::air_combat::CombatModifiers;
use flattop_rules::anti_aircraft::resolve_anti_aircraft;
use flattop_rules::weather::WeatherMap;

use super::commands::AttackOrder;
use crate::world_setup::{find_airfield, find_formation, find_task_force};

fn reject(events: &mut Vec<GameEvent>, reason: String) {
    tracing::warn!(%reason, "attack called off");
    events.push(GameEvent::CommandRejected { reason });
}

fn flak(
    anti_air_factor: u32,
    formation: &mut AirFormation,
    hex: HexCoord,
    firing_side: Side,
    modifiers: CombatModifiers,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let result = resolve_anti_aircraft(
        anti_air_factor,
        std::slice::from_mut(formation),
        modifiers,
        rng,
    );
    if result.roll.is_some() {
        events.push(GameEvent::AntiAircraftFire {
            hex,
            firing_side,
            hits: result.hits,
        });
    }
}

pub fn run(
    world: &mut World,
    attacks: Vec<AttackOrder>,
    weather: &WeatherMap,
    night: bool,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    for order in attacks {
        let (side, number) = match &order {
            AttackOrder::Ship { side, formation, .. } | AttackOrder::Base { side, formation, .. } => {
                (*side, *formation)
            }
        };
        // Shot down or recalled since the order was given.
        let Some((raid_entity, hex)) = find_formation(world, side, number) else {
            tracing::debug!(?side, number, "attacking formation gone");
            continue;
        };
        let Ok(mut formation) = world
            .get::<&AirFormation>(raid_entity)
            .map(|f| (*f).clone())
        else {
            continue;
        };
        let modifiers = CombatModifiers {
            cloud: weather.weather_at(hex) != Weather::Clear,
            night,
        };
        let enemy = side.opponent();

        match order {
            AttackOrder::Ship {
                task_force,
                ship,
                attack_type,
                ..
            } => {
                let Some((tf_entity, tf_hex)) = find_task_force(world, enemy, task_force) else {
                    reject(events, format!("task force {task_force} is gone"));
                    continue;
                };
                if tf_hex != hex {
                    reject(events, format!("task force {task_force} is not under formation {number}"));
                    continue;
                }
                let Ok(tf) = world.query_one_mut::<&mut TaskForce>(tf_entity) else {
                    continue;
                };
                flak(tf.anti_air_factor(), &mut formation, hex, enemy, modifiers, rng, events);
                if let Some(target) = tf.ship_mut(&ship) {
                    let result = attack_ship(&mut formation, target, attack_type, modifiers, rng);
                    if !result.rolls.is_empty() {
                        events.push(GameEvent::ShipHit {
                            side: enemy,
                            ship: result.ship,
                            hits: result.hits,
                            sunk: result.sunk,
                        });
                    }
                }
            }
            AttackOrder::Base {
                base, attack_type, ..
            } => {
                let Some((base_entity, base_hex)) = find_airfield(world, enemy, &base) else {
                    reject(events, format!("base {base} is gone"));
                    continue;
                };
                if base_hex != hex {
                    reject(events, format!("{base} is not under formation {number}"));
                    continue;
                }
                let Ok(target) = world.query_one_mut::<&mut Base>(base_entity) else {
                    continue;
                };
                flak(
                    target.config.anti_air_factor,
                    &mut formation,
                    hex,
                    enemy,
                    modifiers,
                    rng,
                    events,
                );
                let result = attack_base(&mut formation, target, attack_type, modifiers, rng);
                if !result.rolls.is_empty() {
                    events.push(GameEvent::BaseHit {
                        side: enemy,
                        base: result.base,
                        hits: result.hits,
                        aircraft_destroyed: result.aircraft_destroyed.iter().map(|(_, n)| n).sum(),
                    });
                }
            }
        }

        if let Ok(slot) = world.query_one_mut::<&mut AirFormation>(raid_entity) {
            *slot = formation;
        }
    }
}
