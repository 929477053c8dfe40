//! Command system: validates and applies queued player orders.
//!
//! Air operations and movement take effect immediately. Interception plans
//! and attack orders are held in `TurnOrders` for the combat phases.

use std::collections::HashMap;

use hecs::World;

use flattop_core::commands::PlayerCommand;
use flattop_core::enums::{Altitude, AttackType, Side};
use flattop_core::events::GameEvent;
use flattop_core::formation::AirFormation;
use flattop_core::naval::TaskForce;
use flattop_core::types::{GameClock, HexCoord};
use flattop_rules::air_combat::InterceptionPlan;

use crate::error::{Result, SimError};
use crate::world_setup::{self, base_hex, find_airfield, find_formation, find_task_force};

/// A bombing or torpedo attack to resolve after air-to-air combat.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackOrder {
    Ship {
        side: Side,
        formation: u8,
        task_force: u8,
        ship: String,
        attack_type: AttackType,
    },
    Base {
        side: Side,
        formation: u8,
        base: String,
        attack_type: AttackType,
    },
}

/// Orders that live for one turn.
#[derive(Debug, Default)]
pub struct TurnOrders {
    pub interception: HashMap<(Side, HexCoord, Altitude), InterceptionPlan>,
    pub attacks: Vec<AttackOrder>,
    /// Hexes each air formation has already moved this turn.
    pub formation_moves: HashMap<(Side, u8), u32>,
    /// Hexes each task force has already moved this turn.
    pub task_force_moves: HashMap<(Side, u8), u32>,
}

impl TurnOrders {
    pub fn plan_for(&self, side: Side, hex: HexCoord, altitude: Altitude) -> InterceptionPlan {
        self.interception
            .get(&(side, hex, altitude))
            .cloned()
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.interception.clear();
        self.attacks.clear();
        self.formation_moves.clear();
        self.task_force_moves.clear();
    }
}

/// Distance of a legal move, given the movement already used this turn.
fn check_reach(from: HexCoord, to: HexCoord, movement: u32, used: u32) -> Result<u32> {
    if !to.is_on_board() {
        return Err(SimError::OffBoard(to));
    }
    let distance = from.distance(&to);
    let movement = movement.saturating_sub(used);
    if distance > movement {
        return Err(SimError::OutOfReach { distance, movement });
    }
    Ok(distance)
}

/// Apply one order. Rejected orders leave the world untouched.
pub fn apply(
    world: &mut World,
    clock: &GameClock,
    orders: &mut TurnOrders,
    events: &mut Vec<GameEvent>,
    command: PlayerCommand,
) -> Result<()> {
    match command {
        PlayerCommand::TransitionAircraft {
            side,
            base,
            aircraft_type,
            from,
            to,
            count,
        } => {
            let moved = world_setup::with_base_mut(world, side, &base, |b| {
                b.transition(aircraft_type, from, to, count)
            })
            .ok_or_else(|| SimError::UnknownBase {
                side,
                name: base.clone(),
            })??;
            tracing::debug!(%base, %aircraft_type, ?from, ?to, count, moved, "aircraft transition");
        }
        PlayerCommand::ArmAircraft {
            side,
            base,
            aircraft_type,
            armament,
        } => {
            let armed = world_setup::with_base_mut(world, side, &base, |b| {
                b.arm(aircraft_type, armament)
            })
            .ok_or_else(|| SimError::UnknownBase {
                side,
                name: base.clone(),
            })?;
            if !armed {
                return Err(SimError::NothingToArm {
                    base,
                    aircraft_type,
                });
            }
        }
        PlayerCommand::LaunchFormation {
            side,
            base,
            number,
            aircraft,
            altitude,
        } => {
            if find_formation(world, side, number).is_some() {
                return Err(SimError::FormationInUse { side, number });
            }
            let hex = base_hex(world, side, &base).ok_or_else(|| SimError::UnknownBase {
                side,
                name: base.clone(),
            })?;
            let formation = world_setup::with_base_mut(world, side, &base, |b| {
                b.launch(number, &aircraft, altitude, clock.hour)
            })
            .ok_or_else(|| SimError::UnknownBase {
                side,
                name: base.clone(),
            })??;
            events.push(GameEvent::FormationLaunched {
                side,
                base,
                number,
                aircraft: formation.total_aircraft(),
            });
            world.spawn((hex, formation));
        }
        PlayerCommand::LandFormation { side, number, base } => {
            let (entity, hex) = find_formation(world, side, number)
                .ok_or(SimError::UnknownFormation { side, number })?;
            let base_at = base_hex(world, side, &base).ok_or_else(|| SimError::UnknownBase {
                side,
                name: base.clone(),
            })?;
            if base_at != hex {
                return Err(SimError::NotInHex { what: base });
            }
            let formation = world
                .remove_one::<AirFormation>(entity)
                .map_err(|_| SimError::UnknownFormation { side, number })?;
            let _ = world.despawn(entity);
            let landed = world_setup::with_base_mut(world, side, &base, |b| b.recover(formation))
                .unwrap_or(0);
            events.push(GameEvent::FormationLanded {
                side,
                base,
                number,
                aircraft: landed,
            });
        }
        PlayerCommand::MoveFormation { side, number, to } => {
            let (entity, from) = find_formation(world, side, number)
                .ok_or(SimError::UnknownFormation { side, number })?;
            let (hex, formation) = world
                .query_one_mut::<(&mut HexCoord, &AirFormation)>(entity)
                .map_err(|_| SimError::UnknownFormation { side, number })?;
            let used = orders.formation_moves.entry((side, number)).or_default();
            *used += check_reach(from, to, formation.movement_factor(), *used)?;
            *hex = to;
        }
        PlayerCommand::SetAltitude {
            side,
            number,
            altitude,
        } => {
            let (entity, _) = find_formation(world, side, number)
                .ok_or(SimError::UnknownFormation { side, number })?;
            let formation = world
                .query_one_mut::<&mut AirFormation>(entity)
                .map_err(|_| SimError::UnknownFormation { side, number })?;
            formation.set_altitude(altitude);
        }
        PlayerCommand::MoveTaskForce { side, number, to } => {
            let (entity, from) = find_task_force(world, side, number)
                .ok_or(SimError::UnknownTaskForce { side, number })?;
            let (hex, tf) = world
                .query_one_mut::<(&mut HexCoord, &TaskForce)>(entity)
                .map_err(|_| SimError::UnknownTaskForce { side, number })?;
            let used = orders.task_force_moves.entry((side, number)).or_default();
            *used += check_reach(from, to, tf.movement_factor(), *used)?;
            *hex = to;
        }
        PlayerCommand::PlanInterception {
            side,
            hex,
            altitude,
            bomber_targeting,
            merge_on_advantage,
            decline_range,
        } => {
            orders.interception.insert(
                (side, hex, altitude),
                InterceptionPlan {
                    bomber_targeting,
                    merge_on_advantage,
                    decline_range,
                },
            );
        }
        PlayerCommand::AttackShip {
            side,
            formation,
            task_force,
            ship,
            attack_type,
        } => {
            find_formation(world, side, formation).ok_or(SimError::UnknownFormation {
                side,
                number: formation,
            })?;
            let enemy = side.opponent();
            let (entity, _) = find_task_force(world, enemy, task_force).ok_or(
                SimError::UnknownTaskForce {
                    side: enemy,
                    number: task_force,
                },
            )?;
            let has_ship = world
                .get::<&TaskForce>(entity)
                .map(|tf| tf.afloat().any(|s| s.name == ship))
                .unwrap_or(false);
            if !has_ship {
                return Err(SimError::UnknownShip {
                    side: enemy,
                    task_force,
                    ship,
                });
            }
            orders.attacks.push(AttackOrder::Ship {
                side,
                formation,
                task_force,
                ship,
                attack_type,
            });
        }
        PlayerCommand::AttackBase {
            side,
            formation,
            base,
            attack_type,
        } => {
            find_formation(world, side, formation).ok_or(SimError::UnknownFormation {
                side,
                number: formation,
            })?;
            let enemy = side.opponent();
            find_airfield(world, enemy, &base).ok_or_else(|| SimError::UnknownBase {
                side: enemy,
                name: base.clone(),
            })?;
            orders.attacks.push(AttackOrder::Base {
                side,
                formation,
                base,
                attack_type,
            });
        }
    }
    Ok(())
}
