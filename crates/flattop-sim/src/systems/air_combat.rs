//! Air-to-air system: fights every hex and altitude band where both sides fly.
//!
//! Each side gets a turn as the intercepting side, Allied first. The two
//! passes together are the single engagement for that hex and band: a side's
//! fighters intercept once, and its escorts screen once, per turn. Losses
//! from the Allied pass carry into the Japanese one, so a fighter shot down
//! while intercepting never escorts. Formations are copied out of the world,
//! resolved, and written back.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use flattop_core::enums::{Altitude, Side, Weather};
use flattop_core::events::GameEvent;
use flattop_core::formation::AirFormation;
use flattop_core::types::HexCoord;
use flattop_rules::air_combat::{resolve_air_to_air, CombatModifiers};
use flattop_rules::weather::WeatherMap;

use super::commands::TurnOrders;

/// One hex and altitude band with its formations, sorted by side and number.
struct Airspace {
    hex: HexCoord,
    altitude: Altitude,
    formations: Vec<(Side, u8, Entity)>,
}

fn airspaces(world: &World) -> Vec<Airspace> {
    let mut spaces: Vec<Airspace> = Vec::new();
    let mut all: Vec<(HexCoord, Altitude, Side, u8, Entity)> = world
        .query::<(&HexCoord, &AirFormation)>()
        .iter()
        .map(|(e, (hex, f))| (*hex, f.altitude, f.side, f.number, e))
        .collect();
    all.sort_by_key(|&(hex, altitude, side, number, _)| (hex.q(), hex.r(), altitude, side, number));
    for (hex, altitude, side, number, entity) in all {
        match spaces
            .iter_mut()
            .find(|s| s.hex == hex && s.altitude == altitude)
        {
            Some(space) => space.formations.push((side, number, entity)),
            None => spaces.push(Airspace {
                hex,
                altitude,
                formations: vec![(side, number, entity)],
            }),
        }
    }
    spaces
}

fn take_side(world: &World, space: &Airspace, side: Side) -> Vec<(Entity, AirFormation)> {
    space
        .formations
        .iter()
        .filter(|(s, _, _)| *s == side)
        .filter_map(|&(_, _, e)| {
            world
                .get::<&AirFormation>(e)
                .ok()
                .map(|f| (e, (*f).clone()))
        })
        .collect()
}

fn write_back(world: &mut World, entities: &[Entity], formations: Vec<AirFormation>) {
    for (&entity, formation) in entities.iter().zip(formations) {
        if let Ok(slot) = world.query_one_mut::<&mut AirFormation>(entity) {
            *slot = formation;
        }
    }
}

pub fn run(
    world: &mut World,
    weather: &WeatherMap,
    orders: &TurnOrders,
    night: bool,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    for space in airspaces(world) {
        let modifiers = CombatModifiers {
            cloud: weather.weather_at(space.hex) != Weather::Clear,
            night,
        };
        for intercepting_side in [Side::Allied, Side::Japanese] {
            let (int_entities, mut intercepting): (Vec<_>, Vec<_>) =
                take_side(world, &space, intercepting_side).into_iter().unzip();
            let (raid_entities, mut raid): (Vec<_>, Vec<_>) =
                take_side(world, &space, intercepting_side.opponent())
                    .into_iter()
                    .unzip();
            if intercepting.is_empty() || raid.is_empty() {
                continue;
            }
            let plan = orders.plan_for(intercepting_side, space.hex, space.altitude);
            let result = resolve_air_to_air(&mut intercepting, &mut raid, &plan, modifiers, rng);
            write_back(world, &int_entities, intercepting);
            write_back(world, &raid_entities, raid);
            if result.rolls.is_empty() {
                continue;
            }
            let hits = result.total_hits();
            tracing::info!(
                hex = ?space.hex,
                altitude = ?space.altitude,
                side = ?intercepting_side,
                stage = ?result.stage,
                "air combat"
            );
            events.push(GameEvent::AirCombat {
                hex: space.hex,
                altitude: space.altitude,
                intercepting_side,
                hits_on_escorts: hits.on_escorts,
                hits_on_interceptors: hits.on_interceptors,
                hits_on_bombers: hits.on_bombers,
                bomber_stage_fought: result.bomber_stage_fought(),
            });
        }
    }
}
