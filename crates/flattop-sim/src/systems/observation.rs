//! Observation system: every piece searches for every enemy piece in range.
//!
//! A target keeps the best condition any enemy observer reached this turn.
//! Pieces are visited in a stable order so the dice stream never depends on
//! archetype layout.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use flattop_core::base::Base;
use flattop_core::constants::OBSERVATION_MAX_DISTANCE;
use flattop_core::enums::{ObservationCondition, Side, TimeOfDay, UnitKind};
use flattop_core::events::GameEvent;
use flattop_core::formation::AirFormation;
use flattop_core::naval::TaskForce;
use flattop_core::types::HexCoord;
use flattop_rules::observation::{attempt_observation, ObservationConditions, UnitProfile};
use flattop_rules::weather::WeatherMap;

struct Sighting {
    entity: Entity,
    side: Side,
    hex: HexCoord,
    profile: UnitProfile,
    order: (u8, Side, u8, String),
}

fn gather(world: &World) -> Vec<Sighting> {
    let mut all = Vec::new();
    for (entity, (hex, base)) in world.query::<(&HexCoord, &Base)>().iter() {
        all.push(Sighting {
            entity,
            side: base.side,
            hex: *hex,
            profile: UnitProfile::base(base.radar),
            order: (0, base.side, 0, base.name.clone()),
        });
    }
    for (entity, (hex, tf)) in world.query::<(&HexCoord, &TaskForce)>().iter() {
        all.push(Sighting {
            entity,
            side: tf.side,
            hex: *hex,
            profile: UnitProfile::task_force(tf.radar),
            order: (1, tf.side, tf.number, String::new()),
        });
    }
    for (entity, (hex, f)) in world.query::<(&HexCoord, &AirFormation)>().iter() {
        all.push(Sighting {
            entity,
            side: f.side,
            hex: *hex,
            profile: UnitProfile::air_formation(f.altitude),
            order: (2, f.side, f.number, String::new()),
        });
    }
    all.sort_by(|a, b| a.order.cmp(&b.order));
    all
}

fn set_condition(world: &mut World, entity: Entity, kind: UnitKind, condition: ObservationCondition) {
    match kind {
        UnitKind::AirFormation => {
            if let Ok(f) = world.query_one_mut::<&mut AirFormation>(entity) {
                f.observed_condition = condition;
            }
        }
        UnitKind::TaskForce => {
            if let Ok(tf) = world.query_one_mut::<&mut TaskForce>(entity) {
                tf.observed_condition = condition;
            }
        }
        UnitKind::Base => {
            if let Ok(b) = world.query_one_mut::<&mut Base>(entity) {
                b.observed_condition = condition;
            }
        }
    }
}

pub fn run(
    world: &mut World,
    weather: &WeatherMap,
    time_of_day: TimeOfDay,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<GameEvent>,
) {
    let pieces = gather(world);
    for target in &pieces {
        let mut best = ObservationCondition::Unseen;
        for observer in pieces.iter().filter(|o| o.side != target.side) {
            let distance = observer.hex.distance(&target.hex);
            if distance > OBSERVATION_MAX_DISTANCE {
                continue;
            }
            let conditions = ObservationConditions {
                observer_weather: weather.weather_at(observer.hex),
                target_weather: weather.weather_at(target.hex),
                distance,
                time_of_day,
            };
            let condition =
                attempt_observation(&observer.profile, &target.profile, &conditions, rng);
            best = best.max(condition);
        }
        set_condition(world, target.entity, target.profile.kind, best);
        if best.is_observed() {
            events.push(GameEvent::UnitObserved {
                observer_side: target.side.opponent(),
                kind: target.profile.kind,
                hex: target.hex,
                condition: best,
            });
        }
    }
}
