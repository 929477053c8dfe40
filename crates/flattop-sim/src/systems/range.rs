//! Range system: formations aloft burn one range factor per turn.
//!
//! Stacks that run dry ditch and are lost.

use hecs::World;

use flattop_core::events::GameEvent;
use flattop_core::formation::AirFormation;

pub fn run(world: &mut World, events: &mut Vec<GameEvent>) {
    let mut aloft: Vec<_> = world
        .query::<&AirFormation>()
        .iter()
        .map(|(e, f)| ((f.side, f.number), e))
        .collect();
    aloft.sort_by_key(|&(key, _)| key);

    for (_, entity) in aloft {
        let Ok(formation) = world.query_one_mut::<&mut AirFormation>(entity) else {
            continue;
        };
        for group in &mut formation.groups {
            group.expend_range();
        }
        for lost in formation.remove_spent() {
            if lost.count == 0 {
                continue;
            }
            tracing::info!(
                side = ?formation.side,
                formation = formation.number,
                aircraft_type = %lost.aircraft_type,
                count = lost.count,
                "aircraft ditched"
            );
            events.push(GameEvent::AircraftDitched {
                side: formation.side,
                aircraft_type: lost.aircraft_type,
                count: lost.count,
            });
        }
    }
}
