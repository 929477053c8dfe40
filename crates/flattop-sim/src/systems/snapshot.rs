//! Snapshot system: reads the world into a `GameStateSnapshot`.
//!
//! This system is read-only.

use hecs::World;

use flattop_core::events::GameEvent;
use flattop_core::types::GameClock;
use flattop_rules::weather::WeatherMap;

use crate::state::GameStateSnapshot;
use crate::world_setup::collect_pieces;

pub fn build_snapshot(
    world: &World,
    clock: &GameClock,
    weather: &WeatherMap,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        day: clock.day,
        hour: clock.hour,
        time_of_day: clock.time_of_day(),
        pieces: collect_pieces(world),
        weather: weather.clone(),
        events,
    }
}
