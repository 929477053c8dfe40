//! Turn engine: the core of the game.
//!
//! `GameEngine` owns the hecs world, the clock, the weather and the dice.
//! Each `tick` plays one hour and returns a `GameStateSnapshot`. Completely
//! headless, so a seed plus a command stream replays exactly.

use std::collections::{HashSet, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use flattop_core::commands::PlayerCommand;
use flattop_core::events::GameEvent;
use flattop_core::types::GameClock;
use flattop_rules::weather::WeatherMap;

use crate::config::SimConfig;
use crate::persistence::SaveData;
use crate::error::{Result, SimError};
use crate::state::{GameModel, GameStateSnapshot, Piece};
use crate::systems;
use crate::systems::commands::TurnOrders;
use crate::world_setup;

pub struct GameEngine {
    world: World,
    clock: GameClock,
    seed: u64,
    rng: ChaCha8Rng,
    weather: WeatherMap,
    command_queue: VecDeque<PlayerCommand>,
    orders: TurnOrders,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// An empty map with the configured clouds laid out.
    pub fn new(config: &SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let weather = WeatherMap::generate(config.cloud_cover, &mut rng);
        Self {
            world: World::new(),
            clock: GameClock::new(1, config.start_hour),
            seed: config.seed,
            rng,
            weather,
            command_queue: VecDeque::new(),
            orders: TurnOrders::default(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn spawn_piece(&mut self, piece: Piece) -> Entity {
        world_setup::spawn_piece(&mut self.world, piece)
    }

    /// Queue a player command for the next turn.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Play one hour and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        let hour = self.clock.hour;
        let night = self.clock.time_of_day().is_night();
        tracing::info!(day = self.clock.day, hour, "turn start");

        // 1. Per-turn budgets and flags
        systems::reset::run(&mut self.world);
        // 2. Wind
        if self.weather.wind_phase(hour, &mut self.rng) {
            tracing::info!(winds = ?self.weather.winds, "wind phase");
        }
        // 3. Clouds
        if self.weather.cloud_phase(hour) {
            tracing::debug!("clouds drift");
        }
        // 4. Orders
        self.process_commands();
        // 5. Observation
        systems::observation::run(
            &mut self.world,
            &self.weather,
            self.clock.time_of_day(),
            &mut self.rng,
            &mut self.events,
        );
        // 6. Air-to-air, per hex and altitude band
        systems::air_combat::run(
            &mut self.world,
            &self.weather,
            &self.orders,
            night,
            &mut self.rng,
            &mut self.events,
        );
        // 7. Flak and air attacks
        let attacks = std::mem::take(&mut self.orders.attacks);
        systems::air_attack::run(
            &mut self.world,
            attacks,
            &self.weather,
            night,
            &mut self.rng,
            &mut self.events,
        );
        // 8. Range burn
        systems::range::run(&mut self.world, &mut self.events);
        // 9. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        self.orders.clear();
        self.clock.advance();
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.clock, &self.weather, events)
    }

    /// Current state without playing a turn.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.clock, &self.weather, Vec::new())
    }

    pub fn clock(&self) -> GameClock {
        self.clock
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn weather(&self) -> &WeatherMap {
        &self.weather
    }

    pub fn weather_mut(&mut self) -> &mut WeatherMap {
        &mut self.weather
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn to_save_data(&self, slot_name: &str) -> SaveData {
        SaveData {
            slot_name: slot_name.to_string(),
            seed: self.seed,
            day: self.clock.day,
            hour: self.clock.hour,
            timestamp: crate::persistence::now_secs(),
            pieces: world_setup::collect_pieces(&self.world),
            weather: self.weather.clone(),
            rng: self.rng.clone(),
        }
    }

    /// Rebuild an engine that plays on exactly as the saved one would.
    ///
    /// Every piece is checked before anything is spawned, so a tampered or
    /// corrupt save is refused whole. Queued commands are not part of a save.
    pub fn from_save_data(data: SaveData) -> Result<Self> {
        let mut formations = HashSet::new();
        for piece in &data.pieces {
            piece.model.validate()?;
            if let GameModel::AirFormation(f) = &piece.model {
                if !formations.insert((f.side, f.number)) {
                    return Err(SimError::FormationInUse {
                        side: f.side,
                        number: f.number,
                    });
                }
            }
        }

        let mut world = World::new();
        for piece in data.pieces {
            world_setup::spawn_piece(&mut world, piece);
        }
        tracing::info!(slot = %data.slot_name, day = data.day, hour = data.hour, "game restored");
        Ok(Self {
            world,
            clock: GameClock::new(data.day, data.hour),
            seed: data.seed,
            rng: data.rng,
            weather: data.weather,
            command_queue: VecDeque::new(),
            orders: TurnOrders::default(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = systems::commands::apply(
                &mut self.world,
                &self.clock,
                &mut self.orders,
                &mut self.events,
                command,
            ) {
                tracing::warn!(%err, "command rejected");
                self.events.push(GameEvent::CommandRejected {
                    reason: err.to_string(),
                });
            }
        }
    }
}
