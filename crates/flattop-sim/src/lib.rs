//! Turn engine for FLATTOP.
//!
//! Owns the hecs ECS world, plays one hour per tick through the rule
//! functions in `flattop-rules`, and produces `GameStateSnapshot`s. Also
//! holds scenario setup, config loading and save slots.

pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod scenario;
pub mod state;
pub mod systems;
pub mod world_setup;

pub use engine::GameEngine;
pub use error::{Result, SimError};
pub use flattop_core;
pub use flattop_rules;

#[cfg(test)]
mod tests;
