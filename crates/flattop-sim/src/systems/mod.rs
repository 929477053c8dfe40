//! Turn phases, run in order by `GameEngine::tick`.
//!
//! Each system is a free function over the `hecs::World` plus whatever
//! engine state it needs. Only `commands` can reject input.

pub mod air_attack;
pub mod air_combat;
pub mod cleanup;
pub mod commands;
pub mod observation;
pub mod range;
pub mod reset;
pub mod snapshot;
