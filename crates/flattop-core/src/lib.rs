//! Core types and definitions for the FLATTOP rules engine.
//!
//! This crate defines the vocabulary shared across all other crates:
//! aircraft, formations, ships, bases and their air operations tracker,
//! commands, events, errors and rule constants. It has no dependency on
//! randomness or any runtime framework.

pub mod aircraft;
pub mod base;
pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod formation;
pub mod naval;
pub mod types;

#[cfg(test)]
mod tests;
