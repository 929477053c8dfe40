//! Rule resolution for the FLATTOP engine.
//!
//! Pure functions over `flattop-core` data: the Combat Results Table, the
//! mission classifier, observation, air-to-air, anti-aircraft and bombing
//! combat, and weather. Every die comes from an injected `ChaCha8Rng`, so a
//! seed plus the same inputs reproduces the same outcome.

pub mod air_attack;
pub mod air_combat;
pub mod anti_aircraft;
pub mod classifier;
pub mod crt;
pub mod observation;
pub mod weather;
