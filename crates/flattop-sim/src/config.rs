//! Engine configuration, loadable from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use flattop_core::constants::DAWN_HOUR;
use flattop_core::enums::CloudCover;

use crate::error::Result;

/// Configuration for starting a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. Same seed and orders, same game.
    pub seed: u64,
    /// Hour of the first turn.
    pub start_hour: u8,
    pub cloud_cover: CloudCover,
    /// Directory for save slots.
    pub save_dir: PathBuf,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_hour: DAWN_HOUR,
            cloud_cover: CloudCover::Scattered,
            save_dir: PathBuf::from("saves"),
            log_filter: "flattop=info".to_string(),
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}
