//! Save slots as pretty JSON files in a directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flattop_rules::weather::WeatherMap;

use crate::error::Result;
use crate::state::Piece;

/// Full save data written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub slot_name: String,
    pub seed: u64,
    pub day: u32,
    pub hour: u8,
    pub timestamp: u64,
    pub pieces: Vec<Piece>,
    pub weather: WeatherMap,
    /// Dice stream position, so a loaded game rolls what the saved one would.
    pub rng: ChaCha8Rng,
}

/// Lightweight metadata for listing saves without keeping the pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub slot_name: String,
    pub day: u32,
    pub hour: u8,
    pub timestamp: u64,
    pub pieces: usize,
}

pub(crate) fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn save_path(dir: &Path, slot: &str) -> PathBuf {
    dir.join(format!("{slot}.json"))
}

pub fn save_to_file(dir: &Path, slot: &str, data: &SaveData) -> Result<()> {
    fs::create_dir_all(dir)?;
    let path = save_path(dir, slot);
    let json = serde_json::to_string_pretty(data)?;
    fs::write(&path, json)?;
    tracing::info!(path = %path.display(), day = data.day, hour = data.hour, "game saved");
    Ok(())
}

pub fn load_from_file(dir: &Path, slot: &str) -> Result<SaveData> {
    let json = fs::read_to_string(save_path(dir, slot))?;
    Ok(serde_json::from_str(&json)?)
}

/// Every readable save in `dir`, newest first. Unreadable files are skipped.
pub fn list_saves(dir: &Path) -> Vec<SaveMetadata> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut saves = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "json") {
            continue;
        }
        let Ok(json) = fs::read_to_string(&path) else {
            continue;
        };
        match serde_json::from_str::<SaveData>(&json) {
            Ok(data) => saves.push(SaveMetadata {
                slot_name: data.slot_name,
                day: data.day,
                hour: data.hour,
                timestamp: data.timestamp,
                pieces: data.pieces.len(),
            }),
            Err(err) => tracing::debug!(path = %path.display(), %err, "skipping unreadable save"),
        }
    }
    saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    saves
}

/// Deleting a slot that does not exist is not an error.
pub fn delete_save(dir: &Path, slot: &str) -> Result<()> {
    let path = save_path(dir, slot);
    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}
