//! Serialisable views of the game: pieces on the map and the per-turn snapshot.

use serde::{Deserialize, Serialize};

use flattop_core::base::Base;
use flattop_core::enums::{Side, TimeOfDay, UnitKind};
use flattop_core::events::GameEvent;
use flattop_core::formation::AirFormation;
use flattop_core::naval::TaskForce;
use flattop_core::types::HexCoord;
use flattop_rules::weather::WeatherMap;

use crate::error::Result;

/// The counter a piece stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameModel {
    AirFormation(AirFormation),
    TaskForce(TaskForce),
    Base(Base),
}

impl GameModel {
    pub fn kind(&self) -> UnitKind {
        match self {
            GameModel::AirFormation(_) => UnitKind::AirFormation,
            GameModel::TaskForce(_) => UnitKind::TaskForce,
            GameModel::Base(_) => UnitKind::Base,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GameModel::AirFormation(f) => &f.name,
            GameModel::TaskForce(tf) => &tf.name,
            GameModel::Base(b) => &b.name,
        }
    }

    /// Reject a model whose counters or organisation break the game rules.
    pub fn validate(&self) -> Result<()> {
        match self {
            GameModel::AirFormation(f) => f.validate()?,
            GameModel::TaskForce(tf) => {
                tf.validate()?;
                for deck in tf.ships().iter().filter_map(|s| s.base.as_ref()) {
                    deck.validate()?;
                }
            }
            GameModel::Base(b) => b.validate()?,
        }
        Ok(())
    }

    pub fn side(&self) -> Side {
        match self {
            GameModel::AirFormation(f) => f.side,
            GameModel::TaskForce(tf) => tf.side,
            GameModel::Base(b) => b.side,
        }
    }
}

/// A piece on the mapboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub name: String,
    pub side: Side,
    pub hex: HexCoord,
    pub model: GameModel,
}

impl Piece {
    pub fn new(hex: HexCoord, model: GameModel) -> Self {
        Self {
            name: model.name().to_string(),
            side: model.side(),
            hex,
            model,
        }
    }

    /// Stable ordering: bases, then task forces, then formations, by side and id.
    pub(crate) fn sort_key(&self) -> (u8, Side, u8, String) {
        match &self.model {
            GameModel::Base(b) => (0, b.side, 0, b.name.clone()),
            GameModel::TaskForce(tf) => (1, tf.side, tf.number, String::new()),
            GameModel::AirFormation(f) => (2, f.side, f.number, String::new()),
        }
    }
}

/// Everything a client needs after one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub day: u32,
    pub hour: u8,
    pub time_of_day: TimeOfDay,
    pub pieces: Vec<Piece>,
    pub weather: WeatherMap,
    pub events: Vec<GameEvent>,
}

impl GameStateSnapshot {
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.side == side)
    }
}
