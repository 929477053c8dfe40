//! Fundamental map and time types.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH, DAWN_HOUR, DUSK_HOUR, HOURS_PER_DAY};
use crate::enums::TimeOfDay;

/// Axial hex coordinate (q, r) on the mapboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCoord(pub IVec2);

/// Unit steps for the six hex directions, numbered 1..=6 from East counter-clockwise.
const DIRECTIONS: [IVec2; 6] = [
    IVec2::new(1, 0),
    IVec2::new(1, -1),
    IVec2::new(0, -1),
    IVec2::new(-1, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
];

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self(IVec2::new(q, r))
    }

    pub fn q(&self) -> i32 {
        self.0.x
    }

    pub fn r(&self) -> i32 {
        self.0.y
    }

    /// Hex distance (number of steps) to another hex.
    pub fn distance(&self, other: &HexCoord) -> u32 {
        let d = self.0 - other.0;
        ((d.x.abs() + d.y.abs() + (d.x + d.y).abs()) / 2) as u32
    }

    /// The hex `steps` away in `direction` (1..=6, wrapping).
    pub fn step(&self, direction: u8, steps: u32) -> HexCoord {
        let idx = (direction.max(1) as usize - 1) % DIRECTIONS.len();
        HexCoord(self.0 + DIRECTIONS[idx] * steps as i32)
    }

    pub fn is_on_board(&self) -> bool {
        (0..BOARD_WIDTH).contains(&self.q()) && (0..BOARD_HEIGHT).contains(&self.r())
    }
}

/// Game clock. One turn is one hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    /// Day of the operation, starting at 1.
    pub day: u32,
    /// Hour of day, 0..=23.
    pub hour: u8,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            day: 1,
            hour: DAWN_HOUR,
        }
    }
}

impl GameClock {
    pub fn new(day: u32, hour: u8) -> Self {
        Self {
            day,
            hour: hour % HOURS_PER_DAY,
        }
    }

    /// Advance one hour, rolling over to the next day at midnight.
    pub fn advance(&mut self) {
        self.hour += 1;
        if self.hour >= HOURS_PER_DAY {
            self.hour = 0;
            self.day += 1;
        }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        if (DAWN_HOUR..DUSK_HOUR).contains(&self.hour) {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        }
    }
}
