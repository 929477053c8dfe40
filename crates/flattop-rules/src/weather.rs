//! Weather: wind sectors and drifting cloud markers.
//!
//! A hex under one marker is Cloud, under two or more it is Storm. Winds are
//! re-rolled every six hours and clouds drift one hex with their sector's wind
//! every even hour.

use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flattop_core::constants::{
    CLOUD_MOVE_INTERVAL, SCATTERED_MARKERS_PER_SECTOR, SECTOR_CENTERS, STORM_MARKER_COUNT,
    WEATHER_SECTORS, WIND_CHANGE_INTERVAL,
};
use flattop_core::enums::{CloudCover, Weather};
use flattop_core::types::HexCoord;

use crate::crt::roll_die;

/// One cloud marker on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudMarker {
    /// Weather sector 1..=8 whose wind moves this marker.
    pub sector: u8,
    pub hex: HexCoord,
}

impl CloudMarker {
    /// Drift one hex. Markers never leave the board.
    fn drift(&mut self, direction: u8) {
        let next = self.hex.step(direction, 1);
        if next.is_on_board() {
            self.hex = next;
        }
    }
}

/// All weather state for the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherMap {
    /// Wind direction 1..=6 per sector.
    pub winds: [u8; WEATHER_SECTORS],
    pub clouds: Vec<CloudMarker>,
}

impl Default for WeatherMap {
    fn default() -> Self {
        Self {
            winds: [1; WEATHER_SECTORS],
            clouds: Vec::new(),
        }
    }
}

fn sector_center(sector: u8) -> HexCoord {
    let idx = (sector.max(1) as usize - 1) % WEATHER_SECTORS;
    let (q, r) = SECTOR_CENTERS[idx];
    HexCoord::new(q, r)
}

fn rotate_clockwise(direction: u8) -> u8 {
    (direction + 4) % 6 + 1
}

fn rotate_counter_clockwise(direction: u8) -> u8 {
    direction % 6 + 1
}

impl WeatherMap {
    /// Initial layout for a scenario's cloud cover.
    pub fn generate(cover: CloudCover, rng: &mut ChaCha8Rng) -> Self {
        let mut map = WeatherMap::default();
        for sector in 1..=WEATHER_SECTORS as u8 {
            let center = sector_center(sector);
            match cover {
                CloudCover::None => {}
                CloudCover::Scattered => {
                    for _ in 0..SCATTERED_MARKERS_PER_SECTOR {
                        let die = roll_die(rng);
                        map.place_cloud_patch(sector, center, die, die);
                    }
                }
                CloudCover::Front => {
                    let die = roll_die(rng);
                    for anchor in [center, center.step(2, 5), center.step(5, 5)] {
                        map.place_cloud_patch(sector, anchor, die, die);
                    }
                }
            }
        }
        tracing::debug!(?cover, markers = map.clouds.len(), "weather generated");
        map
    }

    /// Drift a primary marker from `anchor` and surround it with two rings.
    fn place_cloud_patch(&mut self, sector: u8, anchor: HexCoord, direction: u8, steps: u8) {
        let mut primary = CloudMarker { sector, hex: anchor };
        for _ in 0..steps {
            primary.drift(direction);
        }
        self.clouds.push(primary);
        for ring in 1..=2 {
            for dir in 1..=6 {
                let hex = primary.hex.step(dir, ring);
                if hex.is_on_board() {
                    self.clouds.push(CloudMarker { sector, hex });
                }
            }
        }
    }

    pub fn add_cloud(&mut self, sector: u8, hex: HexCoord) {
        self.clouds.push(CloudMarker { sector, hex });
    }

    pub fn markers_at(&self, hex: HexCoord) -> usize {
        self.clouds.iter().filter(|c| c.hex == hex).count()
    }

    pub fn weather_at(&self, hex: HexCoord) -> Weather {
        match self.markers_at(hex) {
            0 => Weather::Clear,
            n if n >= STORM_MARKER_COUNT => Weather::Storm,
            _ => Weather::Cloud,
        }
    }

    pub fn is_storm(&self, hex: HexCoord) -> bool {
        self.weather_at(hex) == Weather::Storm
    }

    pub fn wind(&self, sector: u8) -> u8 {
        let idx = (sector.max(1) as usize - 1) % WEATHER_SECTORS;
        self.winds[idx]
    }

    /// Re-roll every sector's wind on hours 0, 6, 12 and 18.
    ///
    /// 4-5 veers one direction, 6 backs one direction. Returns whether the
    /// phase ran.
    pub fn wind_phase(&mut self, hour: u8, rng: &mut ChaCha8Rng) -> bool {
        if hour % WIND_CHANGE_INTERVAL != 0 {
            return false;
        }
        for (idx, wind) in self.winds.iter_mut().enumerate() {
            let die = roll_die(rng);
            let before = *wind;
            *wind = match die {
                4 | 5 => rotate_counter_clockwise(*wind),
                6 => rotate_clockwise(*wind),
                _ => *wind,
            };
            tracing::debug!(sector = idx + 1, die, before, after = *wind, "wind roll");
        }
        true
    }

    /// Drift every cloud one hex with its sector's wind on even hours.
    pub fn cloud_phase(&mut self, hour: u8) -> bool {
        if hour % CLOUD_MOVE_INTERVAL != 0 {
            return false;
        }
        let winds = self.winds;
        for cloud in &mut self.clouds {
            let idx = (cloud.sector.max(1) as usize - 1) % WEATHER_SECTORS;
            cloud.drift(winds[idx]);
        }
        true
    }
}
