//! Rule constants and tuning parameters.

// --- Combat results ---

/// Lowest Basic Hit Table row.
pub const BHT_MIN: i32 = 1;

/// Highest Basic Hit Table row.
pub const BHT_MAX: i32 = 15;

/// Number of attack-factor columns on the Combat Results Table.
pub const ATTACK_FACTOR_COLUMNS: usize = 14;

/// Inclusive lower bound of each attack-factor column. The last column is open-ended.
pub const ATTACK_FACTOR_FLOORS: [u32; ATTACK_FACTOR_COLUMNS] =
    [1, 3, 5, 7, 9, 11, 13, 16, 21, 26, 31, 36, 41, 46];

// --- Air-to-air ---

/// BHT reduction for interceptors/escorts that decline to expend a range factor.
pub const NO_RANGE_EXPENDED_PENALTY: i32 = 6;

/// BHT reduction in a cloud hex.
pub const CLOUD_PENALTY: i32 = 1;

/// BHT reduction at night.
pub const NIGHT_PENALTY: i32 = 2;

/// BHT reduction for an armed fighter type.
pub const ARMED_FIGHTER_PENALTY: i32 = 6;

/// Interceptor to escort ratio (and vice versa) that decides the bomber stage.
pub const ESCORT_RATIO: u32 = 2;

// --- Anti-aircraft and air attack ---

/// Basic Hit Table for anti-aircraft fire before weather modifiers.
pub const AA_BASE_BHT: i32 = 4;

/// BHT bonus against a crippled ship.
pub const CRIPPLED_BONUS: i32 = 2;

/// BHT bonus against an anchored ship.
pub const ANCHORED_BONUS: i32 = 2;

// --- Observation ---

/// Highest modified Search Table roll that still observes.
pub const SEARCH_SUCCESS_MAX: u8 = 5;

/// Furthest hex distance covered by the observation table (columns 0..=3).
pub const OBSERVATION_MAX_DISTANCE: u32 = 3;

/// Furthest hex distance at which radar reports high-altitude air.
pub const RADAR_MAX_DISTANCE: u32 = 2;

// --- Organisation ---

/// Highest air formation counter number.
pub const AIR_FORMATION_MAX: u8 = 35;

/// Task force boxes per side on the operations chart.
pub const TASK_FORCE_BOXES: u8 = 14;

/// Highest task force number that may hold plane-carrying ships.
pub const PLANE_CARRIER_TF_MAX: u8 = 9;

/// Ship limit for an Allied task force.
pub const MAX_SHIPS_ALLIED: usize = 15;

/// Ship limit for a Japanese task force.
pub const MAX_SHIPS_JAPANESE: usize = 10;

/// Air factors a Japanese battleship may carry.
pub const JAPANESE_BB_AIR_FACTORS: u32 = 1;

// --- Time and weather ---

/// Hours in a game day. One turn is one hour.
pub const HOURS_PER_DAY: u8 = 24;

/// First daylight hour.
pub const DAWN_HOUR: u8 = 6;

/// First night hour.
pub const DUSK_HOUR: u8 = 18;

/// Wind is re-rolled when the hour is a multiple of this.
pub const WIND_CHANGE_INTERVAL: u8 = 6;

/// Clouds drift when the hour is a multiple of this.
pub const CLOUD_MOVE_INTERVAL: u8 = 2;

/// Number of weather sectors on the map.
pub const WEATHER_SECTORS: usize = 8;

/// Primary cloud markers placed per sector for scattered cover.
pub const SCATTERED_MARKERS_PER_SECTOR: usize = 4;

/// Cloud markers needed in one hex to form a storm.
pub const STORM_MARKER_COUNT: usize = 2;

/// Map width in hex columns (q).
pub const BOARD_WIDTH: i32 = 100;

/// Map height in hex rows (r).
pub const BOARD_HEIGHT: i32 = 200;

/// Centre hex (q, r) of each weather sector, sectors 1..=8.
pub const SECTOR_CENTERS: [(i32, i32); WEATHER_SECTORS] = [
    (9, 11),
    (29, 11),
    (49, 11),
    (69, 11),
    (9, 33),
    (29, 33),
    (49, 33),
    (69, 33),
];
