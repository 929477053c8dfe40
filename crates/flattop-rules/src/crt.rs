//! Combat Results Table.
//!
//! Every combat in the game (air-to-air, anti-aircraft, bombing) resolves the
//! same way: pick a Basic Hit Table row, bucket the attacking Air Factors into
//! a column, read a result, then let one die adjust it.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use flattop_core::constants::{ATTACK_FACTOR_COLUMNS, ATTACK_FACTOR_FLOORS, BHT_MAX, BHT_MIN};

/// One cell of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrtResult {
    /// Blank cell: the attack cannot score.
    NoEffect,
    /// Base number of hits before the die adjustment.
    Hits(u32),
    /// Starred cell: one hit on a 6, nothing otherwise.
    SixOnly,
}

const N: CrtResult = CrtResult::NoEffect;

const fn h(n: u32) -> CrtResult {
    CrtResult::Hits(n)
}

/// Rows are BHT 1..=15, columns the attack-factor buckets 1-2 .. 46+.
pub const COMBAT_RESULTS_TABLE: [[CrtResult; ATTACK_FACTOR_COLUMNS]; 15] = [
    [N, N, N, h(0), h(0), h(0), h(1), h(1), h(1), h(1), h(1), h(1), h(1), h(2)],
    [N, N, h(0), h(1), h(1), h(1), h(1), h(1), h(2), h(2), h(2), h(3), h(3), h(3)],
    [N, h(0), h(1), h(1), h(1), h(1), h(2), h(2), h(2), h(3), h(3), h(4), h(4), h(5)],
    [N, h(1), h(1), h(1), h(2), h(2), h(2), h(2), h(3), h(4), h(4), h(5), h(6), h(6)],
    [N, h(1), h(1), h(1), h(2), h(2), h(3), h(3), h(4), h(5), h(6), h(6), h(7), h(8)],
    [h(0), h(1), h(1), h(1), h(2), h(2), h(3), h(4), h(5), h(6), h(7), h(8), h(8), h(9)],
    [h(0), h(1), h(1), h(2), h(2), h(3), h(3), h(4), h(5), h(7), h(8), h(9), h(10), h(11)],
    [h(0), h(1), h(1), h(2), h(2), h(3), h(4), h(5), h(6), h(7), h(9), h(10), h(11), h(13)],
    [h(0), h(1), h(2), h(2), h(3), h(3), h(4), h(5), h(7), h(8), h(10), h(11), h(13), h(14)],
    [h(0), h(1), h(2), h(2), h(3), h(4), h(5), h(6), h(7), h(9), h(11), h(12), h(14), h(16)],
    [h(0), h(1), h(2), h(3), h(3), h(4), h(5), h(6), h(8), h(10), h(12), h(13), h(16), h(17)],
    [h(0), h(1), h(2), h(3), h(4), h(4), h(6), h(7), h(9), h(11), h(13), h(15), h(17), h(19)],
    [h(0), h(1), h(2), h(3), h(4), h(5), h(6), h(7), h(9), h(11), h(13), h(16), h(18), h(21)],
    [h(0), h(1), h(2), h(3), h(4), h(5), h(7), h(8), h(10), h(12), h(14), h(17), h(20), h(22)],
    [h(1), h(1), h(2), h(3), h(4), h(5), h(7), h(9), h(11), h(13), h(17), h(19), h(21), h(23)],
];

/// Clamp a modified rating onto the table.
pub fn clamp_bht(bht: i32) -> u8 {
    bht.clamp(BHT_MIN, BHT_MAX) as u8
}

/// Column for an attack factor, or `None` when nothing is attacking.
pub fn attack_factor_column(attack_factor: u32) -> Option<usize> {
    if attack_factor == 0 {
        return None;
    }
    ATTACK_FACTOR_FLOORS
        .iter()
        .rposition(|&floor| attack_factor >= floor)
}

/// Read the table. Pure: depends only on its arguments.
///
/// Ratings must already be clamped into 1..=15.
pub fn lookup(hit_table: u8, attack_factor: u32) -> CrtResult {
    debug_assert!(
        (BHT_MIN..=BHT_MAX).contains(&(hit_table as i32)),
        "unclamped hit table {hit_table}"
    );
    let Some(column) = attack_factor_column(attack_factor) else {
        return CrtResult::NoEffect;
    };
    match COMBAT_RESULTS_TABLE.get((hit_table as usize).wrapping_sub(1)) {
        Some(row) => row[column],
        None => CrtResult::NoEffect,
    }
}

/// Adjust a result by the die (Combat Resolution 20.3).
pub fn apply_die(result: CrtResult, die: u8) -> u32 {
    debug_assert!((1..=6).contains(&die), "die roll out of range: {die}");
    match result {
        CrtResult::NoEffect => 0,
        CrtResult::SixOnly => u32::from(die == 6),
        CrtResult::Hits(r) => match die {
            1 => r.saturating_sub(2),
            2 => r.saturating_sub(1),
            3 | 4 => r,
            5 => r + 1,
            6 => r + 2,
            _ => 0,
        },
    }
}

pub fn roll_die(rng: &mut ChaCha8Rng) -> u8 {
    rng.gen_range(1..=6)
}

/// A single resolved roll on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRoll {
    /// Clamped Basic Hit Table row.
    pub hit_table: u8,
    pub attack_factor: u32,
    pub result: CrtResult,
    pub die: u8,
    pub hits: u32,
}

/// Clamp, look up, roll one die, and adjust.
///
/// Nothing attacking means no roll is taken.
pub fn resolve(bht: i32, attack_factor: u32, rng: &mut ChaCha8Rng) -> Option<CombatRoll> {
    attack_factor_column(attack_factor)?;
    let hit_table = clamp_bht(bht);
    let result = lookup(hit_table, attack_factor);
    let die = roll_die(rng);
    let hits = apply_die(result, die);
    tracing::debug!(bht, hit_table, attack_factor, ?result, die, hits, "combat roll");
    Some(CombatRoll {
        hit_table,
        attack_factor,
        result,
        die,
        hits,
    })
}
