//! Aircraft types, their rated combat data, and aircraft groups.
//!
//! An `AircraftGroup` is a stack of Air Factors of one plane type. Ratings are
//! immutable per type and looked up from the catalogue, never stored.

use serde::{Deserialize, Serialize};

use crate::enums::{Altitude, Armament, AttackTarget, AttackType, RoleCapability, Side};

/// Every plane type in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AircraftType {
    // Allied
    #[serde(rename = "A-20")]
    A20,
    Avenger,
    Beaufighter,
    Beaufort,
    #[serde(rename = "B-17")]
    B17,
    #[serde(rename = "B-25")]
    B25,
    #[serde(rename = "B-26")]
    B26,
    Catalina,
    Dauntless,
    Devastator,
    Hudson,
    #[serde(rename = "P-38")]
    P38,
    #[serde(rename = "P-39")]
    P39,
    #[serde(rename = "P-40")]
    P40,
    Wildcat,
    // Japanese
    Betty,
    Dave,
    Emily,
    Judy,
    Jake,
    Kate,
    Mavis,
    Nell,
    Pete,
    Rufe,
    Val,
    Zero,
}

impl AircraftType {
    pub const ALL: [AircraftType; 27] = [
        AircraftType::A20,
        AircraftType::Avenger,
        AircraftType::Beaufighter,
        AircraftType::Beaufort,
        AircraftType::B17,
        AircraftType::B25,
        AircraftType::B26,
        AircraftType::Catalina,
        AircraftType::Dauntless,
        AircraftType::Devastator,
        AircraftType::Hudson,
        AircraftType::P38,
        AircraftType::P39,
        AircraftType::P40,
        AircraftType::Wildcat,
        AircraftType::Betty,
        AircraftType::Dave,
        AircraftType::Emily,
        AircraftType::Judy,
        AircraftType::Jake,
        AircraftType::Kate,
        AircraftType::Mavis,
        AircraftType::Nell,
        AircraftType::Pete,
        AircraftType::Rufe,
        AircraftType::Val,
        AircraftType::Zero,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AircraftType::A20 => "A-20",
            AircraftType::Avenger => "Avenger",
            AircraftType::Beaufighter => "Beaufighter",
            AircraftType::Beaufort => "Beaufort",
            AircraftType::B17 => "B-17",
            AircraftType::B25 => "B-25",
            AircraftType::B26 => "B-26",
            AircraftType::Catalina => "Catalina",
            AircraftType::Dauntless => "Dauntless",
            AircraftType::Devastator => "Devastator",
            AircraftType::Hudson => "Hudson",
            AircraftType::P38 => "P-38",
            AircraftType::P39 => "P-39",
            AircraftType::P40 => "P-40",
            AircraftType::Wildcat => "Wildcat",
            AircraftType::Betty => "Betty",
            AircraftType::Dave => "Dave",
            AircraftType::Emily => "Emily",
            AircraftType::Judy => "Judy",
            AircraftType::Jake => "Jake",
            AircraftType::Kate => "Kate",
            AircraftType::Mavis => "Mavis",
            AircraftType::Nell => "Nell",
            AircraftType::Pete => "Pete",
            AircraftType::Rufe => "Rufe",
            AircraftType::Val => "Val",
            AircraftType::Zero => "Zero",
        }
    }

    pub fn side(self) -> Side {
        match self {
            AircraftType::A20
            | AircraftType::Avenger
            | AircraftType::Beaufighter
            | AircraftType::Beaufort
            | AircraftType::B17
            | AircraftType::B25
            | AircraftType::B26
            | AircraftType::Catalina
            | AircraftType::Dauntless
            | AircraftType::Devastator
            | AircraftType::Hudson
            | AircraftType::P38
            | AircraftType::P39
            | AircraftType::P40
            | AircraftType::Wildcat => Side::Allied,
            _ => Side::Japanese,
        }
    }

    /// Missions this type may fly (rule 8.12.1).
    ///
    /// Rufe is a float fighter with a fighter-class air-to-air rating and is
    /// treated as versatile.
    pub fn capability(self) -> RoleCapability {
        match self {
            AircraftType::Zero
            | AircraftType::P38
            | AircraftType::P39
            | AircraftType::P40
            | AircraftType::Beaufighter
            | AircraftType::Wildcat
            | AircraftType::Rufe => RoleCapability::Versatile,
            AircraftType::Dave | AircraftType::Jake | AircraftType::Pete => {
                RoleCapability::InterceptEscortOnly
            }
            _ => RoleCapability::BomberOnly,
        }
    }

    /// Fighters whose air-to-air rating collapses while carrying ordnance.
    pub fn armed_penalty_applies(self) -> bool {
        matches!(
            self,
            AircraftType::Wildcat
                | AircraftType::P38
                | AircraftType::P39
                | AircraftType::P40
                | AircraftType::Beaufighter
                | AircraftType::Zero
                | AircraftType::Rufe
        )
    }

    /// Rated movement, endurance and combat data.
    pub fn profile(self) -> AircraftProfile {
        let (move_factor, range_factor, row) = match self {
            AircraftType::A20 => (9, 6, [3, 5, 2, 8, 3, 0, 0, 0, 1, 2, 5, 0, 0, 0]),
            AircraftType::Avenger => (7, 8, [3, 4, 2, 6, 2, 0, 0, 0, 1, 2, 5, 0, 0, 6]),
            AircraftType::Beaufighter => (9, 6, [6, 0, 0, 5, 0, 0, 0, 0, 0, 1, 3, 0, 0, 0]),
            AircraftType::Beaufort => (7, 8, [3, 4, 2, 6, 2, 0, 0, 0, 1, 2, 6, 0, 0, 7]),
            AircraftType::B17 => (8, 12, [8, 13, 5, 0, 0, 0, 0, 0, 2, 0, 0, 0, 0, 0]),
            AircraftType::B25 => (9, 7, [4, 8, 3, 11, 5, 0, 0, 0, 1, 3, 7, 0, 0, 0]),
            AircraftType::B26 => (10, 6, [4, 6, 2, 10, 4, 0, 0, 0, 1, 2, 5, 0, 0, 5]),
            AircraftType::Catalina => (6, 20, [4, 6, 2, 9, 3, 0, 0, 0, 1, 2, 7, 0, 0, 10]),
            AircraftType::Dauntless => (9, 6, [3, 3, 1, 5, 1, 6, 2, 0, 0, 2, 5, 2, 7, 0]),
            AircraftType::Devastator => (6, 5, [2, 3, 1, 5, 2, 0, 0, 0, 0, 1, 5, 0, 0, 6]),
            AircraftType::Hudson => (7, 10, [3, 3, 1, 6, 2, 0, 0, 0, 1, 1, 4, 0, 0, 0]),
            AircraftType::P38 => (12, 5, [7, 0, 0, 5, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
            AircraftType::P39 => (11, 5, [6, 0, 0, 5, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
            AircraftType::P40 => (11, 5, [7, 0, 0, 4, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
            AircraftType::Wildcat => (8, 6, [9, 0, 0, 4, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
            AircraftType::Betty => (9, 10, [3, 4, 2, 6, 2, 0, 0, 0, 1, 2, 5, 0, 0, 9]),
            AircraftType::Dave => (4, 6, [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            AircraftType::Emily => (9, 24, [6, 8, 3, 9, 4, 0, 0, 0, 1, 3, 7, 0, 0, 15]),
            AircraftType::Judy => (11, 6, [3, 2, 1, 3, 1, 4, 2, 0, 0, 1, 5, 2, 7, 0]),
            AircraftType::Jake => (5, 9, [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            AircraftType::Kate => (7, 7, [2, 4, 2, 6, 2, 0, 0, 0, 1, 2, 6, 0, 0, 10]),
            AircraftType::Mavis => (8, 23, [5, 6, 2, 7, 3, 0, 0, 0, 1, 2, 6, 0, 0, 15]),
            AircraftType::Nell => (8, 8, [3, 4, 2, 6, 2, 0, 0, 0, 1, 2, 4, 0, 0, 9]),
            AircraftType::Pete => (4, 6, [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]),
            AircraftType::Rufe => (9, 6, [6, 0, 0, 3, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
            AircraftType::Val => (9, 7, [2, 2, 1, 3, 1, 4, 2, 0, 0, 1, 5, 2, 7, 0]),
            AircraftType::Zero => (10, 8, [9, 0, 0, 3, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
        };
        AircraftProfile {
            move_factor,
            range_factor,
            combat: AircraftCombatData::from_row(row),
        }
    }

    pub fn combat_data(self) -> AircraftCombatData {
        self.profile().combat
    }
}

impl std::fmt::Display for AircraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rated movement, endurance and combat data for one plane type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AircraftProfile {
    /// Hexes per turn.
    pub move_factor: u32,
    /// Turns aloft before running dry.
    pub range_factor: u32,
    pub combat: AircraftCombatData,
}

/// Basic Hit Table ratings of a plane type, one per combat category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftCombatData {
    pub air_to_air: u8,
    pub level_high_base_gp: u8,
    pub level_high_base_ap: u8,
    pub level_low_base_gp: u8,
    pub level_low_base_ap: u8,
    pub dive_base_gp: u8,
    pub dive_base_ap: u8,
    pub level_high_ship_gp: u8,
    pub level_high_ship_ap: u8,
    pub level_low_ship_gp: u8,
    pub level_low_ship_ap: u8,
    pub dive_ship_gp: u8,
    pub dive_ship_ap: u8,
    pub torpedo_ship: u8,
}

impl AircraftCombatData {
    /// Build from a row of the aircraft data card, in card order.
    pub const fn from_row(row: [u8; 14]) -> Self {
        Self {
            air_to_air: row[0],
            level_high_base_gp: row[1],
            level_high_base_ap: row[2],
            level_low_base_gp: row[3],
            level_low_base_ap: row[4],
            dive_base_gp: row[5],
            dive_base_ap: row[6],
            level_high_ship_gp: row[7],
            level_high_ship_ap: row[8],
            level_low_ship_gp: row[9],
            level_low_ship_ap: row[10],
            dive_ship_gp: row[11],
            dive_ship_ap: row[12],
            torpedo_ship: row[13],
        }
    }

    /// Rating for a bombing attack. Zero when the combination cannot be flown
    /// (torpedoes against a base, bombs on a torpedo run, and so on).
    pub fn bombing(
        &self,
        attack: AttackType,
        altitude: Altitude,
        target: AttackTarget,
        armament: Armament,
    ) -> u8 {
        use AttackTarget::{Base, Ship};
        use Armament::{ArmorPiercing as Ap, GeneralPurpose as Gp};

        match (attack, armament) {
            (AttackType::Torpedo, Armament::Torpedo) => match target {
                Ship => self.torpedo_ship,
                Base => 0,
            },
            (AttackType::Torpedo, _) | (_, Armament::Torpedo) => 0,
            (AttackType::Dive, bomb) => match (target, bomb) {
                (Base, Gp) => self.dive_base_gp,
                (Base, _) => self.dive_base_ap,
                (Ship, Gp) => self.dive_ship_gp,
                (Ship, _) => self.dive_ship_ap,
            },
            (AttackType::Level, bomb) => match (altitude, target, bomb) {
                (Altitude::High, Base, Gp) => self.level_high_base_gp,
                (Altitude::High, Base, Ap) => self.level_high_base_ap,
                (Altitude::Low, Base, Gp) => self.level_low_base_gp,
                (Altitude::Low, Base, Ap) => self.level_low_base_ap,
                (Altitude::High, Ship, Gp) => self.level_high_ship_gp,
                (Altitude::High, Ship, Ap) => self.level_high_ship_ap,
                (Altitude::Low, Ship, Gp) => self.level_low_ship_gp,
                (Altitude::Low, Ship, Ap) => self.level_low_ship_ap,
                (_, _, Armament::Torpedo) => 0,
            },
        }
    }
}

/// A stack of Air Factors of one plane type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftGroup {
    pub aircraft_type: AircraftType,
    /// Air Factors in the stack.
    pub count: u32,
    pub armament: Option<Armament>,
    pub altitude: Altitude,
    pub move_factor: u32,
    /// Rated endurance in turns.
    pub range_factor: u32,
    /// Turns left before the stack runs dry.
    pub range_remaining: u32,
    /// Declared bombing attack, if any.
    #[serde(default)]
    pub attack_type: Option<AttackType>,
    /// Set once the stack has paid its range factor for air-to-air combat this turn.
    #[serde(default)]
    pub range_spent_this_turn: bool,
}

impl AircraftGroup {
    /// A fresh, unarmed stack at full range.
    pub fn new(aircraft_type: AircraftType, count: u32) -> Self {
        let profile = aircraft_type.profile();
        Self {
            aircraft_type,
            count,
            armament: None,
            altitude: Altitude::High,
            move_factor: profile.move_factor,
            range_factor: profile.range_factor,
            range_remaining: profile.range_factor,
            attack_type: None,
            range_spent_this_turn: false,
        }
    }

    pub fn armed(mut self, armament: Armament) -> Self {
        self.armament = Some(armament);
        self
    }

    pub fn at(mut self, altitude: Altitude) -> Self {
        self.altitude = altitude;
        self
    }

    pub fn is_armed(&self) -> bool {
        self.armament.is_some()
    }

    pub fn combat_data(&self) -> AircraftCombatData {
        self.aircraft_type.combat_data()
    }

    /// Remove up to `hits` Air Factors. Returns how many were removed.
    pub fn apply_hits(&mut self, hits: u32) -> u32 {
        let lost = hits.min(self.count);
        self.count -= lost;
        lost
    }

    /// Burn one range factor.
    pub fn expend_range(&mut self) {
        self.range_remaining = self.range_remaining.saturating_sub(1);
    }

    /// Pay the air-to-air range factor. Only the first call in a turn costs range.
    pub fn expend_combat_range(&mut self) -> bool {
        if self.range_spent_this_turn {
            return false;
        }
        self.range_spent_this_turn = true;
        self.expend_range();
        true
    }

    /// Drop ordnance and any declared attack.
    pub fn disarm(&mut self) {
        self.armament = None;
        self.attack_type = None;
    }

    /// Refuel to the rated endurance.
    pub fn refuel(&mut self) {
        self.range_remaining = self.range_factor;
    }

    /// Eliminated stacks leave their formation or box.
    pub fn is_spent(&self) -> bool {
        self.count == 0 || self.range_remaining == 0
    }

    /// Split `count` Air Factors off into a new stack with the same state.
    pub(crate) fn split_off(&mut self, count: u32) -> AircraftGroup {
        let taken = count.min(self.count);
        self.count -= taken;
        AircraftGroup {
            count: taken,
            ..self.clone()
        }
    }
}
