//! Enumeration types used throughout the rules engine.

use serde::{Deserialize, Serialize};

/// The two players.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Allied,
    Japanese,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Allied => Side::Japanese,
            Side::Japanese => Side::Allied,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Allied => "Allied",
            Side::Japanese => "Japanese",
        }
    }
}

/// Altitude band of an air formation or aircraft group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Altitude {
    #[default]
    High,
    Low,
}

/// Weather in a single hex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    #[default]
    Clear,
    Cloud,
    /// Two or more cloud markers overlap. Nothing observes into or out of a storm.
    Storm,
}

impl Weather {
    pub fn is_cloud(self) -> bool {
        self == Weather::Cloud
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Cloud => "cloud",
            Weather::Storm => "storm",
        }
    }
}

/// Day or night turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[default]
    Day,
    Night,
}

impl TimeOfDay {
    pub fn is_night(self) -> bool {
        self == TimeOfDay::Night
    }
}

/// Ordnance carried by an armed aircraft group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Armament {
    /// General purpose bombs.
    #[serde(rename = "GP")]
    GeneralPurpose,
    /// Armor piercing bombs.
    #[serde(rename = "AP")]
    ArmorPiercing,
    Torpedo,
}

/// Kind of bombing attack declared against a ship or base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackType {
    #[default]
    Level,
    Dive,
    Torpedo,
}

/// What an air attack is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    Ship,
    Base,
}

/// Ship hull classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipType {
    #[serde(rename = "CV")]
    FleetCarrier,
    #[serde(rename = "CVL")]
    LightCarrier,
    #[serde(rename = "AV")]
    SeaplaneTender,
    #[serde(rename = "CAV")]
    AviationCruiser,
    #[serde(rename = "BB")]
    Battleship,
    #[serde(rename = "CA")]
    HeavyCruiser,
    #[serde(rename = "CL")]
    LightCruiser,
    #[serde(rename = "DD")]
    Destroyer,
    #[serde(rename = "AP")]
    Transport,
    #[serde(rename = "AO")]
    Oiler,
}

impl ShipType {
    /// Hull code as printed on the counters.
    pub fn code(self) -> &'static str {
        match self {
            ShipType::FleetCarrier => "CV",
            ShipType::LightCarrier => "CVL",
            ShipType::SeaplaneTender => "AV",
            ShipType::AviationCruiser => "CAV",
            ShipType::Battleship => "BB",
            ShipType::HeavyCruiser => "CA",
            ShipType::LightCruiser => "CL",
            ShipType::Destroyer => "DD",
            ShipType::Transport => "AP",
            ShipType::Oiler => "AO",
        }
    }

    pub fn is_carrier(self) -> bool {
        matches!(self, ShipType::FleetCarrier | ShipType::LightCarrier)
    }

    pub fn is_tender(self) -> bool {
        matches!(self, ShipType::SeaplaneTender | ShipType::AviationCruiser)
    }

    pub fn carries_planes(self) -> bool {
        self.is_carrier() || self.is_tender()
    }

    /// Capital ships as reported at observation condition 2.
    pub fn is_capital(self) -> bool {
        self.is_tender()
            || matches!(
                self,
                ShipType::Battleship | ShipType::HeavyCruiser | ShipType::LightCruiser
            )
    }
}

/// Ship condition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipStatus {
    #[default]
    Operational,
    Crippled,
    Anchored,
    Sunk,
}

/// The four boxes of an air operations tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftStatus {
    InFlight,
    JustLanded,
    Readying,
    Ready,
}

impl AircraftStatus {
    pub const ALL: [AircraftStatus; 4] = [
        AircraftStatus::InFlight,
        AircraftStatus::JustLanded,
        AircraftStatus::Readying,
        AircraftStatus::Ready,
    ];
}

/// Which kinds of planes a facility can handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneHandling {
    #[default]
    #[serde(rename = "CV")]
    Carrier,
    #[serde(rename = "AV")]
    Tender,
    #[serde(rename = "Base")]
    Airfield,
    #[serde(rename = "SP")]
    SeaplaneBase,
    #[serde(rename = "LP")]
    LandPlaneBase,
}

/// Per-turn mission role of an aircraft group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Interceptor,
    Escort,
    Bomber,
}

/// What roles a plane type may ever take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleCapability {
    /// Interceptor, escort or bomber.
    Versatile,
    /// Interceptor or escort, never bomber.
    InterceptEscortOnly,
    /// Always a bomber.
    BomberOnly,
}

/// Kind of map unit, for observation and persistence dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Base,
    TaskForce,
    AirFormation,
}

/// Fog-of-war granularity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum ObservationCondition {
    /// Not observed.
    #[default]
    Unseen = 0,
    /// Presence and unit kind only.
    Presence = 1,
    /// Aggregate counts and classes.
    Aggregate = 2,
    /// Exact per-type counts.
    Exact = 3,
}

impl ObservationCondition {
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn is_observed(self) -> bool {
        self != ObservationCondition::Unseen
    }
}

impl From<ObservationCondition> for u8 {
    fn from(condition: ObservationCondition) -> u8 {
        condition.number()
    }
}

impl TryFrom<u8> for ObservationCondition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ObservationCondition::Unseen),
            1 => Ok(ObservationCondition::Presence),
            2 => Ok(ObservationCondition::Aggregate),
            3 => Ok(ObservationCondition::Exact),
            other => Err(format!("condition number out of range: {other}")),
        }
    }
}

/// Initial cloud layout of a scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudCover {
    #[default]
    Scattered,
    Front,
    None,
}
