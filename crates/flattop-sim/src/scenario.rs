//! Scenario setup: a Coral Sea style opening with two carrier groups a side.

use flattop_core::aircraft::{AircraftGroup, AircraftType};
use flattop_core::base::{AirOperationsConfig, Base};
use flattop_core::commands::PlayerCommand;
use flattop_core::enums::*;
use flattop_core::naval::{Ship, TaskForce};
use flattop_core::types::HexCoord;

use crate::engine::GameEngine;
use crate::error::Result;
use crate::state::{GameModel, Piece};

pub const PORT_MORESBY: HexCoord = HexCoord::new(20, 90);
pub const RABAUL: HexCoord = HexCoord::new(60, 20);
pub const TULAGI: HexCoord = HexCoord::new(55, 45);
pub const TF17_START: HexCoord = HexCoord::new(40, 60);
pub const TF11_START: HexCoord = HexCoord::new(41, 62);
/// Nine hexes east of TF 17: inside a Val's movement factor.
pub const KIDO_BUTAI_START: HexCoord = HexCoord::new(49, 60);
pub const TF2_START: HexCoord = HexCoord::new(50, 59);

fn fleet_deck(name: &str, capacity: u32) -> AirOperationsConfig {
    AirOperationsConfig {
        name: name.to_string(),
        maximum_capacity: capacity,
        launch_factor_min: 3,
        launch_factor_normal: 4,
        launch_factor_max: 5,
        ready_factors: 4,
        plane_handling: PlaneHandling::Carrier,
        anti_air_factor: 0,
    }
}

fn airfield(name: &str, handling: PlaneHandling, launch: u32, anti_air: u32) -> AirOperationsConfig {
    AirOperationsConfig {
        name: name.to_string(),
        maximum_capacity: 30,
        launch_factor_min: launch / 2,
        launch_factor_normal: launch * 3 / 4,
        launch_factor_max: launch,
        ready_factors: launch,
        plane_handling: handling,
        anti_air_factor: anti_air,
    }
}

fn fleet_carrier(name: &str, side: Side, groups: Vec<AircraftGroup>) -> Ship {
    let mut ship = Ship::carrier(name, ShipType::FleetCarrier, side, fleet_deck(name, 9))
        .with_factors(4, 3, 8);
    if let Some(deck) = ship.base.as_mut() {
        for group in groups {
            deck.station(AircraftStatus::Ready, group);
        }
    }
    ship
}

fn escort(name: &str, ship_type: ShipType) -> Ship {
    match ship_type {
        ShipType::HeavyCruiser => Ship::new(name, ship_type).with_factors(2, 3, 5),
        _ => Ship::new(name, ship_type).with_factors(1, 4, 2),
    }
}

fn task_force(
    number: u8,
    name: &str,
    side: Side,
    radar: bool,
    ships: Vec<Ship>,
) -> Result<TaskForce> {
    let mut tf = TaskForce::new(number, side);
    tf.name = name.to_string();
    tf.radar = radar;
    for ship in ships {
        tf.add_ship(ship)?;
    }
    Ok(tf)
}

/// Every piece of the opening position.
pub fn coral_sea() -> Result<Vec<Piece>> {
    use AircraftType::*;
    use Armament::*;

    let mut moresby = Base::new(
        "Port Moresby",
        Side::Allied,
        airfield("Port Moresby", PlaneHandling::Airfield, 8, 3),
    );
    moresby.station(AircraftStatus::Ready, AircraftGroup::new(B17, 4).armed(GeneralPurpose));
    moresby.station(AircraftStatus::Ready, AircraftGroup::new(P39, 6));
    moresby.station(AircraftStatus::Readying, AircraftGroup::new(B26, 3));

    let tf17 = task_force(
        7,
        "Task Force 17",
        Side::Allied,
        true,
        vec![
            fleet_carrier(
                "Yorktown",
                Side::Allied,
                vec![
                    AircraftGroup::new(Wildcat, 4),
                    AircraftGroup::new(Dauntless, 4).armed(ArmorPiercing),
                    AircraftGroup::new(Devastator, 2).armed(Torpedo),
                ],
            ),
            escort("Astoria", ShipType::HeavyCruiser),
            escort("Portland", ShipType::HeavyCruiser),
            escort("Hammann", ShipType::Destroyer),
            escort("Morris", ShipType::Destroyer),
        ],
    )?;
    let tf11 = task_force(
        1,
        "Task Force 11",
        Side::Allied,
        true,
        vec![
            fleet_carrier(
                "Lexington",
                Side::Allied,
                vec![
                    AircraftGroup::new(Wildcat, 4),
                    AircraftGroup::new(Dauntless, 5).armed(GeneralPurpose),
                ],
            ),
            escort("Minneapolis", ShipType::HeavyCruiser),
            escort("Phelps", ShipType::Destroyer),
        ],
    )?;

    let mut rabaul = Base::new(
        "Rabaul",
        Side::Japanese,
        airfield("Rabaul", PlaneHandling::Airfield, 8, 4),
    );
    rabaul.station(AircraftStatus::Ready, AircraftGroup::new(Betty, 6).armed(GeneralPurpose));
    rabaul.station(AircraftStatus::Ready, AircraftGroup::new(Zero, 4));
    let mut tulagi = Base::new(
        "Tulagi",
        Side::Japanese,
        airfield("Tulagi", PlaneHandling::SeaplaneBase, 2, 1),
    );
    tulagi.station(AircraftStatus::Ready, AircraftGroup::new(Mavis, 2));

    let kido_butai = task_force(
        1,
        "Carrier Striking Force",
        Side::Japanese,
        false,
        vec![
            fleet_carrier(
                "Shokaku",
                Side::Japanese,
                vec![
                    AircraftGroup::new(Zero, 4),
                    AircraftGroup::new(Val, 4).armed(ArmorPiercing),
                    AircraftGroup::new(Kate, 3).armed(Torpedo),
                ],
            ),
            escort("Myoko", ShipType::HeavyCruiser),
            escort("Ariake", ShipType::Destroyer),
        ],
    )?;
    let tf2 = task_force(
        2,
        "Carrier Division 5",
        Side::Japanese,
        false,
        vec![
            fleet_carrier(
                "Zuikaku",
                Side::Japanese,
                vec![
                    AircraftGroup::new(Zero, 4),
                    AircraftGroup::new(Kate, 4).armed(Torpedo),
                ],
            ),
            escort("Haguro", ShipType::HeavyCruiser),
            escort("Yugure", ShipType::Destroyer),
        ],
    )?;

    Ok(vec![
        Piece::new(PORT_MORESBY, GameModel::Base(moresby)),
        Piece::new(TF17_START, GameModel::TaskForce(tf17)),
        Piece::new(TF11_START, GameModel::TaskForce(tf11)),
        Piece::new(RABAUL, GameModel::Base(rabaul)),
        Piece::new(TULAGI, GameModel::Base(tulagi)),
        Piece::new(KIDO_BUTAI_START, GameModel::TaskForce(kido_butai)),
        Piece::new(TF2_START, GameModel::TaskForce(tf2)),
    ])
}

/// Spawn the opening position into an engine.
pub fn setup_coral_sea(engine: &mut GameEngine) -> Result<()> {
    for piece in coral_sea()? {
        engine.spawn_piece(piece);
    }
    Ok(())
}

/// Dawn orders: Yorktown flies combat air patrol while Shokaku's strike goes
/// straight for her.
pub fn dawn_strike() -> Vec<PlayerCommand> {
    vec![
        PlayerCommand::LaunchFormation {
            side: Side::Allied,
            base: "Yorktown Base".to_string(),
            number: 1,
            aircraft: vec![(AircraftType::Wildcat, 4)],
            altitude: Altitude::High,
        },
        PlayerCommand::PlanInterception {
            side: Side::Allied,
            hex: TF17_START,
            altitude: Altitude::High,
            bomber_targeting: Vec::new(),
            merge_on_advantage: true,
            decline_range: false,
        },
        PlayerCommand::LaunchFormation {
            side: Side::Japanese,
            base: "Shokaku Base".to_string(),
            number: 1,
            aircraft: vec![(AircraftType::Zero, 2), (AircraftType::Val, 3)],
            altitude: Altitude::High,
        },
        PlayerCommand::MoveFormation {
            side: Side::Japanese,
            number: 1,
            to: TF17_START,
        },
        PlayerCommand::AttackShip {
            side: Side::Japanese,
            formation: 1,
            task_force: 7,
            ship: "Yorktown".to_string(),
            attack_type: AttackType::Dive,
        },
    ]
}
