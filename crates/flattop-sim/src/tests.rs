//! Tests for the turn engine, command handling, combat phases and save slots.

use flattop_core::aircraft::{AircraftGroup, AircraftType};
use flattop_core::base::{AirOperationsConfig, Base};
use flattop_core::commands::PlayerCommand;
use flattop_core::error::TrackerError;
use flattop_core::enums::*;
use flattop_core::events::GameEvent;
use flattop_core::formation::AirFormation;
use flattop_core::naval::{Ship, TaskForce};
use flattop_core::types::HexCoord;

use crate::config::SimConfig;
use crate::engine::GameEngine;
use crate::error::SimError;
use crate::persistence;
use crate::scenario::{self, RABAUL, TF17_START};
use crate::state::{GameModel, GameStateSnapshot, Piece};

fn clear_skies(seed: u64) -> GameEngine {
    GameEngine::new(&SimConfig {
        seed,
        cloud_cover: CloudCover::None,
        ..Default::default()
    })
}

fn coral_sea(seed: u64) -> GameEngine {
    let mut engine = GameEngine::new(&SimConfig {
        seed,
        ..Default::default()
    });
    scenario::setup_coral_sea(&mut engine).unwrap();
    engine
}

fn airfield(name: &str, side: Side, launch: u32, anti_air: u32) -> Base {
    Base::new(
        name,
        side,
        AirOperationsConfig {
            name: name.to_string(),
            maximum_capacity: 20,
            launch_factor_min: launch,
            launch_factor_normal: launch,
            launch_factor_max: launch,
            ready_factors: launch,
            plane_handling: PlaneHandling::Airfield,
            anti_air_factor: anti_air,
        },
    )
}

fn formation_piece(number: u8, side: Side, hex: HexCoord, groups: Vec<AircraftGroup>) -> Piece {
    let mut formation = AirFormation::new(number, side).unwrap();
    for group in groups {
        formation.add_group(group);
    }
    Piece::new(hex, GameModel::AirFormation(formation))
}

fn formation<'a>(snap: &'a GameStateSnapshot, side: Side, number: u8) -> Option<&'a AirFormation> {
    snap.pieces.iter().find_map(|p| match &p.model {
        GameModel::AirFormation(f) if f.side == side && f.number == number => Some(f),
        _ => None,
    })
}

fn base<'a>(snap: &'a GameStateSnapshot, name: &str) -> &'a Base {
    snap.pieces
        .iter()
        .find_map(|p| match &p.model {
            GameModel::Base(b) if b.name == name => Some(b),
            _ => None,
        })
        .unwrap()
}

fn task_force<'a>(snap: &'a GameStateSnapshot, side: Side, number: u8) -> &'a TaskForce {
    snap.pieces
        .iter()
        .find_map(|p| match &p.model {
            GameModel::TaskForce(tf) if tf.side == side && tf.number == number => Some(tf),
            _ => None,
        })
        .unwrap()
}

fn rejections(snap: &GameStateSnapshot) -> usize {
    snap.events
        .iter()
        .filter(|e| matches!(e, GameEvent::CommandRejected { .. }))
        .count()
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = coral_sea(12345);
    let mut engine_b = coral_sea(12345);
    engine_a.queue_commands(scenario::dawn_strike());
    engine_b.queue_commands(scenario::dawn_strike());

    for _ in 0..24 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = coral_sea(111);
    let mut engine_b = coral_sea(222);

    let mut diverged = false;
    for _ in 0..24 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should lay out different weather");
}

// ---- Clock and snapshot ----

#[test]
fn test_tick_advances_one_hour() {
    let mut engine = clear_skies(1);
    let start = engine.clock();
    let snap = engine.tick();
    assert_eq!(snap.hour, start.hour + 1);
    assert_eq!(snap.day, start.day);
    assert_eq!(snap.time_of_day, TimeOfDay::Day);
}

#[test]
fn test_snapshot_pieces_are_tagged() {
    let engine = coral_sea(5);
    let json = serde_json::to_string(&engine.snapshot()).unwrap();
    assert!(json.contains("\"type\":\"TaskForce\""));
    assert!(json.contains("\"type\":\"Base\""));
    assert_eq!(engine.snapshot().pieces_of(Side::Allied).count(), 3);
    assert_eq!(engine.snapshot().pieces_of(Side::Japanese).count(), 4);
}

// ---- Air operations ----

#[test]
fn test_launch_then_land() {
    let mut engine = clear_skies(2);
    let hex = HexCoord::new(30, 30);
    let mut moresby = airfield("Moresby", Side::Allied, 8, 2);
    moresby.station(AircraftStatus::Ready, AircraftGroup::new(AircraftType::P39, 6));
    engine.spawn_piece(Piece::new(hex, GameModel::Base(moresby)));

    engine.queue_command(PlayerCommand::LaunchFormation {
        side: Side::Allied,
        base: "Moresby".to_string(),
        number: 3,
        aircraft: vec![(AircraftType::P39, 4)],
        altitude: Altitude::Low,
    });
    let snap = engine.tick();
    assert_eq!(rejections(&snap), 0);
    let f = formation(&snap, Side::Allied, 3).unwrap();
    assert_eq!(f.total_aircraft(), 4);
    assert_eq!(f.altitude, Altitude::Low);
    // One turn aloft.
    assert_eq!(f.groups[0].range_remaining, 4);
    let b = base(&snap, "Moresby");
    assert_eq!(b.tracker().count_of(AircraftStatus::Ready, AircraftType::P39), 2);
    assert_eq!(b.used_launch_factor(), 4);

    engine.queue_command(PlayerCommand::LandFormation {
        side: Side::Allied,
        number: 3,
        base: "Moresby".to_string(),
    });
    let snap = engine.tick();
    assert_eq!(rejections(&snap), 0);
    assert!(formation(&snap, Side::Allied, 3).is_none());
    let b = base(&snap, "Moresby");
    assert_eq!(b.tracker().count_of(AircraftStatus::JustLanded, AircraftType::P39), 4);
    assert_eq!(b.used_launch_factor(), 0, "budgets reset each turn");
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::FormationLanded { aircraft: 4, .. })));
}

#[test]
fn test_launch_is_capped_by_launch_factor() {
    let mut engine = clear_skies(3);
    let mut field = airfield("Field", Side::Allied, 8, 0);
    field.station(AircraftStatus::Ready, AircraftGroup::new(AircraftType::B17, 4));
    field.station(AircraftStatus::Ready, AircraftGroup::new(AircraftType::P39, 6));
    engine.spawn_piece(Piece::new(HexCoord::new(10, 10), GameModel::Base(field)));

    engine.queue_command(PlayerCommand::LaunchFormation {
        side: Side::Allied,
        base: "Field".to_string(),
        number: 1,
        aircraft: vec![(AircraftType::B17, 4), (AircraftType::P39, 6)],
        altitude: Altitude::High,
    });
    let snap = engine.tick();
    let f = formation(&snap, Side::Allied, 1).unwrap();
    assert_eq!(f.count_of(AircraftType::B17), 4);
    assert_eq!(f.count_of(AircraftType::P39), 4);
}

#[test]
fn test_carrier_deck_is_addressed_by_base_name() {
    let mut engine = coral_sea(4);
    engine.queue_command(PlayerCommand::ArmAircraft {
        side: Side::Allied,
        base: "Yorktown Base".to_string(),
        aircraft_type: AircraftType::Dauntless,
        armament: Some(Armament::GeneralPurpose),
    });
    let snap = engine.tick();
    assert_eq!(rejections(&snap), 0);
    let tf17 = task_force(&snap, Side::Allied, 7);
    let deck = tf17.bases().next().unwrap();
    let dauntless = deck
        .tracker()
        .list(AircraftStatus::Ready)
        .iter()
        .find(|g| g.aircraft_type == AircraftType::Dauntless)
        .unwrap();
    assert_eq!(dauntless.armament, Some(Armament::GeneralPurpose));
}

// ---- Rejected commands ----

#[test]
fn test_bad_orders_are_rejected_not_fatal() {
    let mut engine = coral_sea(6);
    engine.queue_commands([
        PlayerCommand::MoveFormation {
            side: Side::Allied,
            number: 9,
            to: HexCoord::new(1, 1),
        },
        PlayerCommand::ArmAircraft {
            side: Side::Allied,
            base: "Nowhere".to_string(),
            aircraft_type: AircraftType::B17,
            armament: None,
        },
        PlayerCommand::MoveTaskForce {
            side: Side::Allied,
            number: 7,
            to: HexCoord::new(40, 70),
        },
        PlayerCommand::AttackShip {
            side: Side::Japanese,
            formation: 1,
            task_force: 7,
            ship: "Yorktown".to_string(),
            attack_type: AttackType::Dive,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(rejections(&snap), 4);
    assert_eq!(snap.hour, 7);
}

#[test]
fn test_formation_numbers_are_unique_per_side() {
    let mut engine = coral_sea(7);
    let launch = |base: &str, side| PlayerCommand::LaunchFormation {
        side,
        base: base.to_string(),
        number: 2,
        aircraft: vec![(AircraftType::Zero, 1)],
        altitude: Altitude::High,
    };
    engine.queue_commands([
        launch("Shokaku Base", Side::Japanese),
        launch("Rabaul", Side::Japanese),
        launch("Yorktown Base", Side::Allied),
    ]);
    let snap = engine.tick();
    // The Allied launch has no Zeros to send; the second Japanese one is a duplicate.
    assert_eq!(rejections(&snap), 2);
    assert!(formation(&snap, Side::Japanese, 2).is_some());
}

#[test]
fn test_task_force_moves_within_movement_factor() {
    let mut engine = coral_sea(8);
    let to = TF17_START.step(1, 3);
    engine.queue_command(PlayerCommand::MoveTaskForce {
        side: Side::Allied,
        number: 7,
        to,
    });
    let snap = engine.tick();
    assert_eq!(rejections(&snap), 0);
    let piece = snap
        .pieces
        .iter()
        .find(|p| p.name == "Task Force 17")
        .unwrap();
    assert_eq!(piece.hex, to);
}

#[test]
fn test_movement_factor_is_shared_across_orders_in_a_turn() {
    let mut engine = coral_sea(9);
    let first = TF17_START.step(1, 1);
    let beyond = TF17_START.step(1, 3);
    engine.queue_commands([
        PlayerCommand::MoveTaskForce {
            side: Side::Allied,
            number: 7,
            to: first,
        },
        PlayerCommand::MoveTaskForce {
            side: Side::Allied,
            number: 7,
            to: beyond,
        },
    ]);
    let snap = engine.tick();
    assert_eq!(rejections(&snap), 1, "second leg needs two hexes but only one is left");
    let hex_of_tf17 = |snap: &GameStateSnapshot| {
        snap.pieces
            .iter()
            .find(|p| p.name == "Task Force 17")
            .map(|p| p.hex)
            .unwrap()
    };
    assert_eq!(hex_of_tf17(&snap), first);

    // A fresh turn brings a fresh movement factor.
    engine.queue_command(PlayerCommand::MoveTaskForce {
        side: Side::Allied,
        number: 7,
        to: beyond,
    });
    let snap = engine.tick();
    assert_eq!(rejections(&snap), 0);
    assert_eq!(hex_of_tf17(&snap), beyond);
}

// ---- Observation ----

#[test]
fn test_adjacent_task_forces_see_each_other() {
    let mut engine = clear_skies(9);
    let allied_hex = HexCoord::new(10, 10);
    let japanese_hex = allied_hex.step(1, 1);
    let mut allied = TaskForce::new(3, Side::Allied);
    allied
        .add_ship(Ship::new("Chicago", ShipType::HeavyCruiser))
        .unwrap();
    let mut japanese = TaskForce::new(4, Side::Japanese);
    japanese
        .add_ship(Ship::new("Aoba", ShipType::HeavyCruiser))
        .unwrap();
    engine.spawn_piece(Piece::new(allied_hex, GameModel::TaskForce(allied)));
    engine.spawn_piece(Piece::new(japanese_hex, GameModel::TaskForce(japanese)));

    let snap = engine.tick();
    assert_eq!(
        task_force(&snap, Side::Japanese, 4).observed_condition,
        ObservationCondition::Aggregate
    );
    assert_eq!(
        task_force(&snap, Side::Allied, 3).observed_condition,
        ObservationCondition::Aggregate
    );
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::UnitObserved {
            observer_side: Side::Allied,
            kind: UnitKind::TaskForce,
            ..
        }
    )));
}

#[test]
fn test_distant_pieces_stay_unseen() {
    let mut engine = clear_skies(10);
    let mut allied = TaskForce::new(3, Side::Allied);
    allied.add_ship(Ship::new("Chicago", ShipType::HeavyCruiser)).unwrap();
    let mut japanese = TaskForce::new(4, Side::Japanese);
    japanese.add_ship(Ship::new("Aoba", ShipType::HeavyCruiser)).unwrap();
    engine.spawn_piece(Piece::new(HexCoord::new(10, 10), GameModel::TaskForce(allied)));
    engine.spawn_piece(Piece::new(HexCoord::new(20, 10), GameModel::TaskForce(japanese)));

    let snap = engine.tick();
    assert_eq!(
        task_force(&snap, Side::Japanese, 4).observed_condition,
        ObservationCondition::Unseen
    );
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::UnitObserved { .. })));
}

// ---- Combat ----

#[test]
fn test_dawn_strike_fights_and_bombs() {
    let mut engine = GameEngine::new(&SimConfig {
        seed: 2024,
        cloud_cover: CloudCover::None,
        ..Default::default()
    });
    scenario::setup_coral_sea(&mut engine).unwrap();
    engine.queue_commands(scenario::dawn_strike());
    let snap = engine.tick();

    assert_eq!(rejections(&snap), 0);
    let launched = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::FormationLaunched { .. }))
        .count();
    assert_eq!(launched, 2);
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::AirCombat {
            intercepting_side: Side::Allied,
            ..
        }
    )));

    if let Some(strike) = formation(&snap, Side::Japanese, 1) {
        if strike.count_of(AircraftType::Val) > 0 {
            // Vals that got through the fighters and the flak made their run.
            assert!(snap.events.iter().any(|e| matches!(
                e,
                GameEvent::AntiAircraftFire {
                    firing_side: Side::Allied,
                    ..
                }
            )));
            assert!(snap
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::ShipHit { ship, .. } if ship == "Yorktown")));
        }
        for val in strike
            .groups
            .iter()
            .filter(|g| g.aircraft_type == AircraftType::Val)
        {
            assert_eq!(val.armament, None, "bombs dropped");
            // Dive run and one turn aloft; bombers pay nothing for air-to-air.
            assert_eq!(val.range_remaining, val.range_factor - 2);
        }
        for zero in strike
            .groups
            .iter()
            .filter(|g| g.aircraft_type == AircraftType::Zero)
        {
            assert_eq!(zero.range_remaining, zero.range_factor - 2);
        }
    }
    if let Some(cap) = formation(&snap, Side::Allied, 1) {
        for wildcat in &cap.groups {
            assert_eq!(wildcat.range_remaining, wildcat.range_factor - 2);
        }
    }
}

#[test]
fn test_each_side_intercepts_once_per_airspace() {
    let mut engine = clear_skies(21);
    let hex = HexCoord::new(30, 40);
    engine.spawn_piece(formation_piece(
        2,
        Side::Allied,
        hex,
        vec![AircraftGroup::new(AircraftType::Wildcat, 6)],
    ));
    engine.spawn_piece(formation_piece(
        3,
        Side::Japanese,
        hex,
        vec![AircraftGroup::new(AircraftType::Zero, 6)],
    ));

    let snap = engine.tick();
    let fights = |side: Side| {
        snap.events
            .iter()
            .filter(|e| {
                matches!(e, GameEvent::AirCombat { intercepting_side, .. } if *intercepting_side == side)
            })
            .count()
    };
    assert_eq!(fights(Side::Allied), 1);
    assert!(fights(Side::Japanese) <= 1);
    // Fighting in both passes still costs a single combat range factor.
    for f in [formation(&snap, Side::Allied, 2), formation(&snap, Side::Japanese, 3)]
        .into_iter()
        .flatten()
    {
        for group in &f.groups {
            assert_eq!(group.range_remaining, group.range_factor - 2);
        }
    }
}

#[test]
fn test_base_attack_hits_airfield() {
    let mut engine = clear_skies(11);
    let mut rabaul = airfield("Rabaul", Side::Japanese, 4, 4);
    rabaul.station(AircraftStatus::Ready, AircraftGroup::new(AircraftType::Betty, 6));
    engine.spawn_piece(Piece::new(RABAUL, GameModel::Base(rabaul)));
    engine.spawn_piece(formation_piece(
        5,
        Side::Allied,
        RABAUL,
        vec![AircraftGroup::new(AircraftType::B17, 4).armed(Armament::GeneralPurpose)],
    ));
    engine.queue_command(PlayerCommand::AttackBase {
        side: Side::Allied,
        formation: 5,
        base: "Rabaul".to_string(),
        attack_type: AttackType::Level,
    });

    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::BaseHit { side: Side::Japanese, .. })));
    assert!(base(&snap, "Rabaul").attacked_this_turn);
    let raid = formation(&snap, Side::Allied, 5).unwrap();
    let b17 = &raid.groups[0];
    assert_eq!(b17.armament, None);
    // High level bombing costs no range; only the turn aloft does.
    assert_eq!(b17.range_remaining, b17.range_factor - 1);
}

#[test]
fn test_attack_on_distant_target_is_called_off() {
    let mut engine = clear_skies(12);
    let mut rabaul = airfield("Rabaul", Side::Japanese, 4, 4);
    rabaul.station(AircraftStatus::Ready, AircraftGroup::new(AircraftType::Betty, 6));
    engine.spawn_piece(Piece::new(RABAUL, GameModel::Base(rabaul)));
    engine.spawn_piece(formation_piece(
        5,
        Side::Allied,
        RABAUL.step(4, 5),
        vec![AircraftGroup::new(AircraftType::B17, 4).armed(Armament::GeneralPurpose)],
    ));
    engine.queue_command(PlayerCommand::AttackBase {
        side: Side::Allied,
        formation: 5,
        base: "Rabaul".to_string(),
        attack_type: AttackType::Level,
    });

    let snap = engine.tick();
    assert_eq!(rejections(&snap), 1);
    assert!(!base(&snap, "Rabaul").attacked_this_turn);
    let raid = formation(&snap, Side::Allied, 5).unwrap();
    assert_eq!(raid.groups[0].armament, Some(Armament::GeneralPurpose));
}

// ---- Range ----

#[test]
fn test_formation_out_of_range_ditches() {
    let mut engine = clear_skies(13);
    let mut tired = AircraftGroup::new(AircraftType::Wildcat, 3);
    tired.range_remaining = 1;
    engine.spawn_piece(formation_piece(
        8,
        Side::Allied,
        HexCoord::new(50, 50),
        vec![tired, AircraftGroup::new(AircraftType::Dauntless, 2)],
    ));

    let snap = engine.tick();
    assert!(snap.events.iter().any(|e| matches!(
        e,
        GameEvent::AircraftDitched {
            aircraft_type: AircraftType::Wildcat,
            count: 3,
            ..
        }
    )));
    let f = formation(&snap, Side::Allied, 8).unwrap();
    assert_eq!(f.count_of(AircraftType::Wildcat), 0);
    assert_eq!(f.count_of(AircraftType::Dauntless), 2);
}

#[test]
fn test_empty_formation_is_removed() {
    let mut engine = clear_skies(14);
    let mut tired = AircraftGroup::new(AircraftType::Zero, 2);
    tired.range_remaining = 1;
    engine.spawn_piece(formation_piece(4, Side::Japanese, HexCoord::new(5, 5), vec![tired]));
    let snap = engine.tick();
    assert!(formation(&snap, Side::Japanese, 4).is_none());
}

// ---- Persistence ----

#[test]
fn test_loaded_game_plays_on_identically() {
    let mut saved_game = coral_sea(77);
    saved_game.queue_commands(scenario::dawn_strike());
    saved_game.tick();
    saved_game.tick();

    let dir = std::env::temp_dir().join("flattop_test_engine_roundtrip");
    let _ = std::fs::remove_dir_all(&dir);
    let data = saved_game.to_save_data("midgame");
    persistence::save_to_file(&dir, "midgame", &data).unwrap();
    let loaded = persistence::load_from_file(&dir, "midgame").unwrap();
    assert_eq!(loaded, data);
    let mut restored = GameEngine::from_save_data(loaded).unwrap();

    assert_eq!(restored.clock(), saved_game.clock());
    assert_eq!(restored.seed(), 77);
    for _ in 0..6 {
        let json_a = serde_json::to_string(&saved_game.tick()).unwrap();
        let json_b = serde_json::to_string(&restored.tick()).unwrap();
        assert_eq!(json_a, json_b, "restored game diverged");
    }

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_tampered_save_is_rejected() {
    let data = coral_sea(5).to_save_data("tampered");
    let json = serde_json::to_value(&data).unwrap();
    let moresby = json["pieces"]
        .as_array()
        .unwrap()
        .iter()
        .position(|p| p["name"] == "Port Moresby")
        .unwrap();

    let mut overspent = json.clone();
    overspent["pieces"][moresby]["model"]["used_ready_factor"] = serde_json::json!(99);
    let overspent: persistence::SaveData = serde_json::from_value(overspent).unwrap();
    assert!(matches!(
        GameEngine::from_save_data(overspent),
        Err(SimError::Tracker(TrackerError::BudgetOverspent { .. }))
    ));

    let mut doubled = json.clone();
    let b26 = doubled["pieces"][moresby]["model"]["tracker"]["readying"][0].clone();
    doubled["pieces"][moresby]["model"]["tracker"]["readying"]
        .as_array_mut()
        .unwrap()
        .push(b26);
    let doubled: persistence::SaveData = serde_json::from_value(doubled).unwrap();
    assert!(matches!(
        GameEngine::from_save_data(doubled),
        Err(SimError::Tracker(TrackerError::DuplicateStack {
            status: AircraftStatus::Readying,
            aircraft_type: AircraftType::B26,
        }))
    ));

    // Untouched data still loads.
    let clean: persistence::SaveData = serde_json::from_value(json).unwrap();
    assert!(GameEngine::from_save_data(clean).is_ok());
}

#[test]
fn test_save_metadata_lists_slot() {
    let dir = std::env::temp_dir().join("flattop_test_engine_list");
    let _ = std::fs::remove_dir_all(&dir);
    let engine = coral_sea(3);
    persistence::save_to_file(&dir, "opening", &engine.to_save_data("opening")).unwrap();

    let saves = persistence::list_saves(&dir);
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].slot_name, "opening");
    assert_eq!(saves[0].pieces, 7);
    assert_eq!(saves[0].hour, 6);

    let _ = std::fs::remove_dir_all(&dir);
}
