#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::aircraft::{AircraftGroup, AircraftType};
    use crate::base::{AirOperationsConfig, Base};
    use crate::commands::PlayerCommand;
    use crate::enums::*;
    use crate::error::{CompositionError, TrackerError};
    use crate::events::GameEvent;
    use crate::formation::AirFormation;
    use crate::naval::{Ship, TaskForce};
    use crate::types::{GameClock, HexCoord};

    fn carrier_config() -> AirOperationsConfig {
        AirOperationsConfig {
            name: "Yorktown".to_string(),
            maximum_capacity: 30,
            launch_factor_min: 4,
            launch_factor_normal: 8,
            launch_factor_max: 12,
            ready_factors: 10,
            plane_handling: PlaneHandling::Carrier,
            anti_air_factor: 0,
        }
    }

    fn stocked_base() -> Base {
        let mut base = Base::new("Yorktown Base", Side::Allied, carrier_config());
        base.station(
            AircraftStatus::JustLanded,
            AircraftGroup::new(AircraftType::Wildcat, 8),
        );
        base.station(
            AircraftStatus::Ready,
            AircraftGroup::new(AircraftType::Dauntless, 15),
        );
        base
    }

    // ---- Enums ----

    #[test]
    fn test_condition_serializes_as_number() {
        let json = serde_json::to_string(&ObservationCondition::Aggregate).unwrap();
        assert_eq!(json, "2");
        let back: ObservationCondition = serde_json::from_str("3").unwrap();
        assert_eq!(back, ObservationCondition::Exact);
        assert!(serde_json::from_str::<ObservationCondition>("4").is_err());
    }

    #[test]
    fn test_condition_ordering() {
        assert!(ObservationCondition::Exact > ObservationCondition::Aggregate);
        assert!(ObservationCondition::Presence > ObservationCondition::Unseen);
        assert!(!ObservationCondition::Unseen.is_observed());
    }

    #[test]
    fn test_ship_type_hull_codes() {
        let json = serde_json::to_string(&ShipType::LightCarrier).unwrap();
        assert_eq!(json, "\"CVL\"");
        assert_eq!(ShipType::AviationCruiser.code(), "CAV");
        assert!(ShipType::AviationCruiser.is_tender());
        assert!(!ShipType::AviationCruiser.is_carrier());
        assert!(ShipType::FleetCarrier.carries_planes());
        assert!(!ShipType::Battleship.carries_planes());
    }

    #[test]
    fn test_armament_serde_names() {
        assert_eq!(
            serde_json::to_string(&Armament::GeneralPurpose).unwrap(),
            "\"GP\""
        );
        let back: Armament = serde_json::from_str("\"AP\"").unwrap();
        assert_eq!(back, Armament::ArmorPiercing);
    }

    #[test]
    fn test_command_serde_tagged() {
        let cmd = PlayerCommand::MoveFormation {
            side: Side::Japanese,
            number: 5,
            to: HexCoord::new(3, 4),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"MoveFormation\""));
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }

    #[test]
    fn test_event_serde_tagged() {
        let event = GameEvent::ShipHit {
            side: Side::Japanese,
            ship: "Shokaku".to_string(),
            hits: 4,
            sunk: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"ShipHit\""));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    // ---- Aircraft catalogue ----

    #[test]
    fn test_fighter_profiles() {
        let zero = AircraftType::Zero.profile();
        assert_eq!(zero.combat.air_to_air, 9);
        assert_eq!(zero.move_factor, 10);
        assert_eq!(zero.range_factor, 8);

        let b17 = AircraftType::B17.profile();
        assert_eq!(b17.combat.air_to_air, 8);
        assert_eq!(b17.combat.level_high_base_gp, 13);
        assert_eq!(b17.range_factor, 12);
    }

    #[test]
    fn test_sides_split_catalogue() {
        let allied = AircraftType::ALL
            .iter()
            .filter(|t| t.side() == Side::Allied)
            .count();
        assert_eq!(allied, 15);
        assert_eq!(AircraftType::ALL.len() - allied, 12);
    }

    #[test]
    fn test_role_capabilities() {
        assert_eq!(AircraftType::Zero.capability(), RoleCapability::Versatile);
        assert_eq!(AircraftType::Rufe.capability(), RoleCapability::Versatile);
        assert_eq!(
            AircraftType::Jake.capability(),
            RoleCapability::InterceptEscortOnly
        );
        assert_eq!(AircraftType::Val.capability(), RoleCapability::BomberOnly);
        assert_eq!(AircraftType::B17.capability(), RoleCapability::BomberOnly);
        assert!(AircraftType::Rufe.armed_penalty_applies());
        assert!(!AircraftType::Dave.armed_penalty_applies());
    }

    #[test]
    fn test_bombing_ratings() {
        let dauntless = AircraftType::Dauntless.combat_data();
        assert_eq!(
            dauntless.bombing(
                AttackType::Dive,
                Altitude::High,
                AttackTarget::Ship,
                Armament::ArmorPiercing
            ),
            7
        );
        let kate = AircraftType::Kate.combat_data();
        assert_eq!(
            kate.bombing(
                AttackType::Torpedo,
                Altitude::Low,
                AttackTarget::Ship,
                Armament::Torpedo
            ),
            10
        );
        // No torpedo runs against airfields, no bombs on a torpedo run.
        assert_eq!(
            kate.bombing(
                AttackType::Torpedo,
                Altitude::Low,
                AttackTarget::Base,
                Armament::Torpedo
            ),
            0
        );
        assert_eq!(
            kate.bombing(
                AttackType::Torpedo,
                Altitude::Low,
                AttackTarget::Ship,
                Armament::GeneralPurpose
            ),
            0
        );
        let b25 = AircraftType::B25.combat_data();
        assert_eq!(
            b25.bombing(
                AttackType::Level,
                Altitude::Low,
                AttackTarget::Base,
                Armament::GeneralPurpose
            ),
            11
        );
    }

    // ---- Aircraft groups ----

    #[test]
    fn test_apply_hits_discards_excess() {
        let mut group = AircraftGroup::new(AircraftType::Val, 3);
        assert_eq!(group.apply_hits(5), 3);
        assert_eq!(group.count, 0);
        assert!(group.is_spent());
    }

    #[test]
    fn test_range_burn_and_refuel() {
        let mut group = AircraftGroup::new(AircraftType::P39, 4);
        for _ in 0..10 {
            group.expend_range();
        }
        assert_eq!(group.range_remaining, 0);
        assert!(group.is_spent());
        group.refuel();
        assert_eq!(group.range_remaining, 5);
    }

    // ---- Map and clock ----

    #[test]
    fn test_hex_distance() {
        let origin = HexCoord::new(0, 0);
        assert_eq!(origin.distance(&origin), 0);
        assert_eq!(origin.distance(&HexCoord::new(1, 0)), 1);
        assert_eq!(origin.distance(&HexCoord::new(2, -1)), 2);
        assert_eq!(origin.distance(&HexCoord::new(-3, 3)), 3);
        assert_eq!(origin.step(4, 3), HexCoord::new(-3, 0));
    }

    #[test]
    fn test_clock_day_and_night() {
        let mut clock = GameClock::new(1, 17);
        assert_eq!(clock.time_of_day(), TimeOfDay::Day);
        clock.advance();
        assert_eq!(clock.time_of_day(), TimeOfDay::Night);
        for _ in 0..6 {
            clock.advance();
        }
        assert_eq!(clock.day, 2);
        assert_eq!(clock.hour, 0);
        assert_eq!(clock.time_of_day(), TimeOfDay::Night);
    }

    // ---- Air formations ----

    #[test]
    fn test_formation_number_bounds() {
        assert_eq!(
            AirFormation::new(0, Side::Allied),
            Err(TrackerError::FormationNumber(0))
        );
        assert!(AirFormation::new(35, Side::Allied).is_ok());
        assert_eq!(
            AirFormation::new(36, Side::Allied),
            Err(TrackerError::FormationNumber(36))
        );
    }

    #[test]
    fn test_formation_movement_is_slowest() {
        let mut af = AirFormation::new(1, Side::Japanese).unwrap();
        assert_eq!(af.movement_factor(), 0);
        af.add_group(AircraftGroup::new(AircraftType::Zero, 6));
        af.add_group(AircraftGroup::new(AircraftType::Kate, 9));
        assert_eq!(af.movement_factor(), 7);
        assert_eq!(af.total_aircraft(), 15);
    }

    #[test]
    fn test_formation_altitude_propagates() {
        let mut af = AirFormation::new(2, Side::Japanese).unwrap();
        af.add_group(AircraftGroup::new(AircraftType::Kate, 9));
        af.set_altitude(Altitude::Low);
        assert!(af.groups.iter().all(|g| g.altitude == Altitude::Low));
    }

    #[test]
    fn test_formation_remove_spent() {
        let mut af = AirFormation::new(3, Side::Allied).unwrap();
        af.add_group(AircraftGroup::new(AircraftType::Wildcat, 4));
        af.add_group(AircraftGroup::new(AircraftType::Dauntless, 0));
        let spent = af.remove_spent();
        assert_eq!(spent.len(), 1);
        assert_eq!(af.groups.len(), 1);
    }

    // ---- Air operations tracker ----

    #[test]
    fn test_transition_moves_and_counts() {
        let mut base = stocked_base();
        let moved = base
            .transition(
                AircraftType::Wildcat,
                AircraftStatus::JustLanded,
                AircraftStatus::Readying,
                5,
            )
            .unwrap();
        assert_eq!(moved, 5);
        assert_eq!(base.used_ready_factor(), 5);
        assert_eq!(
            base.tracker()
                .count_of(AircraftStatus::JustLanded, AircraftType::Wildcat),
            3
        );
        assert_eq!(
            base.tracker()
                .count_of(AircraftStatus::Readying, AircraftType::Wildcat),
            5
        );
    }

    #[test]
    fn test_transition_partial_then_refused() {
        let mut base = stocked_base();
        base.station(
            AircraftStatus::JustLanded,
            AircraftGroup::new(AircraftType::Avenger, 12),
        );
        // Ready budget is 10: 8 Wildcats fit, only 2 of the Avengers.
        assert_eq!(
            base.transition(
                AircraftType::Wildcat,
                AircraftStatus::JustLanded,
                AircraftStatus::Readying,
                8
            ),
            Ok(8)
        );
        assert_eq!(
            base.transition(
                AircraftType::Avenger,
                AircraftStatus::JustLanded,
                AircraftStatus::Readying,
                12
            ),
            Ok(2)
        );
        assert_eq!(base.used_ready_factor(), 10);
        // Budget exhausted: nothing moves.
        assert_eq!(
            base.transition(
                AircraftType::Avenger,
                AircraftStatus::JustLanded,
                AircraftStatus::Readying,
                1
            ),
            Ok(0)
        );
        assert_eq!(
            base.tracker()
                .count_of(AircraftStatus::JustLanded, AircraftType::Avenger),
            10
        );
    }

    #[test]
    fn test_transition_rejects_skipping_boxes() {
        let mut base = stocked_base();
        let before = base.clone();
        assert_eq!(
            base.transition(
                AircraftType::Wildcat,
                AircraftStatus::JustLanded,
                AircraftStatus::Ready,
                1
            ),
            Err(TrackerError::InvalidTransition {
                from: AircraftStatus::JustLanded,
                to: AircraftStatus::Ready,
            })
        );
        assert_eq!(base, before);
    }

    #[test]
    fn test_ready_resets_range_and_merges_by_type() {
        let mut base = stocked_base();
        let mut tired = AircraftGroup::new(AircraftType::Dauntless, 3);
        tired.range_remaining = 1;
        base.station(AircraftStatus::Readying, tired);

        base.transition(
            AircraftType::Dauntless,
            AircraftStatus::Readying,
            AircraftStatus::Ready,
            3,
        )
        .unwrap();

        let ready = base.tracker().list(AircraftStatus::Ready);
        assert_eq!(ready.len(), 1, "same type must merge, not duplicate");
        assert_eq!(ready[0].count, 18);
        assert_eq!(ready[0].range_remaining, ready[0].range_factor);
    }

    #[test]
    fn test_unarmed_aircraft_never_join_an_armed_stack() {
        let mut base = stocked_base();
        base.station(
            AircraftStatus::Ready,
            AircraftGroup::new(AircraftType::Val, 2).armed(Armament::GeneralPurpose),
        );
        base.station(AircraftStatus::Readying, AircraftGroup::new(AircraftType::Val, 6));

        let moved = base
            .transition(AircraftType::Val, AircraftStatus::Readying, AircraftStatus::Ready, 6)
            .unwrap();
        assert_eq!(moved, 6);
        let vals: Vec<_> = base
            .tracker()
            .list(AircraftStatus::Ready)
            .iter()
            .filter(|g| g.aircraft_type == AircraftType::Val)
            .map(|g| (g.count, g.armament))
            .collect();
        assert_eq!(vals, vec![(2, Some(Armament::GeneralPurpose)), (6, None)]);

        // Arming the type loads every ready stack, which then share one stack.
        assert!(base.arm(AircraftType::Val, Some(Armament::ArmorPiercing)));
        let vals: Vec<_> = base
            .tracker()
            .list(AircraftStatus::Ready)
            .iter()
            .filter(|g| g.aircraft_type == AircraftType::Val)
            .map(|g| (g.count, g.armament))
            .collect();
        assert_eq!(vals, vec![(8, Some(Armament::ArmorPiercing))]);
    }

    #[test]
    fn test_transition_draws_across_stacks_of_a_type() {
        let mut base = stocked_base();
        base.station(
            AircraftStatus::Ready,
            AircraftGroup::new(AircraftType::Val, 3).armed(Armament::GeneralPurpose),
        );
        base.station(AircraftStatus::Ready, AircraftGroup::new(AircraftType::Val, 4));

        let af = base
            .launch(2, &[(AircraftType::Val, 5)], Altitude::Low, 9)
            .unwrap();
        assert_eq!(af.count_of(AircraftType::Val), 5);
        assert_eq!(af.groups.len(), 2);
        assert!(af.groups[0].is_armed());
        assert!(!af.groups[1].is_armed());
        assert_eq!(base.used_launch_factor(), 5);
        assert_eq!(
            base.tracker().count_of(AircraftStatus::Ready, AircraftType::Val),
            2
        );
        assert!(base.validate().is_ok());
    }

    #[test]
    fn test_launch_capped_by_damage() {
        let mut base = stocked_base();
        base.damage = 5;
        assert_eq!(base.available_launch_factor_max(), 7);
        let af = base
            .launch(
                4,
                &[(AircraftType::Dauntless, 15)],
                Altitude::High,
                8,
            )
            .unwrap();
        assert_eq!(af.total_aircraft(), 7);
        assert_eq!(base.used_launch_factor(), 7);
        assert_eq!(
            base.tracker()
                .count_of(AircraftStatus::Ready, AircraftType::Dauntless),
            8
        );
        assert!(base.tracker().list(AircraftStatus::InFlight).is_empty());
    }

    #[test]
    fn test_launch_with_spent_budget_fails_cleanly() {
        let mut base = stocked_base();
        base.launch(1, &[(AircraftType::Dauntless, 12)], Altitude::High, 8)
            .unwrap();
        assert_eq!(
            base.launch(2, &[(AircraftType::Dauntless, 3)], Altitude::High, 8),
            Err(TrackerError::NothingInFlight)
        );
        assert_eq!(
            base.tracker()
                .count_of(AircraftStatus::Ready, AircraftType::Dauntless),
            3
        );
    }

    #[test]
    fn test_launch_rejects_bad_number_without_moving() {
        let mut base = stocked_base();
        assert_eq!(
            base.launch(40, &[(AircraftType::Dauntless, 5)], Altitude::High, 8),
            Err(TrackerError::FormationNumber(40))
        );
        assert_eq!(base.used_launch_factor(), 0);
    }

    #[test]
    fn test_recover_lands_and_disarms() {
        let mut base = stocked_base();
        base.arm(AircraftType::Dauntless, Some(Armament::ArmorPiercing));
        let af = base
            .launch(1, &[(AircraftType::Dauntless, 6)], Altitude::High, 8)
            .unwrap();
        assert!(af.groups[0].is_armed());
        let landed = base.recover(af);
        assert_eq!(landed, 6);
        let just_landed = base.tracker().list(AircraftStatus::JustLanded);
        let dauntless = just_landed
            .iter()
            .find(|g| g.aircraft_type == AircraftType::Dauntless)
            .unwrap();
        assert_eq!(dauntless.count, 6);
        assert!(!dauntless.is_armed());
        assert_eq!(base.tracker().total_aircraft_count(), 23);
    }

    #[test]
    fn test_recover_spends_no_budget() {
        let mut base = stocked_base();
        let af = base
            .launch(1, &[(AircraftType::Dauntless, 10)], Altitude::High, 8)
            .unwrap();
        base.reset_for_new_turn();
        assert_eq!(base.recover(af), 10);
        assert_eq!(base.used_ready_factor(), 0);
        assert_eq!(base.used_launch_factor(), 0);
        assert!(base.tracker().list(AircraftStatus::InFlight).is_empty());
        assert_eq!(
            base.tracker()
                .count_of(AircraftStatus::JustLanded, AircraftType::Dauntless),
            10
        );
    }

    #[test]
    fn test_validate_rejects_tampered_base() {
        let base = stocked_base();
        assert_eq!(base.validate(), Ok(()));

        let mut json = serde_json::to_value(&base).unwrap();
        json["used_ready_factor"] = serde_json::json!(11);
        let overspent: Base = serde_json::from_value(json).unwrap();
        assert_eq!(
            overspent.validate(),
            Err(TrackerError::BudgetOverspent {
                budget: "ready",
                used: 11,
                cap: 10,
            })
        );

        let mut json = serde_json::to_value(&base).unwrap();
        let stack = json["tracker"]["ready"][0].clone();
        json["tracker"]["ready"].as_array_mut().unwrap().push(stack);
        let doubled: Base = serde_json::from_value(json).unwrap();
        assert_eq!(
            doubled.validate(),
            Err(TrackerError::DuplicateStack {
                status: AircraftStatus::Ready,
                aircraft_type: AircraftType::Dauntless,
            })
        );
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut base = stocked_base();
        base.transition(
            AircraftType::Wildcat,
            AircraftStatus::JustLanded,
            AircraftStatus::Readying,
            4,
        )
        .unwrap();
        base.attacked_this_turn = true;
        let lists_before = base.tracker().clone();
        base.reset_for_new_turn();
        base.reset_for_new_turn();
        assert_eq!(base.used_ready_factor(), 0);
        assert_eq!(base.used_launch_factor(), 0);
        assert!(!base.attacked_this_turn);
        assert_eq!(base.tracker(), &lists_before);
    }

    #[test]
    fn test_bomb_hits_destroy_ready_aircraft() {
        let mut base = stocked_base();
        base.station(
            AircraftStatus::Ready,
            AircraftGroup::new(AircraftType::Wildcat, 2),
        );
        let destroyed = base.take_hits(17);
        assert_eq!(
            destroyed,
            vec![(AircraftType::Dauntless, 15), (AircraftType::Wildcat, 2)]
        );
        assert!(base.tracker().list(AircraftStatus::Ready).is_empty());
        assert_eq!(base.damage, 17);
        assert!(base.attacked_this_turn);
        assert_eq!(base.available_launch_factor_max(), 0);
    }

    // ---- Task forces ----

    #[test]
    fn test_task_force_ship_limits() {
        let mut tf = TaskForce::new(12, Side::Japanese);
        for i in 0..10 {
            tf.add_ship(Ship::new(format!("DD-{i}"), ShipType::Destroyer))
                .unwrap();
        }
        assert_eq!(
            tf.add_ship(Ship::new("DD-10", ShipType::Destroyer)),
            Err(CompositionError::TaskForceFull {
                side: Side::Japanese,
                max: 10
            })
        );
    }

    #[test]
    fn test_task_force_carrier_rules() {
        let mut tf = TaskForce::new(1, Side::Allied);
        tf.add_ship(Ship::carrier(
            "Yorktown",
            ShipType::FleetCarrier,
            Side::Allied,
            carrier_config(),
        ))
        .unwrap();
        assert_eq!(
            tf.add_ship(Ship::new("Wasp", ShipType::LightCarrier)),
            Err(CompositionError::SecondCarrier)
        );
        tf.add_ship(Ship::new("Tangier", ShipType::SeaplaneTender))
            .unwrap();
        assert_eq!(
            tf.add_ship(Ship::new("Curtiss", ShipType::AviationCruiser)),
            Err(CompositionError::SecondTender)
        );
        assert_eq!(
            tf.add_ship(Ship::new("Tangier", ShipType::Destroyer)),
            Err(CompositionError::DuplicateShip("Tangier".to_string()))
        );
        assert_eq!(tf.ships().len(), 2);
        assert_eq!(tf.bases().count(), 1);

        let mut far = TaskForce::new(10, Side::Allied);
        assert_eq!(
            far.add_ship(Ship::new("Lexington", ShipType::FleetCarrier)),
            Err(CompositionError::PlaneCarrierOutsideBoxes { number: 10 })
        );
        assert!(far.is_empty());
    }

    #[test]
    fn test_task_force_remove_and_bb_air_factor() {
        let mut tf = TaskForce::new(3, Side::Japanese);
        tf.add_ship(Ship::new("Kongo", ShipType::Battleship)).unwrap();
        tf.add_ship(Ship::new("Tone", ShipType::HeavyCruiser)).unwrap();
        tf.assign_bb_air_factor("Kongo").unwrap();
        assert_eq!(tf.bb_air_factor("Kongo"), 1);
        assert_eq!(
            tf.assign_bb_air_factor("Tone"),
            Err(CompositionError::NotJapaneseBattleship)
        );
        tf.remove_ship("Kongo").unwrap();
        assert_eq!(tf.bb_air_factor("Kongo"), 0);
        assert_eq!(
            tf.remove_ship("Kongo"),
            Err(CompositionError::ShipNotFound("Kongo".to_string()))
        );

        let mut allied = TaskForce::new(4, Side::Allied);
        allied
            .add_ship(Ship::new("North Carolina", ShipType::Battleship))
            .unwrap();
        assert_eq!(
            allied.assign_bb_air_factor("North Carolina"),
            Err(CompositionError::NotJapaneseBattleship)
        );
    }

    #[test]
    fn test_task_force_factors_ignore_sunk() {
        let mut tf = TaskForce::new(2, Side::Allied);
        tf.add_ship(Ship::new("Astoria", ShipType::HeavyCruiser).with_factors(3, 3, 3))
            .unwrap();
        tf.add_ship(Ship::new("Sims", ShipType::Destroyer).with_factors(1, 2, 1))
            .unwrap();
        assert_eq!(tf.movement_factor(), 2);
        assert_eq!(tf.anti_air_factor(), 4);
        assert!(tf.ship_mut("Sims").unwrap().take_hits(1));
        assert_eq!(tf.movement_factor(), 3);
        assert_eq!(tf.anti_air_factor(), 3);
        assert_eq!(tf.remove_sunk(), vec!["Sims".to_string()]);
    }

    #[test]
    fn test_carrier_sinking_loses_air_group() {
        let mut ship = Ship::carrier(
            "Shoho",
            ShipType::LightCarrier,
            Side::Japanese,
            carrier_config(),
        )
        .with_factors(2, 3, 4);
        if let Some(base) = ship.base.as_mut() {
            base.station(
                AircraftStatus::Ready,
                AircraftGroup::new(AircraftType::Zero, 6),
            );
        }
        assert!(!ship.take_hits(3));
        assert!(ship.take_hits(2));
        assert_eq!(ship.status, ShipStatus::Sunk);
        assert_eq!(ship.base.as_ref().unwrap().tracker().total_aircraft_count(), 0);
        assert!(!ship.take_hits(5), "a sunk ship cannot sink again");
    }

    // ---- Properties ----

    proptest! {
        #[test]
        fn prop_hits_floor_at_zero(count in 0u32..60, hits in 0u32..80) {
            let mut group = AircraftGroup::new(AircraftType::Betty, count);
            group.apply_hits(hits);
            prop_assert_eq!(group.count, count.saturating_sub(hits));
        }

        #[test]
        fn prop_tracker_conserves_aircraft(
            steps in proptest::collection::vec((0usize..3, 0u32..20), 1..40)
        ) {
            let mut base = stocked_base();
            base.station(AircraftStatus::InFlight, AircraftGroup::new(AircraftType::Wildcat, 5));
            let before = base.tracker().type_total(AircraftType::Wildcat);
            let pairs = [
                (AircraftStatus::InFlight, AircraftStatus::JustLanded),
                (AircraftStatus::JustLanded, AircraftStatus::Readying),
                (AircraftStatus::Readying, AircraftStatus::Ready),
            ];
            for (idx, count) in steps {
                let (from, to) = pairs[idx];
                base.transition(AircraftType::Wildcat, from, to, count).unwrap();
                prop_assert_eq!(base.tracker().type_total(AircraftType::Wildcat), before);
                prop_assert!(base.used_ready_factor() <= base.available_ready_factor());
            }
        }
    }
}
