//! Ships and task forces.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::base::{AirOperationsConfig, Base};
use crate::constants::{
    JAPANESE_BB_AIR_FACTORS, MAX_SHIPS_ALLIED, MAX_SHIPS_JAPANESE, PLANE_CARRIER_TF_MAX,
};
use crate::enums::{ObservationCondition, ShipStatus, ShipType, Side};
use crate::error::CompositionError;

/// A single ship. Plane-carrying hulls carry their own flight deck as a `Base`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub ship_type: ShipType,
    pub status: ShipStatus,
    pub attack_factor: u32,
    pub anti_air_factor: u32,
    pub move_factor: u32,
    /// Hits needed to sink her.
    pub damage_factor: u32,
    pub damage: u32,
    /// Flight deck and hangar of a carrier or tender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Base>,
}

impl Ship {
    pub fn new(name: impl Into<String>, ship_type: ShipType) -> Self {
        Self {
            name: name.into(),
            ship_type,
            status: ShipStatus::Operational,
            attack_factor: 0,
            anti_air_factor: 0,
            move_factor: 2,
            damage_factor: 1,
            damage: 0,
            base: None,
        }
    }

    /// A plane-carrying ship with a flight deck of the given capacity.
    pub fn carrier(
        name: impl Into<String>,
        ship_type: ShipType,
        side: Side,
        config: AirOperationsConfig,
    ) -> Self {
        let name = name.into();
        let mut ship = Ship::new(name.clone(), ship_type);
        ship.base = Some(Base::new(format!("{name} Base"), side, config));
        ship
    }

    pub fn with_factors(mut self, anti_air: u32, move_factor: u32, damage_factor: u32) -> Self {
        self.anti_air_factor = anti_air;
        self.move_factor = move_factor;
        self.damage_factor = damage_factor;
        self
    }

    pub fn is_sunk(&self) -> bool {
        self.status == ShipStatus::Sunk
    }

    /// Apply bomb or torpedo hits. Returns true if this sank her.
    pub fn take_hits(&mut self, hits: u32) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.damage += hits;
        if self.damage >= self.damage_factor {
            self.status = ShipStatus::Sunk;
            if let Some(base) = self.base.as_mut() {
                base.lose_all_aircraft();
            }
            return true;
        }
        false
    }
}

/// A task force counter and the ships in its box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForce {
    pub number: u8,
    pub name: String,
    pub side: Side,
    ships: Vec<Ship>,
    #[serde(default)]
    pub radar: bool,
    /// Air Factors carried by Japanese battleships, by ship name.
    #[serde(default)]
    bb_air_factors: BTreeMap<String, u32>,
    #[serde(default)]
    pub observed_condition: ObservationCondition,
}

impl TaskForce {
    pub fn new(number: u8, side: Side) -> Self {
        Self {
            number,
            name: format!("Task Force {number}"),
            side,
            ships: Vec::new(),
            radar: false,
            bb_air_factors: BTreeMap::new(),
            observed_condition: ObservationCondition::Unseen,
        }
    }

    pub fn max_ships(&self) -> usize {
        match self.side {
            Side::Allied => MAX_SHIPS_ALLIED,
            Side::Japanese => MAX_SHIPS_JAPANESE,
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship_mut(&mut self, name: &str) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.name == name)
    }

    /// Add a ship, enforcing the task force organisation rules.
    pub fn add_ship(&mut self, ship: Ship) -> Result<(), CompositionError> {
        if self.ships.len() >= self.max_ships() {
            return Err(CompositionError::TaskForceFull {
                side: self.side,
                max: self.max_ships(),
            });
        }
        if ship.ship_type.carries_planes() && self.number > PLANE_CARRIER_TF_MAX {
            return Err(CompositionError::PlaneCarrierOutsideBoxes {
                number: self.number,
            });
        }
        if ship.ship_type.is_carrier() && self.carrier().is_some() {
            return Err(CompositionError::SecondCarrier);
        }
        if ship.ship_type.is_tender() && self.tender().is_some() {
            return Err(CompositionError::SecondTender);
        }
        if self.ships.iter().any(|s| s.name == ship.name) {
            return Err(CompositionError::DuplicateShip(ship.name));
        }
        self.ships.push(ship);
        Ok(())
    }

    /// Re-check the organisation rules, for task forces read back from a save.
    pub fn validate(&self) -> Result<(), CompositionError> {
        let mut check = TaskForce::new(self.number, self.side);
        for ship in &self.ships {
            check.add_ship(ship.clone())?;
        }
        for name in self.bb_air_factors.keys() {
            check.assign_bb_air_factor(name)?;
        }
        Ok(())
    }

    pub fn remove_ship(&mut self, name: &str) -> Result<Ship, CompositionError> {
        let idx = self
            .ships
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| CompositionError::ShipNotFound(name.to_string()))?;
        self.bb_air_factors.remove(name);
        Ok(self.ships.remove(idx))
    }

    /// Note an Air Factor aboard a Japanese battleship.
    pub fn assign_bb_air_factor(&mut self, name: &str) -> Result<(), CompositionError> {
        if self.side != Side::Japanese {
            return Err(CompositionError::NotJapaneseBattleship);
        }
        let ship = self
            .ships
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CompositionError::ShipNotFound(name.to_string()))?;
        if ship.ship_type != ShipType::Battleship {
            return Err(CompositionError::NotJapaneseBattleship);
        }
        self.bb_air_factors
            .insert(name.to_string(), JAPANESE_BB_AIR_FACTORS);
        Ok(())
    }

    pub fn bb_air_factor(&self, name: &str) -> u32 {
        self.bb_air_factors.get(name).copied().unwrap_or(0)
    }

    pub fn carrier(&self) -> Option<&Ship> {
        self.ships.iter().find(|s| s.ship_type.is_carrier())
    }

    pub fn tender(&self) -> Option<&Ship> {
        self.ships.iter().find(|s| s.ship_type.is_tender())
    }

    /// Flight decks of the plane-carrying ships still afloat.
    pub fn bases_mut(&mut self) -> impl Iterator<Item = &mut Base> {
        self.ships
            .iter_mut()
            .filter(|s| !s.is_sunk())
            .filter_map(|s| s.base.as_mut())
    }

    pub fn bases(&self) -> impl Iterator<Item = &Base> {
        self.ships
            .iter()
            .filter(|s| !s.is_sunk())
            .filter_map(|s| s.base.as_ref())
    }

    /// Slowest ship sets the pace. Zero when empty.
    pub fn movement_factor(&self) -> u32 {
        self.afloat().map(|s| s.move_factor).min().unwrap_or(0)
    }

    /// Combined anti-aircraft factor of the ships still afloat.
    pub fn anti_air_factor(&self) -> u32 {
        self.afloat().map(|s| s.anti_air_factor).sum()
    }

    pub fn afloat(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().filter(|s| !s.is_sunk())
    }

    /// Drop sunk ships from the box. Returns their names.
    pub fn remove_sunk(&mut self) -> Vec<String> {
        let sunk: Vec<String> = self
            .ships
            .iter()
            .filter(|s| s.is_sunk())
            .map(|s| s.name.clone())
            .collect();
        self.ships.retain(|s| !s.is_sunk());
        for name in &sunk {
            self.bb_air_factors.remove(name);
        }
        sunk
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }
}
