//! Spawning pieces into the ECS world and finding them again.
//!
//! Each piece is one entity carrying a `HexCoord` and exactly one of
//! `AirFormation`, `TaskForce` or `Base`. Flight decks live inside their
//! ship, so a base name may resolve to a task force entity.

use hecs::{Entity, World};

use flattop_core::base::Base;
use flattop_core::enums::Side;
use flattop_core::formation::AirFormation;
use flattop_core::naval::TaskForce;
use flattop_core::types::HexCoord;

use crate::state::{GameModel, Piece};

/// Spawn a piece with its hex and model components.
pub fn spawn_piece(world: &mut World, piece: Piece) -> Entity {
    match piece.model {
        GameModel::AirFormation(f) => world.spawn((piece.hex, f)),
        GameModel::TaskForce(tf) => world.spawn((piece.hex, tf)),
        GameModel::Base(b) => world.spawn((piece.hex, b)),
    }
}

/// Every piece in the world, in a stable order.
pub fn collect_pieces(world: &World) -> Vec<Piece> {
    let mut pieces = Vec::new();
    for (_e, (hex, base)) in world.query::<(&HexCoord, &Base)>().iter() {
        pieces.push(Piece::new(*hex, GameModel::Base(base.clone())));
    }
    for (_e, (hex, tf)) in world.query::<(&HexCoord, &TaskForce)>().iter() {
        pieces.push(Piece::new(*hex, GameModel::TaskForce(tf.clone())));
    }
    for (_e, (hex, f)) in world.query::<(&HexCoord, &AirFormation)>().iter() {
        pieces.push(Piece::new(*hex, GameModel::AirFormation(f.clone())));
    }
    pieces.sort_by_key(Piece::sort_key);
    pieces
}

pub fn find_formation(world: &World, side: Side, number: u8) -> Option<(Entity, HexCoord)> {
    world
        .query::<(&HexCoord, &AirFormation)>()
        .iter()
        .find(|(_, (_, f))| f.side == side && f.number == number)
        .map(|(e, (hex, _))| (e, *hex))
}

pub fn find_task_force(world: &World, side: Side, number: u8) -> Option<(Entity, HexCoord)> {
    world
        .query::<(&HexCoord, &TaskForce)>()
        .iter()
        .find(|(_, (_, tf))| tf.side == side && tf.number == number)
        .map(|(e, (hex, _))| (e, *hex))
}

/// A standalone airfield or seaplane base.
pub fn find_airfield(world: &World, side: Side, name: &str) -> Option<(Entity, HexCoord)> {
    world
        .query::<(&HexCoord, &Base)>()
        .iter()
        .find(|(_, (_, b))| b.side == side && b.name == name)
        .map(|(e, (hex, _))| (e, *hex))
}

/// Hex of a base by name, airfield or flight deck.
pub fn base_hex(world: &World, side: Side, name: &str) -> Option<HexCoord> {
    if let Some((_, hex)) = find_airfield(world, side, name) {
        return Some(hex);
    }
    world
        .query::<(&HexCoord, &TaskForce)>()
        .iter()
        .find(|(_, (_, tf))| tf.side == side && tf.bases().any(|b| b.name == name))
        .map(|(_, (hex, _))| *hex)
}

/// Run `f` on a base by name, airfield or flight deck.
pub fn with_base_mut<R>(
    world: &mut World,
    side: Side,
    name: &str,
    f: impl FnOnce(&mut Base) -> R,
) -> Option<R> {
    if let Some((_, base)) = world
        .query_mut::<&mut Base>()
        .into_iter()
        .find(|(_, b)| b.side == side && b.name == name)
    {
        return Some(f(base));
    }
    world
        .query_mut::<&mut TaskForce>()
        .into_iter()
        .filter(|(_, tf)| tf.side == side)
        .find_map(|(_, tf)| tf.bases_mut().find(|b| b.name == name))
        .map(f)
}

