//! Cleanup system: removes empty formations and task forces, and sunk ships.

use hecs::{Entity, World};

use flattop_core::formation::AirFormation;
use flattop_core::naval::TaskForce;

/// Uses a caller-owned buffer to avoid per-turn allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, formation) in world.query_mut::<&mut AirFormation>() {
        formation.groups.retain(|g| g.count > 0);
        if formation.is_empty() {
            despawn_buffer.push(entity);
        }
    }

    for (entity, tf) in world.query_mut::<&mut TaskForce>() {
        for name in tf.remove_sunk() {
            tracing::debug!(task_force = tf.number, ship = %name, "sunk ship removed");
        }
        if tf.is_empty() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
