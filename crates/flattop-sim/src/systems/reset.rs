//! Start-of-turn reset of per-turn budgets and flags.

use hecs::World;

use flattop_core::base::Base;
use flattop_core::formation::AirFormation;
use flattop_core::naval::TaskForce;

pub fn run(world: &mut World) {
    for (_entity, base) in world.query_mut::<&mut Base>() {
        base.reset_for_new_turn();
    }
    for (_entity, tf) in world.query_mut::<&mut TaskForce>() {
        for deck in tf.bases_mut() {
            deck.reset_for_new_turn();
        }
    }
    for (_entity, formation) in world.query_mut::<&mut AirFormation>() {
        formation.reset_for_new_turn();
    }
}
