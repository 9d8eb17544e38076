//! Horizontal control: acceleration from input, damping, speed cap

use super::StepContext;
use crate::sim::state::World;

/// Adjust the player's horizontal velocity for one tick
///
/// Ground control is snappy (high accel, strong friction); air control is
/// floaty (low accel, near-frictionless).
pub fn run(world: &mut World, ctx: &StepContext) {
    let tuning = &ctx.tuning.movement;
    let player = &mut world.player;

    let (accel, damping) = if player.grounded {
        (tuning.ground_accel, tuning.ground_damping)
    } else {
        (tuning.air_accel, tuning.air_damping)
    };

    player.vel.x += ctx.input.horizontal() * accel * ctx.dt;

    // Applied every tick, input or not
    player.vel.x -= player.vel.x * damping * ctx.dt;

    player.vel.x = player.vel.x.clamp(-tuning.max_speed, tuning.max_speed);
}
