//! Jump impulse, gravity, and position integration
//!
//! Vertical speed is not capped; there is no terminal velocity.

use super::StepContext;
use crate::sim::state::World;

pub fn run(world: &mut World, ctx: &StepContext) {
    let tuning = &ctx.tuning.physics;
    let player = &mut world.player;

    // Before gravity, so this tick's gravity already eats into the jump
    if ctx.input.jump && player.grounded {
        player.vel.y = -tuning.jump_speed;
    }

    player.vel.y += tuning.gravity * ctx.dt;
    player.body.pos += player.vel * ctx.dt;
}
