//! World bounds and the kill plane

use crate::sim::body::Aabb;
use crate::sim::state::World;

pub fn run(world: &mut World) {
    let half = world.player.half_size();
    let min_x = world.min_x + half;
    let max_x = world.max_x - half;

    let player = &mut world.player;
    let clamped = player.body.pos.x.clamp(min_x, max_x);
    if clamped != player.body.pos.x {
        player.body.pos.x = clamped;
        player.vel.x = 0.0;
    }

    if player.body.pos.y - half > world.kill_plane_y {
        log::debug!("Player fell past kill plane at {:?}, respawning", player.pos());
        world.respawn_player();
    }
}
