//! World state and interpolation snapshots
//!
//! All state the simulation mutates lives in [`World`]. Level geometry is
//! built once from [`LevelTuning`] and never changes afterwards.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, Player};
use crate::tuning::LevelTuning;

/// Aggregate root of the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Viewport / world extent in pixels
    pub width: f32,
    pub height: f32,
    /// Horizontal bounds, symmetric around x = 0
    pub min_x: f32,
    pub max_x: f32,
    pub spawn: Vec2,
    /// Player respawns once its top edge passes below this line
    pub kill_plane_y: f32,
    pub player: Player,
    /// Static solids, resolved in stored order
    pub solids: Vec<Body>,
    pub goal: Body,
    /// Set the first time the player touches the goal; cleared by [`World::reset`]
    pub won: bool,
}

impl World {
    /// Build a world from a level description
    pub fn new(level: &LevelTuning) -> Self {
        let max_x = level.width / 2.0;
        let spawn = Vec2::from(level.spawn);

        Self {
            width: level.width,
            height: level.height,
            min_x: -max_x,
            max_x,
            spawn,
            kill_plane_y: level.kill_plane_y,
            player: Player::new(spawn, level.player_size),
            solids: level.solids.iter().copied().map(Body::from).collect(),
            goal: Body::from(level.goal),
            won: false,
        }
    }

    /// Put the player back at spawn; `won` is left alone
    pub fn respawn_player(&mut self) {
        self.player.respawn(self.spawn);
    }

    /// Start the play-through over
    pub fn reset(&mut self) {
        self.won = false;
        self.respawn_player();
    }
}

/// Player position captured at a tick boundary, used only for interpolation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub player: Vec2,
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            player: world.player.pos(),
        }
    }
}

/// World-space point the viewport is centred on
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    /// Lock onto `target` (no smoothing)
    pub fn follow(&mut self, target: Vec2) {
        self.offset = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Aabb;

    #[test]
    fn test_world_from_default_level() {
        let world = World::new(&LevelTuning::default());
        assert_eq!(world.max_x, 400.0);
        assert_eq!(world.min_x, -world.max_x);
        assert_eq!(world.player.pos(), Vec2::new(0.0, -200.0));
        assert_eq!(world.player.vel, Vec2::ZERO);
        assert!(!world.player.grounded);
        assert_eq!(world.solids.len(), 3);
        assert_eq!(world.solids[2].size(), 500.0);
        assert_eq!(world.goal.center(), Vec2::new(100.0, 150.0));
        assert!(!world.won);
    }

    #[test]
    fn test_respawn_keeps_won() {
        let mut world = World::new(&LevelTuning::default());
        world.won = true;
        world.player.body.pos = Vec2::new(300.0, 1000.0);
        world.player.vel = Vec2::new(10.0, 10.0);

        world.respawn_player();
        assert!(world.won);
        assert_eq!(world.player.pos(), world.spawn);
        assert_eq!(world.player.vel, Vec2::ZERO);
    }

    #[test]
    fn test_reset_clears_won() {
        let mut world = World::new(&LevelTuning::default());
        world.won = true;
        world.player.body.pos = Vec2::new(100.0, 150.0);
        world.player.grounded = true;

        world.reset();
        assert!(!world.won);
        assert_eq!(world.player.pos(), world.spawn);
        assert!(!world.player.grounded);
    }

    #[test]
    fn test_snapshot_copies_position() {
        let mut world = World::new(&LevelTuning::default());
        let before = Snapshot::capture(&world);
        world.player.body.pos.x += 5.0;
        assert_eq!(before.player, Vec2::new(0.0, -200.0));
        assert_eq!(Snapshot::capture(&world).player.x, 5.0);
    }
}
