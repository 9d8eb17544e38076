//! Win detection

use crate::sim::collision::overlaps;
use crate::sim::state::World;

/// Flip `won` the first time the player touches the goal
pub fn run(world: &mut World) {
    if !world.won && overlaps(&world.player, &world.goal) {
        world.won = true;
        log::info!("Goal reached at {:?}", world.player.pos());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;

    #[test]
    fn test_touching_goal_wins() {
        let mut world = World::new(&Tuning::default().level);
        run(&mut world);
        assert!(!world.won);

        world.player.body.pos = world.goal.pos;
        run(&mut world);
        assert!(world.won);
    }

    #[test]
    fn test_won_is_sticky() {
        let mut world = World::new(&Tuning::default().level);
        world.player.body.pos = world.goal.pos;
        run(&mut world);

        world.respawn_player();
        run(&mut world);
        assert!(world.won);
    }

    #[test]
    fn test_edge_contact_does_not_win() {
        let mut world = World::new(&Tuning::default().level);
        world.player.body.pos = world.goal.pos - glam::Vec2::new(50.0, 0.0);
        run(&mut world);
        assert!(!world.won);
    }
}
