//! AABB overlap and the player-vs-solid resolver
//!
//! Overlap uses strict inequality: squares that only share an edge do not
//! collide. Resolution pushes the player out along the axis of least
//! penetration, one solid at a time, in stored order. Each push mutates the
//! player, so later solids see the already-corrected position.

use glam::Vec2;

use super::body::{Aabb, Body, Player};

/// Separation data between two squares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Sum of both half sizes
    pub combined_half_size: f32,
    /// Centre offset, `a - b`
    pub delta: Vec2,
}

impl Contact {
    pub fn between(a: &impl Aabb, b: &impl Aabb) -> Self {
        Self {
            combined_half_size: a.half_size() + b.half_size(),
            delta: a.center() - b.center(),
        }
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self) -> bool {
        self.delta.x.abs() < self.combined_half_size && self.delta.y.abs() < self.combined_half_size
    }

    /// Penetration depth per axis (only meaningful when overlapping)
    #[inline]
    pub fn penetration(&self) -> Vec2 {
        Vec2::splat(self.combined_half_size) - self.delta.abs()
    }
}

/// Convenience overlap test
#[inline]
pub fn overlaps(a: &impl Aabb, b: &impl Aabb) -> bool {
    Contact::between(a, b).overlaps()
}

/// Which way a single resolution pushed the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Pushed sideways by the signed amount; horizontal velocity zeroed
    X(f32),
    /// Pushed vertically by the signed amount; vertical velocity zeroed
    Y(f32),
}

/// Push `player` out of `solid` if they overlap
///
/// Ties between the axes resolve vertically.
pub fn resolve_against(player: &mut Player, solid: &Body) -> Option<Resolution> {
    let contact = Contact::between(player, solid);
    if !contact.overlaps() {
        return None;
    }

    let overlap = contact.penetration();
    let delta = contact.delta;

    if overlap.x < overlap.y {
        let push = if delta.x > 0.0 { overlap.x } else { -overlap.x };
        player.body.pos.x += push;
        player.vel.x = 0.0;
        Some(Resolution::X(push))
    } else {
        let push = if delta.y > 0.0 { overlap.y } else { -overlap.y };
        player.body.pos.y += push;
        player.vel.y = 0.0;
        // Centre above the solid: landed on top
        if delta.y < 0.0 {
            player.grounded = true;
        }
        Some(Resolution::Y(push))
    }
}

/// Resolve the player against every solid, re-deriving `grounded`
///
/// Returns how many solids required a correction.
pub fn resolve_solids(player: &mut Player, solids: &[Body]) -> usize {
    player.grounded = false;

    solids
        .iter()
        .filter_map(|solid| resolve_against(player, solid))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::LevelTuning;
    use proptest::prelude::*;

    /// The three default solids, in stored order
    fn default_solids() -> Vec<Body> {
        LevelTuning::default()
            .solids
            .into_iter()
            .map(Body::from)
            .collect()
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::new(Vec2::new(x, y), 50.0)
    }

    fn solid_at(x: f32, y: f32, size: f32) -> Body {
        Body::new(Vec2::new(x, y), size)
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let player = player_at(0.0, 0.0);
        assert!(!overlaps(&player, &solid_at(50.0, 0.0, 50.0)));
        assert!(!overlaps(&player, &solid_at(0.0, -50.0, 50.0)));
        assert!(overlaps(&player, &solid_at(49.9, 0.0, 50.0)));
    }

    #[test]
    fn test_overlap_requires_both_axes() {
        let player = player_at(0.0, 0.0);
        assert!(!overlaps(&player, &solid_at(10.0, 80.0, 50.0)));
        assert!(!overlaps(&player, &solid_at(80.0, 10.0, 50.0)));
    }

    #[test]
    fn test_landing_on_top() {
        // Solid 10px below: overlap x = 50, overlap y = 40
        let mut player = player_at(0.0, 0.0);
        player.vel = Vec2::new(30.0, 120.0);
        let solid = solid_at(0.0, 10.0, 50.0);

        let res = resolve_against(&mut player, &solid);
        assert_eq!(res, Some(Resolution::Y(-40.0)));
        assert_eq!(player.pos(), Vec2::new(0.0, -40.0));
        assert_eq!(player.vel, Vec2::new(30.0, 0.0));
        assert!(player.grounded);
    }

    #[test]
    fn test_hitting_head_does_not_ground() {
        let mut player = player_at(0.0, 10.0);
        player.vel.y = -200.0;
        let solid = solid_at(0.0, 0.0, 50.0);

        let res = resolve_against(&mut player, &solid);
        assert_eq!(res, Some(Resolution::Y(40.0)));
        assert_eq!(player.pos().y, 50.0);
        assert_eq!(player.vel.y, 0.0);
        assert!(!player.grounded);
    }

    #[test]
    fn test_side_push_zeroes_vx() {
        // Mostly beside the solid: overlap x = 5, overlap y = 45
        let mut player = player_at(-45.0, 5.0);
        player.vel = Vec2::new(150.0, 40.0);
        let solid = solid_at(0.0, 0.0, 50.0);

        let res = resolve_against(&mut player, &solid);
        assert_eq!(res, Some(Resolution::X(-5.0)));
        assert_eq!(player.pos().x, -50.0);
        assert_eq!(player.vel, Vec2::new(0.0, 40.0));
        assert!(!player.grounded);
    }

    #[test]
    fn test_equal_overlap_resolves_vertically() {
        let mut player = player_at(-30.0, -30.0);
        let solid = solid_at(0.0, 0.0, 50.0);

        let res = resolve_against(&mut player, &solid);
        assert_eq!(res, Some(Resolution::Y(-20.0)));
        assert_eq!(player.pos(), Vec2::new(-30.0, -50.0));
        assert!(player.grounded);
    }

    #[test]
    fn test_grounded_cleared_without_contact() {
        let mut player = player_at(0.0, -300.0);
        player.grounded = true;
        let solids = [solid_at(0.0, 200.0, 50.0)];

        assert_eq!(resolve_solids(&mut player, &solids), 0);
        assert!(!player.grounded);
    }

    #[test]
    fn test_sequential_resolution_uses_corrected_position() {
        // Two stacked floor tiles: the first push lifts the player clear of the second
        let mut player = player_at(0.0, 0.0);
        let solids = [solid_at(0.0, 40.0, 50.0), solid_at(0.0, 60.0, 50.0)];

        assert_eq!(resolve_solids(&mut player, &solids), 1);
        assert_eq!(player.pos().y, -10.0);
        assert!(player.grounded);
        assert!(solids.iter().all(|s| !overlaps(&player, s)));
    }

    #[test]
    fn test_grounded_survives_later_side_push() {
        let mut player = player_at(0.0, 0.0);
        let solids = [solid_at(0.0, 45.0, 50.0), solid_at(-45.0, -15.0, 50.0)];

        assert_eq!(resolve_solids(&mut player, &solids), 2);
        assert!(player.grounded);
        assert_eq!(player.pos(), Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_default_level_contacts() {
        let solids = default_solids();

        // Clipping the left side of the (0, 200) block, clear of (-100, 180)
        let mut player = player_at(-48.0, 160.0);
        player.vel = Vec2::new(90.0, 60.0);
        assert_eq!(resolve_solids(&mut player, &solids), 1);
        assert_eq!(player.pos(), Vec2::new(-50.0, 160.0));
        assert_eq!(player.vel, Vec2::new(0.0, 60.0));
        assert!(!player.grounded);

        // Sinking into the wide floor block
        let mut player = player_at(0.0, 260.0);
        player.vel.y = 200.0;
        assert_eq!(resolve_solids(&mut player, &solids), 1);
        assert_eq!(player.pos(), Vec2::new(0.0, 255.0));
        assert_eq!(player.vel.y, 0.0);
        assert!(player.grounded);

        // Standing on (-100, 180)
        let mut player = player_at(-100.0, 131.0);
        assert_eq!(resolve_solids(&mut player, &solids), 1);
        assert_eq!(player.pos(), Vec2::new(-100.0, 130.0));
        assert!(player.grounded);
        assert!(solids.iter().all(|s| !overlaps(&player, s)));
    }

    #[test]
    fn test_resolution_order_changes_outcome() {
        let floor = solid_at(0.0, 40.0, 50.0);
        let corner = solid_at(45.0, 35.0, 50.0);

        // Floor first: lifted to y = -10, then the corner is an exact tie and pushes up
        let mut player = player_at(0.0, 0.0);
        assert_eq!(resolve_solids(&mut player, &[floor, corner]), 2);
        assert_eq!(player.pos(), Vec2::new(0.0, -15.0));
        assert!(player.grounded);

        // Corner first: shoved left, then lifted by the floor
        let mut player = player_at(0.0, 0.0);
        assert_eq!(resolve_solids(&mut player, &[corner, floor]), 2);
        assert_eq!(player.pos(), Vec2::new(-5.0, -10.0));
        assert!(player.grounded);
    }

    proptest! {
        // Integer-valued coordinates keep the arithmetic exact
        #[test]
        fn prop_single_solid_never_left_penetrating(
            px in -300i32..300,
            py in -300i32..300,
            sx in -300i32..300,
            sy in -300i32..300,
            player_half in 1i32..100,
            solid_half in 1i32..100,
        ) {
            let mut player = Player::new(Vec2::new(px as f32, py as f32), (player_half * 2) as f32);
            let solid = solid_at(sx as f32, sy as f32, (solid_half * 2) as f32);
            let before = Contact::between(&player, &solid);

            let res = resolve_solids(&mut player, std::slice::from_ref(&solid));

            prop_assert!(!overlaps(&player, &solid));
            prop_assert_eq!(res, usize::from(before.overlaps()));
            let landed = before.overlaps()
                && before.penetration().x >= before.penetration().y
                && before.delta.y < 0.0;
            prop_assert_eq!(player.grounded, landed);
        }

        // Default solids are spaced at least a player apart, so one pass
        // clears every overlap whatever the order
        #[test]
        fn prop_default_level_single_pass(px in -300i32..400, py in -100i32..900) {
            let solids = default_solids();
            let reversed: Vec<Body> = solids.iter().rev().copied().collect();
            let mut forward = player_at(px as f32, py as f32);
            let mut backward = forward;

            resolve_solids(&mut forward, &solids);
            resolve_solids(&mut backward, &reversed);

            prop_assert!(solids.iter().all(|s| !overlaps(&forward, s)));
            prop_assert_eq!(forward, backward);
        }
    }
}
