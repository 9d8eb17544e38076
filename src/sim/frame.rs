//! Render-ready frame description
//!
//! A [`Frame`] is rebuilt for every render from the two most recent
//! snapshots. Only the player is interpolated; static geometry and the won
//! flag are copied as-is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, Body};
use super::state::{Camera, Snapshot, World};

/// Position and size of one square, by value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub half_size: f32,
}

impl BodyView {
    fn at(pos: Vec2, size: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            size,
            half_size: size / 2.0,
        }
    }
}

impl From<&Body> for BodyView {
    fn from(body: &Body) -> Self {
        Self {
            x: body.pos.x,
            y: body.pos.y,
            size: body.size(),
            half_size: body.half_size(),
        }
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub render_width: f32,
    pub render_height: f32,
    pub won: bool,
    pub goal: BodyView,
    pub solids: Vec<BodyView>,
    pub player: BodyView,
}

/// Consumer of built frames (the platform's renderer)
pub trait FrameSink {
    fn present(&mut self, frame: &Frame, camera: Camera);
}

/// Collects frames in memory (headless runs and tests)
impl FrameSink for Vec<(Frame, Camera)> {
    fn present(&mut self, frame: &Frame, camera: Camera) {
        self.push((frame.clone(), camera));
    }
}

/// Linear blend from `start` to `end`
///
/// `alpha = 0` returns `start` and `alpha = 1` returns `end`, bit for bit;
/// anything between stays inside the two.
#[inline]
pub fn interpolate(start: f32, end: f32, alpha: f32) -> f32 {
    if alpha >= 1.0 {
        return end;
    }
    let value = start + (end - start) * alpha;
    // Rounding can land a ulp past either endpoint
    value.clamp(start.min(end), start.max(end))
}

/// Build the frame for `alpha` of the way from `previous` to `current`
pub fn build_frame(previous: &Snapshot, current: &Snapshot, alpha: f32, world: &World) -> Frame {
    debug_assert!(
        (0.0..=1.0).contains(&alpha),
        "interpolation alpha out of range: {alpha}"
    );

    let player = Vec2::new(
        interpolate(previous.player.x, current.player.x, alpha),
        interpolate(previous.player.y, current.player.y, alpha),
    );

    Frame {
        render_width: world.width,
        render_height: world.height,
        won: world.won,
        goal: BodyView::from(&world.goal),
        solids: world.solids.iter().map(BodyView::from).collect(),
        player: BodyView::at(player, world.player.body.size()),
    }
}
