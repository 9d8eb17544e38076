//! Entity model
//!
//! Every entity is an axis-aligned square. Static bodies (solids, the goal)
//! carry only position and size; the player adds velocity and grounded state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::BoxSpec;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Body {}
    impl Sealed for super::Player {}
}

/// Shared square-AABB capability of every entity
pub trait Aabb: sealed::Sealed {
    /// Centre of the square in world pixels
    fn center(&self) -> Vec2;
    /// Half the edge length
    fn half_size(&self) -> f32;
}

/// Positional/sized base shared by all entities
///
/// Deserializes from `pos` and `size` only; the half size is always derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "BodyRepr")]
pub struct Body {
    pub pos: Vec2,
    size: f32,
    half_size: f32,
}

impl Body {
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size,
            half_size: size / 2.0,
        }
    }

    /// Edge length
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Resize, keeping the half size in step
    pub fn set_size(&mut self, size: f32) {
        self.size = size;
        self.half_size = size / 2.0;
    }
}

/// Serialized fields a [`Body`] is rebuilt from
#[derive(Deserialize)]
struct BodyRepr {
    pos: Vec2,
    size: f32,
}

impl From<BodyRepr> for Body {
    fn from(repr: BodyRepr) -> Self {
        Body::new(repr.pos, repr.size)
    }
}

impl From<BoxSpec> for Body {
    fn from(b: BoxSpec) -> Self {
        Body::new(Vec2::new(b.x, b.y), b.size)
    }
}

impl Aabb for Body {
    #[inline]
    fn center(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    fn half_size(&self) -> f32 {
        self.half_size
    }
}

/// The single dynamic entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Velocity in px/s (+Y is down)
    pub vel: Vec2,
    /// Set when this tick's collisions put the player on top of a solid
    pub grounded: bool,
}

impl Player {
    /// A player at rest at `pos`
    pub fn new(pos: Vec2, size: f32) -> Self {
        Self {
            body: Body::new(pos, size),
            vel: Vec2::ZERO,
            grounded: false,
        }
    }

    /// Move back to `spawn` and drop all motion state
    pub fn respawn(&mut self, spawn: Vec2) {
        self.body.pos = spawn;
        self.vel = Vec2::ZERO;
        self.grounded = false;
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }
}

impl Aabb for Player {
    #[inline]
    fn center(&self) -> Vec2 {
        self.body.pos
    }

    #[inline]
    fn half_size(&self) -> f32 {
        self.body.half_size
    }
}
