//! Pixel Platformer - a one-screen square-jumping platformer
//!
//! Core modules:
//! - `sim`: Deterministic fixed-timestep simulation (movement, physics, collisions)
//! - `renderer`: CPU framebuffer rasterizer for canvas presentation
//! - `platform`: Keyboard mapping and the browser adapter
//! - `tuning`: Data-driven world and movement parameters

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{ConfigError, Tuning};

/// Reference tuning constants
///
/// Units: positions in world pixels, velocities in px/s, accelerations in px/s².
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_RATE_HZ: f64 = 30.0;
    /// Largest wall-clock delta accepted per frame, in fixed steps
    pub const MAX_DELTA_STEPS: f64 = 2.0;

    /// Horizontal speed cap (both directions)
    pub const MAX_SPEED: f32 = 220.0;
    /// Horizontal acceleration while standing on something
    pub const GROUND_ACCEL: f32 = 1500.0;
    /// Horizontal acceleration while airborne
    pub const AIR_ACCEL: f32 = 500.0;
    /// Damping coefficient while grounded (1/s)
    pub const GROUND_DAMPING: f32 = 15.0;
    /// Damping coefficient while airborne (1/s)
    pub const AIR_DAMPING: f32 = 2.0;

    /// Downward acceleration (+Y is down)
    pub const GRAVITY: f32 = 800.0;
    /// Upward launch speed applied on jump
    pub const JUMP_SPEED: f32 = 350.0;

    /// Viewport / world extent
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    /// Largest accepted viewport edge
    pub const MAX_WORLD_SIDE: f32 = 4096.0;
    /// Player respawns once its top edge falls below this line
    pub const KILL_PLANE_Y: f32 = 900.0;
    pub const SPAWN_X: f32 = 0.0;
    pub const SPAWN_Y: f32 = -200.0;
    /// Edge length of the player square
    pub const PLAYER_SIZE: f32 = 50.0;
}

/// Milliseconds per second, for converting between timer and simulation units
pub const MS_PER_SECOND: f64 = 1000.0;
