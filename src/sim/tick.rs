//! Fixed timestep simulation tick
//!
//! Advances the world by exactly one logical step. Callers always pass the
//! fixed step, never wall-clock time, so replays are bit-identical.

use super::input::InputState;
use super::state::World;
use super::systems::{Pipeline, StepContext};
use crate::Tuning;

/// What a tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The pipeline ran
    Stepped,
    /// The world was won and reset was held, so it restarted instead
    Reset,
}

/// Advance `world` by one fixed step of `dt` seconds
///
/// # Panics
///
/// If `dt` is not a finite positive number.
pub fn tick(
    world: &mut World,
    input: &InputState,
    pipeline: &Pipeline,
    tuning: &Tuning,
    dt: f32,
) -> TickOutcome {
    assert!(
        dt.is_finite() && dt > 0.0,
        "simulation step must be finite and positive, got {dt}"
    );

    if world.won && input.reset {
        log::info!("Resetting world");
        world.reset();
        return TickOutcome::Reset;
    }

    let ctx = StepContext::new(tuning, *input, dt);
    pipeline.run(world, &ctx);
    TickOutcome::Stepped
}
