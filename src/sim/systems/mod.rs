//! Per-tick systems and the order they run in
//!
//! A [`Pipeline`] is an explicit list of [`Stage`]s. The default pipeline is
//! movement → physics → collision → goal → world constraints; changing the
//! order changes the game, so it is kept as data that tests can inspect.

pub mod constraints;
pub mod goal;
pub mod movement;
pub mod physics;

use serde::{Deserialize, Serialize};

use super::collision;
use super::input::InputState;
use super::state::World;
use crate::Tuning;

/// Read-only inputs shared by every stage of one tick
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub tuning: &'a Tuning,
    /// Input snapshot for this tick (a copy, never written back)
    pub input: InputState,
    /// Fixed step in seconds
    pub dt: f32,
}

impl<'a> StepContext<'a> {
    pub fn new(tuning: &'a Tuning, input: InputState, dt: f32) -> Self {
        Self { tuning, input, dt }
    }
}

/// One system in the tick pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Input → horizontal velocity
    Movement,
    /// Jump, gravity, integration
    Physics,
    /// Player vs static solids
    Collision,
    /// Player vs goal
    Goal,
    /// Horizontal bounds and kill plane
    WorldConstraints,
}

impl Stage {
    /// Reference order
    pub const ORDER: [Stage; 5] = [
        Stage::Movement,
        Stage::Physics,
        Stage::Collision,
        Stage::Goal,
        Stage::WorldConstraints,
    ];

    pub fn run(self, world: &mut World, ctx: &StepContext) {
        match self {
            Stage::Movement => movement::run(world, ctx),
            Stage::Physics => physics::run(world, ctx),
            Stage::Collision => {
                let resolved = collision::resolve_solids(&mut world.player, &world.solids);
                if resolved > 0 {
                    log::trace!("Resolved {} solid contact(s)", resolved);
                }
            }
            Stage::Goal => goal::run(world),
            Stage::WorldConstraints => constraints::run(world),
        }
    }
}

/// Ordered list of stages executed once per tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            stages: Stage::ORDER.to_vec(),
        }
    }
}

impl Pipeline {
    /// A custom ordering (mainly for experiments and tests)
    pub fn from_stages(stages: impl IntoIterator<Item = Stage>) -> Self {
        Self {
            stages: stages.into_iter().collect(),
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run every stage in order
    pub fn run(&self, world: &mut World, ctx: &StepContext) {
        for stage in &self.stages {
            stage.run(world, ctx);
        }
    }
}
