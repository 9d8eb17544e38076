//! Simulation context
//!
//! [`Game`] owns the world, the stage pipeline, the fixed-timestep clock, the
//! interpolation snapshots, and the camera. The platform calls
//! [`Game::frame`] once per display refresh and [`Game::stop`] on teardown.

use super::clock::FixedTimestep;
use super::frame::{FrameSink, build_frame};
use super::input::InputState;
use super::state::{Camera, Snapshot, World};
use super::systems::Pipeline;
use super::tick::{TickOutcome, tick};
use crate::{ConfigError, Tuning};

/// What one display frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation steps run (resets included)
    pub steps: u32,
    /// Steps that were world resets
    pub resets: u32,
    /// Whether a frame was dispatched to the sink
    pub rendered: bool,
}

/// A running play-through
#[derive(Debug, Clone)]
pub struct Game {
    tuning: Tuning,
    pipeline: Pipeline,
    world: World,
    clock: FixedTimestep,
    previous: Snapshot,
    current: Snapshot,
    camera: Camera,
    /// Total simulation steps since start
    ticks: u64,
    running: bool,
}

impl Game {
    /// Validate `tuning` and build a fresh world with the default pipeline
    pub fn new(tuning: Tuning) -> Result<Self, ConfigError> {
        Self::with_pipeline(tuning, Pipeline::default())
    }

    pub fn with_pipeline(tuning: Tuning, pipeline: Pipeline) -> Result<Self, ConfigError> {
        tuning.validate()?;

        let world = World::new(&tuning.level);
        let snapshot = Snapshot::capture(&world);
        let clock = FixedTimestep::new(tuning.step_ms(), tuning.max_delta_ms());
        let camera = Camera {
            offset: world.player.pos(),
        };

        log::info!(
            "Game initialized: {} Hz, {} solid(s), {} stage(s)",
            tuning.sim_rate_hz,
            world.solids.len(),
            pipeline.stages().len()
        );

        Ok(Self {
            tuning,
            pipeline,
            world,
            clock,
            previous: snapshot,
            current: snapshot,
            camera,
            ticks: 0,
            running: true,
        })
    }

    /// Handle one display refresh at `now_ms`
    ///
    /// Runs as many fixed steps as the accumulated time allows, then, if a
    /// render is due, hands an interpolated frame to `sink`. Does nothing
    /// once stopped.
    pub fn frame(
        &mut self,
        now_ms: f64,
        input: InputState,
        sink: &mut impl FrameSink,
    ) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.running {
            return report;
        }

        self.clock.advance(now_ms);
        let dt = self.tuning.step_secs();

        while self.clock.should_step() {
            self.previous = self.current;
            let outcome = tick(&mut self.world, &input, &self.pipeline, &self.tuning, dt);
            if outcome == TickOutcome::Reset {
                report.resets += 1;
            }
            self.current = Snapshot::capture(&self.world);
            self.clock.consume_step();
            self.ticks += 1;
            report.steps += 1;
        }

        if self.clock.should_render() {
            let frame = build_frame(&self.previous, &self.current, self.clock.alpha(), &self.world);
            self.camera.follow(glam::Vec2::new(frame.player.x, frame.player.y));
            sink.present(&frame, self.camera);
            self.clock.consume_render();
            report.rendered = true;
        }

        log::trace!("frame @{:.1}ms: {:?}", now_ms, report);
        report
    }

    /// Halt the simulation; later frames are ignored
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Game stopped after {} tick(s)", self.ticks);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access (level editing, tests)
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Previous and current tick snapshots
    pub fn snapshots(&self) -> (Snapshot, Snapshot) {
        (self.previous, self.current)
    }

    pub fn clock(&self) -> &FixedTimestep {
        &self.clock
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
