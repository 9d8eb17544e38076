//! Headless runner
//!
//! Drives a [`Game`] with a synthetic display clock and a scripted input
//! timeline, rasterizing every dispatched frame. Used by the native binary
//! and for end-to-end tests of the whole frame loop.

use serde::Serialize;

use crate::renderer::{Framebuffer, FramebufferSink};
use crate::sim::{Camera, Frame, FrameSink, Game, InputState};
use crate::{ConfigError, MS_PER_SECOND, Tuning};

/// Float slack when comparing synthetic timestamps to step boundaries
const TIME_SLACK_MS: f64 = 1e-6;

/// Hold `input` for `duration_ms` of display time
#[derive(Debug, Clone, Copy)]
pub struct ScriptStep {
    pub input: InputState,
    pub duration_ms: f64,
}

impl ScriptStep {
    pub fn new(input: InputState, duration_ms: f64) -> Self {
        Self { input, duration_ms }
    }
}

/// Land on the first block, walk right into the goal, restart
pub fn demo_script() -> Vec<ScriptStep> {
    let right = InputState {
        right: true,
        ..Default::default()
    };
    let reset = InputState {
        reset: true,
        ..Default::default()
    };
    vec![
        ScriptStep::new(InputState::default(), 1500.0),
        ScriptStep::new(right, 2500.0),
        ScriptStep::new(reset, 100.0),
        ScriptStep::new(InputState::default(), 1000.0),
    ]
}

/// Outcome of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct HeadlessSummary {
    pub display_frames: u64,
    pub ticks: u64,
    pub rendered_frames: u64,
    pub resets: u32,
    /// Times the won flag went from false to true
    pub wins: u32,
    pub won: bool,
    pub player: [f32; 2],
    /// Non-transparent pixels in the final framebuffer
    pub lit_pixels: usize,
    pub last_frame: Option<Frame>,
}

struct RecordingSink {
    raster: FramebufferSink,
    last: Option<Frame>,
}

impl FrameSink for RecordingSink {
    fn present(&mut self, frame: &Frame, camera: Camera) {
        self.raster.present(frame, camera);
        self.last = Some(frame.clone());
    }
}

/// Play `script` against a display refreshing at `display_hz`
pub fn run(
    tuning: Tuning,
    script: &[ScriptStep],
    display_hz: f64,
) -> Result<HeadlessSummary, ConfigError> {
    let level = &tuning.level;
    let framebuffer = Framebuffer::new(level.width, level.height, 1.0);
    let mut game = Game::new(tuning)?;
    let mut sink = RecordingSink {
        raster: FramebufferSink::new(framebuffer),
        last: None,
    };

    let frame_ms = MS_PER_SECOND / display_hz;
    let mut frame_index = 0u64;
    let mut resets = 0;
    let mut wins = 0;
    let mut was_won = game.world().won;

    game.frame(0.0, InputState::default(), &mut sink);
    let mut script_end = 0.0;
    for step in script {
        script_end += step.duration_ms;
        loop {
            // Timestamps derived from the index so they never drift
            let now = (frame_index + 1) as f64 * frame_ms;
            if now > script_end + TIME_SLACK_MS {
                break;
            }
            frame_index += 1;
            let report = game.frame(now, step.input, &mut sink);
            resets += report.resets;

            let won = game.world().won;
            if won && !was_won {
                wins += 1;
            }
            was_won = won;
        }
    }

    let player = game.world().player.pos();
    let summary = HeadlessSummary {
        display_frames: frame_index,
        ticks: game.ticks(),
        rendered_frames: sink.raster.frames,
        resets,
        wins,
        won: game.world().won,
        player: player.to_array(),
        lit_pixels: sink
            .raster
            .framebuffer
            .pixels()
            .iter()
            .filter(|p| p.a != 0)
            .count(),
        last_frame: sink.last,
    };
    game.stop();

    log::info!(
        "Headless run: {} display frame(s), {} tick(s), {} render(s)",
        summary.display_frames,
        summary.ticks,
        summary.rendered_frames
    );
    Ok(summary)
}
