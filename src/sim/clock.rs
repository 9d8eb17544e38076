//! Fixed-timestep accumulators
//!
//! Wall-clock time from the platform is folded into two accumulators: one
//! drained in whole simulation steps, one that paces rendering. Both are in
//! milliseconds, matching `requestAnimationFrame` timestamps.

/// Accumulator state for one running game
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Length of one simulation step (ms)
    step_ms: f64,
    /// Wall-clock delta clamp (ms)
    max_delta_ms: f64,
    /// Unconsumed simulation time (ms)
    accumulator: f64,
    /// Unconsumed render time (ms)
    render_accumulator: f64,
    /// Timestamp of the previous frame; `None` until the first frame
    last_ms: Option<f64>,
}

impl FixedTimestep {
    /// # Panics
    ///
    /// If `step_ms` is not finite and positive, or the clamp is below one step.
    pub fn new(step_ms: f64, max_delta_ms: f64) -> Self {
        assert!(
            step_ms.is_finite() && step_ms > 0.0,
            "fixed step must be finite and positive, got {step_ms}"
        );
        assert!(
            max_delta_ms >= step_ms,
            "delta clamp {max_delta_ms} must be at least one step ({step_ms})"
        );
        Self {
            step_ms,
            max_delta_ms,
            accumulator: 0.0,
            render_accumulator: 0.0,
            last_ms: None,
        }
    }

    /// Feed a frame timestamp; returns the (clamped) delta that was accumulated
    ///
    /// The first timestamp only primes the clock.
    ///
    /// # Panics
    ///
    /// If `now_ms` is not finite or earlier than the previous timestamp.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        assert!(now_ms.is_finite(), "frame timestamp must be finite, got {now_ms}");

        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0.0;
        };
        let raw = now_ms - last;
        assert!(
            raw >= 0.0,
            "frame timestamps must not go backwards ({last} -> {now_ms})"
        );

        let delta = if raw > self.max_delta_ms {
            log::debug!("Clamping frame delta {:.1}ms to {:.1}ms", raw, self.max_delta_ms);
            self.max_delta_ms
        } else {
            raw
        };

        self.accumulator += delta;
        self.render_accumulator += delta;
        delta
    }

    /// True while at least one whole simulation step is pending
    pub fn should_step(&self) -> bool {
        self.accumulator >= self.step_ms
    }

    /// Consume one simulation step
    pub fn consume_step(&mut self) {
        self.accumulator -= self.step_ms;
    }

    /// True when a render is due
    pub fn should_render(&self) -> bool {
        self.render_accumulator >= self.step_ms
    }

    /// Consume one render interval
    ///
    /// Backlog beyond one more interval is dropped so a slow display cannot
    /// grow the render accumulator forever.
    pub fn consume_render(&mut self) {
        self.render_accumulator = (self.render_accumulator - self.step_ms).min(self.step_ms);
    }

    /// Fraction of a step accumulated but not yet simulated, in [0, 1)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step_ms) as f32
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn render_accumulator(&self) -> f64 {
        self.render_accumulator
    }

    /// Forget accumulated time and the last timestamp
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.render_accumulator = 0.0;
        self.last_ms = None;
    }
}
