/// Fixed timestep accumulator.
/// Converts variable frame time into a whole number of game frames, so the
/// particle speed does not depend on the display refresh rate.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    /// Upper bound on steps returned by one `accumulate` call.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += frame_dt;
        // Cap to prevent spiral of death after a long stall (background tab).
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Drop any partial frame, e.g. after a replay.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Counts discrete events (pose results) and reports a rate in events/second,
/// recomputed once per `window` seconds.
#[derive(Debug, Clone)]
pub struct RateMeter {
    window: f32,
    elapsed: f32,
    count: u32,
    rate: f32,
}

impl RateMeter {
    pub fn new(window: f32) -> Self {
        Self {
            window,
            elapsed: 0.0,
            count: 0,
            rate: 0.0,
        }
    }

    pub fn record(&mut self) {
        self.count += 1;
    }

    /// Advance the meter clock by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.window {
            self.rate = self.count as f32 / self.elapsed;
            self.elapsed = 0.0;
            self.count = 0;
        }
    }

    /// Last measured rate, 0 until the first window completes.
    pub fn rate(&self) -> f32 {
        self.rate
    }
}

impl Default for RateMeter {
    fn default() -> Self {
        Self::new(1.0)
    }
}
