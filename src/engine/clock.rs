// Frame clock for the behavior tick
//
// Every actor update reads time from a `FrameClock` instead of the wall
// clock, so a tick is fully deterministic: the caller advances the clock by
// the frame delta and then runs all updates against the same `Tick`.

/// Target update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Longest delta a single frame may report (prevents spiral of death after a stall)
pub const MAX_FRAME_DELTA: f32 = 0.25;

/// Time snapshot handed to every update in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Clock time at the start of this frame, in seconds
    pub now: f32,
    /// Seconds since the previous frame
    pub dt: f32,
    /// Frame number (1 for the first advanced frame)
    pub frame: u64,
}

impl Tick {
    /// Build a tick directly, mostly useful for tests
    pub fn at(now: f32, dt: f32) -> Self {
        Self { now, dt, frame: 0 }
    }
}

/// Deterministic frame clock
#[derive(Debug)]
pub struct FrameClock {
    /// Accumulated unpaused time
    now: f32,

    /// Delta of the last advanced frame
    delta: f32,

    /// Current frame number
    frame_count: u64,

    /// Whether time is frozen
    paused: bool,
}

impl FrameClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self {
            now: 0.0,
            delta: 0.0,
            frame_count: 0,
            paused: false,
        }
    }

    /// Advance by one frame and return the tick to evaluate
    ///
    /// Negative and NaN deltas are treated as zero and very long frames are
    /// clamped to `MAX_FRAME_DELTA`. While paused the frame counter still advances
    /// but time does not.
    pub fn advance(&mut self, dt: f32) -> Tick {
        self.frame_count += 1;
        self.delta = if self.paused || dt.is_nan() {
            0.0
        } else {
            dt.clamp(0.0, MAX_FRAME_DELTA)
        };
        self.now += self.delta;
        self.tick()
    }

    /// Advance by one fixed timestep
    pub fn step(&mut self) -> Tick {
        self.advance(FIXED_TIMESTEP)
    }

    /// The tick for the current frame without advancing
    pub fn tick(&self) -> Tick {
        Tick {
            now: self.now,
            dt: self.delta,
            frame: self.frame_count,
        }
    }

    /// Current clock time in seconds
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Get total number of frames advanced
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Check if the clock is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the clock
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Clock paused at {:.3}s", self.now);
        }
    }

    /// Resume the clock
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            log::info!("Clock resumed at {:.3}s", self.now);
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
