//! Fixed timestep frame clock
//!
//! Hosts feed the measured duration of each rendered frame; the clock answers
//! how many fixed gameplay ticks to run. Character logic and timers always see
//! the same `FIXED_TIMESTEP`, so jump arcs and attack timing do not depend on
//! frame rate.

/// Target gameplay update rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Maximum number of ticks per frame to prevent spiral of death
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Frame timing state
#[derive(Debug)]
pub struct FrameClock {
    /// Accumulated time not yet consumed by fixed ticks
    accumulator: f32,

    /// Total simulated time handed out as ticks
    simulated: f64,

    /// Whether the game is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            simulated: 0.0,
            paused: false,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Begin a new frame that took `frame_time` seconds, returns the number of fixed ticks to run
    pub fn begin_frame(&mut self, frame_time: f32) -> u32 {
        self.frame_count += 1;

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time.max(0.0);

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP && ticks < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP;
            ticks += 1;
        }

        // Drop whatever the step cap left behind instead of replaying it next frame
        if ticks == MAX_STEPS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP {
            log::debug!(
                "Frame clock dropped {:.3}s after hitting the step cap",
                self.accumulator
            );
            self.accumulator = 0.0;
        }

        self.tick_count += u64::from(ticks);
        self.simulated += f64::from(ticks) * f64::from(FIXED_TIMESTEP);
        ticks
    }

    /// Get the fixed timestep for gameplay ticks (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Interpolation alpha between the last two ticks, for smooth presentation
    pub fn alpha(&self) -> f32 {
        self.accumulator / FIXED_TIMESTEP
    }

    /// Total simulated time in seconds
    pub fn simulated_secs(&self) -> f64 {
        self.simulated
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = 0.0;
            log::info!("Game resumed");
        }
    }

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
