//! Phase timing and the fixed-timestep minigame clock.
//!
//! Phase expiry is a pure function of two timestamps, so the flow controller
//! can be driven entirely by synthetic times in tests. `GameTime` turns the
//! variable frame delta from `draw_web()` into discrete minigame ticks.

/// Milliseconds since `started_at_ms`, never negative.
pub fn elapsed(now_ms: f64, started_at_ms: f64) -> f64 {
    (now_ms - started_at_ms).max(0.0)
}

/// Whether `elapsed_ms` has reached `duration_ms`.
pub fn expired(elapsed_ms: f64, duration_ms: f64) -> bool {
    elapsed_ms >= duration_ms
}

/// The single timestamp stamped on every phase entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseClock {
    started_at_ms: f64,
}

impl PhaseClock {
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            started_at_ms: now_ms,
        }
    }

    pub fn elapsed(&self, now_ms: f64) -> f64 {
        elapsed(now_ms, self.started_at_ms)
    }

    pub fn expired(&self, now_ms: f64, duration_ms: f64) -> bool {
        expired(self.elapsed(now_ms), duration_ms)
    }
}

pub struct GameTime {
    /// Milliseconds per tick (e.g. 16.67ms = 60 ticks/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since the last restart
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    /// Create a new GameTime with the given tick rate.
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    pub fn ms_per_tick(&self) -> f64 {
        self.ms_per_tick
    }

    /// Start counting from `now_ms` with an empty accumulator.
    pub fn restart(&mut self, now_ms: f64) {
        self.accumulator = 0.0;
        self.total_ticks = 0;
        self.last_timestamp = Some(now_ms);
    }

    /// Feed wall-clock timestamp (from `performance.now()` or similar).
    /// Returns the number of discrete ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // Clamp to avoid spiral-of-death if tab was backgrounded
            Some(prev) => (now_ms - prev).clamp(0.0, 250.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
