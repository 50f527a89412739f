//! Animation clock
//!
//! Converts host frame-callback timestamps (milliseconds, as handed to a
//! requestAnimationFrame-style scheduler) into monotonically non-decreasing
//! simulation time in seconds, with play/pause/reset control.
//!
//! The scheduling loop is expected to keep calling [`AnimationClock::tick`]
//! while paused; paused ticks apply no state change, so resume is cheap and
//! the wall-clock gap spent paused never turns into a simulation delta.

use serde::{Deserialize, Serialize};

/// Simulation clock driven by host timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationClock {
    /// Accumulated simulation time (seconds)
    elapsed: f32,
    /// Whether ticks advance time
    running: bool,
    /// Host timestamp of the last applied tick (milliseconds)
    last_timestamp: Option<f64>,
    /// Seconds applied by the most recent tick (0 on latch, pause, or anomaly)
    last_delta: f32,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationClock {
    /// Create a stopped clock at t = 0.
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            running: false,
            last_timestamp: None,
            last_delta: 0.0,
        }
    }

    /// Feed one host timestamp. Returns the elapsed simulation time.
    ///
    /// The first tick after [`play`](Self::play) latches the timestamp as the
    /// baseline without advancing time. Subsequent ticks add the measured
    /// delta. A duplicate or out-of-order timestamp is a no-op step: time
    /// does not advance and the baseline stays where it was.
    pub fn tick(&mut self, host_timestamp_ms: f64) -> f32 {
        if !self.running {
            self.last_delta = 0.0;
            return self.elapsed;
        }

        match self.last_timestamp {
            None => {
                // Baseline latch: no time has passed yet as far as the sim knows
                self.last_timestamp = Some(host_timestamp_ms);
                self.last_delta = 0.0;
            }
            Some(prev) => {
                let delta_ms = host_timestamp_ms - prev;
                if delta_ms > 0.0 {
                    self.last_delta = (delta_ms / 1000.0) as f32;
                    self.elapsed += self.last_delta;
                    self.last_timestamp = Some(host_timestamp_ms);
                } else {
                    // Scheduler jitter: skip this step rather than rewind
                    self.last_delta = 0.0;
                }
            }
        }

        self.elapsed
    }

    /// Start or resume. Clears the baseline so the next tick re-latches
    /// instead of charging the pause gap as one giant delta.
    pub fn play(&mut self) {
        if !self.running {
            self.running = true;
            self.last_timestamp = None;
        }
    }

    /// Suspend time accumulation. Ticks while paused apply no state change.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Zero the clock and clear the baseline. The running flag is untouched,
    /// so resetting mid-play restarts time from zero without a stutter.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.last_timestamp = None;
        self.last_delta = 0.0;
    }

    /// Accumulated simulation time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds applied by the most recent tick.
    #[inline]
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
