#![forbid(unsafe_code)]

//! Frame clock.
//!
//! Turns wall-clock frame callbacks into clamped `dt` values for the
//! simulators. A long stall (backgrounded tab, debugger pause) produces at
//! most `max_dt`, so particles never jump across the whole volume in one
//! step.

use std::time::Duration;

// std::time::Instant panics on wasm32-unknown-unknown.
use web_time::Instant;

/// Default upper bound on a single frame's `dt`.
pub const DEFAULT_MAX_DT: Duration = Duration::from_millis(100);

/// Measures the time between frames.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_dt: Duration,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DT)
    }
}

impl FrameClock {
    /// Create a clock whose `dt` never exceeds `max_dt`.
    pub fn new(max_dt: Duration) -> Self {
        Self {
            last: None,
            max_dt,
            frames: 0,
        }
    }

    /// Time since the previous tick. The first tick returns zero.
    pub fn tick(&mut self) -> Duration {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit timestamp.
    ///
    /// Timestamps earlier than the previous one yield zero.
    pub fn tick_at(&mut self, now: Instant) -> Duration {
        let dt = match self.last {
            Some(prev) => now.saturating_duration_since(prev).min(self.max_dt),
            None => Duration::ZERO,
        };
        self.last = Some(now);
        self.frames = self.frames.saturating_add(1);
        dt
    }

    /// Count a frame whose `dt` the caller measured itself, clamped like a
    /// measured one. The wall-clock timestamp is left alone.
    pub fn advance(&mut self, dt: Duration) -> Duration {
        self.frames = self.frames.saturating_add(1);
        dt.min(self.max_dt)
    }

    /// Number of frames so far, ticked or advanced.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Forget the previous timestamp; the next tick returns zero.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
