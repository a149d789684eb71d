//! Timer abstraction for the capture sequence.
//!
//! The countdown and the post-capture settle delay are the only suspension
//! points in a photo session. They go through [`Timer`] so sessions can run
//! against real time ([`TokioTimer`]) or a deterministic stub
//! ([`SimulatedTimer`]) in tests.

use std::sync::Mutex;
use std::time::Duration;

use crate::config::CaptureDefaults;

/// Something that can suspend the caller for a duration.
#[async_trait::async_trait]
pub trait Timer: Send + Sync {
    /// Wait for `duration` to elapse.
    async fn sleep(&self, duration: Duration);
}

/// Real timer backed by the tokio runtime.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

#[async_trait::async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Timer that never blocks and records every requested delay.
#[derive(Debug, Default)]
pub struct SimulatedTimer {
    waits: Mutex<Vec<Duration>>,
}

impl SimulatedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All delays requested so far, in order.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.lock().map(|w| w.clone()).unwrap_or_default()
    }

    /// Virtual time elapsed (sum of all requested delays).
    pub fn elapsed(&self) -> Duration {
        self.waits().iter().sum()
    }
}

#[async_trait::async_trait]
impl Timer for SimulatedTimer {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut waits) = self.waits.lock() {
            waits.push(duration);
        }
    }
}

/// Durations that drive one capture cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceTiming {
    /// Countdown start value (counts down to zero, one tick per step). Zero
    /// shoots immediately.
    pub countdown_start: u32,
    /// Interval between countdown ticks.
    pub tick: Duration,
    /// How long the flash overlay stays visible.
    pub flash: Duration,
    /// Delay after a shot before the next countdown begins.
    pub settle: Duration,
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self {
            countdown_start: 3,
            tick: Duration::from_secs(1),
            flash: Duration::from_millis(500),
            settle: Duration::from_secs(1),
        }
    }
}

impl From<&CaptureDefaults> for SequenceTiming {
    fn from(defaults: &CaptureDefaults) -> Self {
        Self {
            countdown_start: defaults.countdown_start,
            tick: Duration::from_millis(defaults.tick_ms),
            flash: Duration::from_millis(defaults.flash_ms),
            settle: Duration::from_millis(defaults.settle_ms),
        }
    }
}

impl SequenceTiming {
    /// Wall time one full cycle (countdown, shot, settle) takes.
    pub fn cycle_duration(&self) -> Duration {
        self.tick * self.countdown_start + self.settle
    }
}
