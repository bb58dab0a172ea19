//! Timed hold tracking for static exercises.

use super::{RepPhase, RepProgress};

/// Form must stay acceptable this long before time starts accruing.
pub const STABILIZE_MS: f64 = 500.0;

/// Accumulates time spent holding an acceptable position.
///
/// Breaking form restarts the stabilising buffer but keeps the time already
/// banked. The reported count is elapsed whole seconds.
#[derive(Debug, Clone, Default)]
pub struct HoldTimer {
    elapsed_ms: f64,
    stable_since: Option<f64>,
    last_timestamp: Option<f64>,
}

impl HoldTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn elapsed_seconds(&self) -> u32 {
        (self.elapsed_ms / 1000.0).floor().max(0.0) as u32
    }

    pub fn is_holding(&self) -> bool {
        self.stable_since.is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Credits time already spent holding before this timer was fed, and
    /// skips the stabilising buffer so accrual continues from `now`.
    pub fn seed(&mut self, seconds: f64, now: f64) {
        self.elapsed_ms = (seconds * 1000.0).max(0.0);
        self.stable_since = Some(now - STABILIZE_MS);
        self.last_timestamp = Some(now);
    }

    pub fn update(&mut self, form_ok: bool, timestamp: f64) -> RepProgress {
        let previous = self.last_timestamp.replace(timestamp);

        if !form_ok {
            self.stable_since = None;
            return self.progress(RepPhase::Rest, "Get into position");
        }

        let since = *self.stable_since.get_or_insert(timestamp);
        let counting_from = since + STABILIZE_MS;
        if timestamp < counting_from {
            return self.progress(RepPhase::Rest, "Stabilizing...");
        }

        // Only the part of this interval past the buffer is credited.
        let window_start = previous.unwrap_or(timestamp).max(counting_from);
        self.elapsed_ms += (timestamp - window_start).max(0.0);
        self.progress(RepPhase::Top, "Holding")
    }

    fn progress(&self, phase: RepPhase, status: &'static str) -> RepProgress {
        RepProgress {
            count: self.elapsed_seconds(),
            phase,
            status: Some(status),
        }
    }
}
