//! Repetition tracking.
//!
//! [`RepCounter`] turns a normalised completion signal into counted
//! repetitions. Timed holds and the side-to-side twist use dedicated
//! trackers in [`hold`] and [`twist`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod hold;
pub mod twist;

pub use hold::HoldTimer;
pub use twist::TwistCounter;

pub const DEFAULT_THRESHOLD_LOW: f32 = 0.35;
pub const DEFAULT_THRESHOLD_HIGH: f32 = 0.55;

/// Completion must fall this far below the high threshold before the peak
/// is considered left.
const PEAK_DEADBAND: f32 = 0.1;

/// Phase of the current repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RepPhase {
    #[default]
    Rest,
    Eccentric,
    Bottom,
    Concentric,
    Top,
}

impl RepPhase {
    pub fn name(&self) -> &'static str {
        match self {
            RepPhase::Rest => "Rest",
            RepPhase::Eccentric => "Eccentric",
            RepPhase::Bottom => "Bottom",
            RepPhase::Concentric => "Concentric",
            RepPhase::Top => "Top",
        }
    }
}

impl fmt::Display for RepPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction in which the phases are walked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountMode {
    /// Starts extended and compresses first (squat, bench, push-up, dips).
    EccentricFirst,
    /// Starts relaxed and contracts first (curl, pull-up, raises).
    ConcentricFirst,
}

impl CountMode {
    /// Phases visited as (resting, leaving rest, at peak, returning).
    fn cycle(self) -> (RepPhase, RepPhase, RepPhase, RepPhase) {
        match self {
            CountMode::EccentricFirst => (
                RepPhase::Top,
                RepPhase::Eccentric,
                RepPhase::Bottom,
                RepPhase::Concentric,
            ),
            CountMode::ConcentricFirst => (
                RepPhase::Bottom,
                RepPhase::Concentric,
                RepPhase::Top,
                RepPhase::Eccentric,
            ),
        }
    }
}

/// Timing of one completed repetition, in milliseconds relative to the
/// recording start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepTimestamp {
    pub start: f64,
    pub mid: f64,
    pub end: f64,
}

/// Result of feeding one sample into a tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepProgress {
    pub count: u32,
    pub phase: RepPhase,
    /// Optional status shown instead of the phase name.
    pub status: Option<&'static str>,
}

/// Five-phase repetition state machine with hysteresis.
#[derive(Debug, Clone)]
pub struct RepCounter {
    count: u32,
    phase: RepPhase,
    threshold_low: f32,
    threshold_high: f32,
    mode: CountMode,
    timestamps: Vec<RepTimestamp>,
    rep_start: Option<f64>,
    rep_mid: Option<f64>,
    phase_changed_at: Option<f64>,
    recording_start: f64,
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new(
            DEFAULT_THRESHOLD_LOW,
            DEFAULT_THRESHOLD_HIGH,
            CountMode::EccentricFirst,
        )
    }
}

impl RepCounter {
    /// Creates a counter. Thresholds are clamped to `[0, 1]` and must satisfy
    /// `low < high`; an inverted pair is swapped.
    pub fn new(threshold_low: f32, threshold_high: f32, mode: CountMode) -> Self {
        let low = threshold_low.clamp(0.0, 1.0);
        let high = threshold_high.clamp(0.0, 1.0);
        let (threshold_low, threshold_high) = if low <= high { (low, high) } else { (high, low) };
        Self {
            count: 0,
            phase: RepPhase::Rest,
            threshold_low,
            threshold_high,
            mode,
            timestamps: Vec::new(),
            rep_start: None,
            rep_mid: None,
            phase_changed_at: None,
            recording_start: 0.0,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    pub fn mode(&self) -> CountMode {
        self.mode
    }

    pub fn thresholds(&self) -> (f32, f32) {
        (self.threshold_low, self.threshold_high)
    }

    pub fn rep_timestamps(&self) -> &[RepTimestamp] {
        &self.timestamps
    }

    /// Relative time of the most recent transition into the peak phase.
    pub fn last_peak_at(&self) -> Option<f64> {
        self.phase_changed_at
    }

    /// Rebases every timestamp recorded from now on.
    pub fn set_recording_start_time(&mut self, start: f64) {
        self.recording_start = start;
    }

    /// Clears count, phase and timing while preserving configuration.
    pub fn reset(&mut self) {
        self.count = 0;
        self.phase = RepPhase::Rest;
        self.timestamps.clear();
        self.rep_start = None;
        self.rep_mid = None;
        self.phase_changed_at = None;
    }

    /// Feeds one completion sample (0 = rest, 1 = peak).
    ///
    /// Transitions are evaluated in cycle order within a single call, so a
    /// sample that skips past several thresholds walks every phase it
    /// crosses.
    pub fn update(&mut self, completion: f32, timestamp: f64) -> RepProgress {
        let completion = if completion.is_finite() { completion } else { 0.0 };
        let now = timestamp - self.recording_start;
        let (resting, leaving, peak, returning) = self.mode.cycle();

        if (self.phase == RepPhase::Rest || self.phase == resting)
            && completion > self.threshold_low
        {
            self.phase = leaving;
            self.rep_start.get_or_insert(now);
        }

        if self.phase == leaving {
            if completion >= self.threshold_high {
                self.phase = peak;
                self.rep_mid = Some(now);
                self.phase_changed_at = Some(now);
            } else if completion < self.threshold_low {
                // False start.
                self.phase = resting;
                self.rep_start = None;
                self.rep_mid = None;
            }
        }

        if self.phase == peak && completion < self.threshold_high - PEAK_DEADBAND {
            self.phase = returning;
        }

        if self.phase == returning {
            if completion <= self.threshold_low {
                self.phase = resting;
                self.complete_rep(now);
            } else if completion > self.threshold_high {
                self.phase = peak;
            }
        }

        RepProgress {
            count: self.count,
            phase: self.phase,
            status: None,
        }
    }

    fn complete_rep(&mut self, now: f64) {
        self.count += 1;
        let start = self.rep_start.take().unwrap_or(now);
        let mid = self.rep_mid.take().unwrap_or(now);
        self.timestamps.push(RepTimestamp {
            start,
            mid,
            end: now,
        });
        tracing::trace!(count = self.count, start, mid, end = now, "repetition completed");
    }
}
