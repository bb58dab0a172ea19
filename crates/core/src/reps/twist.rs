//! Side-to-side rotation counter.

use super::{RepPhase, RepProgress, RepTimestamp};
use crate::pose::Pose;

/// Hands must travel this fraction of shoulder width away from the hips to
/// register a side.
pub const DEFAULT_REACH_RATIO: f32 = 0.5;
/// Minimum spacing between two counted twists.
pub const DEFAULT_MIN_INTERVAL_MS: f64 = 500.0;
/// Hands within this fraction of shoulder width of the hips count as centred.
const CENTRE_TOLERANCE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Counts one repetition per reversal from one side to the other.
///
/// A reversal only counts when the hands crossed the body's centreline in
/// between and the refractory interval since the previous count elapsed.
#[derive(Debug, Clone)]
pub struct TwistCounter {
    count: u32,
    reach_ratio: f32,
    min_interval_ms: f64,
    side: Option<Side>,
    side_since: Option<f64>,
    crossed_at: Option<f64>,
    last_rep_at: Option<f64>,
    timestamps: Vec<RepTimestamp>,
    recording_start: f64,
}

impl Default for TwistCounter {
    fn default() -> Self {
        Self::new(DEFAULT_REACH_RATIO, DEFAULT_MIN_INTERVAL_MS)
    }
}

impl TwistCounter {
    pub fn new(reach_ratio: f32, min_interval_ms: f64) -> Self {
        Self {
            count: 0,
            reach_ratio,
            min_interval_ms,
            side: None,
            side_since: None,
            crossed_at: None,
            last_rep_at: None,
            timestamps: Vec::new(),
            recording_start: 0.0,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn rep_timestamps(&self) -> &[RepTimestamp] {
        &self.timestamps
    }

    pub fn set_recording_start_time(&mut self, start: f64) {
        self.recording_start = start;
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.side = None;
        self.side_since = None;
        self.crossed_at = None;
        self.last_rep_at = None;
        self.timestamps.clear();
    }

    /// Horizontal offset of the hands from the hips relative to the reach
    /// threshold; `1.0` means exactly at the threshold.
    pub fn reach(&self, pose: &Pose<'_>) -> f32 {
        let offset = pose.wrist_mid().x - pose.hip_mid().x;
        offset.abs() / (pose.shoulder_width() * self.reach_ratio)
    }

    pub fn update(&mut self, pose: &Pose<'_>, timestamp: f64) -> RepProgress {
        let now = timestamp - self.recording_start;
        let offset = pose.wrist_mid().x - pose.hip_mid().x;
        let threshold = pose.shoulder_width() * self.reach_ratio;
        let current = if offset > threshold {
            Some(Side::Right)
        } else if offset < -threshold {
            Some(Side::Left)
        } else {
            None
        };

        if let Some(side) = self.side {
            let centre = pose.shoulder_width() * CENTRE_TOLERANCE;
            if offset * side.sign() <= centre && self.crossed_at.is_none() {
                self.crossed_at = Some(now);
            }
        }

        match (self.side, current) {
            (None, Some(side)) => {
                self.side = Some(side);
                self.side_since = Some(now);
            }
            (Some(previous), Some(side)) if previous != side => {
                let rested = self
                    .last_rep_at
                    .map(|last| now - last >= self.min_interval_ms)
                    .unwrap_or(true);
                if self.crossed_at.is_some() && rested {
                    self.count_rep(side, now);
                }
            }
            _ => {}
        }

        let phase = match (current, self.side) {
            (Some(_), _) => RepPhase::Top,
            (None, Some(_)) => RepPhase::Concentric,
            (None, None) => RepPhase::Rest,
        };

        RepProgress {
            count: self.count,
            phase,
            status: None,
        }
    }

    fn count_rep(&mut self, side: Side, now: f64) {
        self.count += 1;
        self.timestamps.push(RepTimestamp {
            start: self.side_since.unwrap_or(now),
            mid: self.crossed_at.unwrap_or(now),
            end: now,
        });
        self.side = Some(side);
        self.side_since = Some(now);
        self.crossed_at = None;
        self.last_rep_at = Some(now);
        tracing::trace!(count = self.count, ?side, "twist counted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::fixtures::Skeleton;
    use crate::pose::landmark::{LEFT_WRIST, RIGHT_WRIST};
    use crate::pose::PoseLandmark;

    /// Standing skeleton (hips centred at x = 0.5, shoulder width 0.2) with
    /// both hands brought together at `x`.
    fn hands_at(x: f32) -> Vec<PoseLandmark> {
        let mut skeleton = Skeleton::standing();
        skeleton.set(LEFT_WRIST, x + 0.02, 0.55);
        skeleton.set(RIGHT_WRIST, x - 0.02, 0.55);
        skeleton.build()
    }

    fn run(counter: &mut TwistCounter, steps: &[(f32, f64)]) -> RepProgress {
        let mut last = None;
        for &(x, t) in steps {
            let frame = hands_at(x);
            let pose = Pose::new(&frame).unwrap();
            last = Some(counter.update(&pose, t));
        }
        last.unwrap()
    }

    #[test]
    fn counts_each_reversal_through_centre() {
        let mut counter = TwistCounter::default();
        let progress = run(
            &mut counter,
            &[(0.65, 0.0), (0.5, 300.0), (0.35, 600.0), (0.5, 900.0), (0.65, 1_200.0)],
        );
        assert_eq!(progress.count, 2);
        assert_eq!(progress.phase, RepPhase::Top);
        assert_eq!(counter.rep_timestamps().len(), 2);
        let first = counter.rep_timestamps()[0];
        assert_eq!((first.start, first.mid, first.end), (0.0, 300.0, 600.0));
    }

    #[test]
    fn enforces_refractory_interval() {
        let mut counter = TwistCounter::default();
        let progress = run(
            &mut counter,
            &[(0.65, 0.0), (0.5, 100.0), (0.35, 200.0), (0.5, 300.0), (0.65, 400.0)],
        );
        assert_eq!(progress.count, 1);

        // Still on the new side once the interval has passed.
        let progress = run(&mut counter, &[(0.66, 800.0)]);
        assert_eq!(progress.count, 2);
    }

    #[test]
    fn ignores_jitter_without_crossing_centre() {
        let mut counter = TwistCounter::default();
        let progress = run(
            &mut counter,
            &[(0.65, 0.0), (0.58, 600.0), (0.65, 1_200.0), (0.59, 1_800.0), (0.66, 2_400.0)],
        );
        assert_eq!(progress.count, 0);
    }

    #[test]
    fn reports_reach_relative_to_threshold() {
        let counter = TwistCounter::default();
        let frame = hands_at(0.7);
        let pose = Pose::new(&frame).unwrap();
        assert!((counter.reach(&pose) - 2.0).abs() < 1e-4);
    }
}
