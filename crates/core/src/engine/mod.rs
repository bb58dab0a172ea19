//! Frame-driven orchestrator that owns one analyser per exercise and, in
//! auto-detect mode, decides which of them receives each frame.

use std::collections::{BTreeMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info};

use crate::classifier::classify;
use crate::config::EngineConfig;
use crate::exercises::{ExerciseAnalyzer, ExerciseType, Feedback};
use crate::pose::{Pose, PoseLandmark};
use crate::reps::RepTimestamp;

pub const SCANNING: &str = "Scanning...";

enum Routing {
    Analyze(ExerciseType),
    Pending(Feedback),
}

/// Single-session engine. Not shareable between concurrent callers; create
/// one per session.
#[derive(Debug, Clone)]
pub struct GeometricRuleEngine {
    config: EngineConfig,
    analyzers: BTreeMap<ExerciseType, ExerciseAnalyzer>,
    selected: ExerciseType,
    locked: Option<ExerciseType>,
    candidate: Option<ExerciseType>,
    consecutive: u32,
    shoulder_y: VecDeque<f32>,
    last_feedback: Option<Feedback>,
}

impl Default for GeometricRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GeometricRuleEngine {
    /// Creates an engine in auto-detect mode with the default tunables.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let analyzers = ExerciseType::ALL
            .iter()
            .filter_map(|&exercise| ExerciseAnalyzer::new(exercise).map(|a| (exercise, a)))
            .collect();
        let history = config.shoulder_history_len;
        Self {
            config,
            analyzers,
            selected: ExerciseType::AutoDetect,
            locked: None,
            candidate: None,
            consecutive: 0,
            shoulder_y: VecDeque::with_capacity(history),
            last_feedback: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Selects an exercise, or [`ExerciseType::AutoDetect`], dropping any
    /// lock and movement history.
    pub fn set_exercise(&mut self, exercise: ExerciseType) {
        info!(exercise = %exercise, "exercise selected");
        self.selected = exercise;
        self.clear_lock();
        self.shoulder_y.clear();
        if let Some(analyzer) = self.analyzers.get_mut(&exercise) {
            analyzer.reset();
        }
    }

    /// Rebases rep timestamps of every analyser on `start` (ms).
    pub fn set_recording_start_time(&mut self, start: f64) {
        for analyzer in self.analyzers.values_mut() {
            analyzer.set_recording_start_time(start);
        }
    }

    /// Resets rep state of every analyser, keeping the selection and lock.
    pub fn start_new_set(&mut self) {
        debug!("starting new set");
        for analyzer in self.analyzers.values_mut() {
            analyzer.reset();
        }
        self.last_feedback = None;
    }

    pub fn selected_exercise(&self) -> ExerciseType {
        self.selected
    }

    pub fn locked_exercise(&self) -> Option<ExerciseType> {
        self.locked
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    /// Feedback produced by the most recent frame.
    pub fn current_feedback(&self) -> Option<&Feedback> {
        self.last_feedback.as_ref()
    }

    /// Range of average shoulder height over the recent frame window.
    pub fn movement_variance(&self) -> f32 {
        let max = self.shoulder_y.iter().copied().fold(f32::MIN, f32::max);
        let min = self.shoulder_y.iter().copied().fold(f32::MAX, f32::min);
        if self.shoulder_y.is_empty() {
            0.0
        } else {
            max - min
        }
    }

    /// The exercise currently receiving frames, if any.
    pub fn active_exercise(&self) -> Option<ExerciseType> {
        if self.selected.is_auto() {
            self.locked
        } else {
            Some(self.selected)
        }
    }

    /// Reps (or hold seconds) of the active analyser, unaffected by dropped
    /// frames.
    pub fn rep_count(&self) -> u32 {
        self.active_exercise()
            .and_then(|exercise| self.analyzers.get(&exercise))
            .map_or(0, |analyzer| analyzer.reps())
    }

    pub fn rep_timestamps(&self) -> &[RepTimestamp] {
        self.active_exercise()
            .and_then(|exercise| self.analyzers.get(&exercise))
            .map(|analyzer| analyzer.rep_timestamps())
            .unwrap_or(&[])
    }

    /// Analyses a frame stamped with the current wall-clock time.
    pub fn analyze_frame_now(&mut self, landmarks: &[PoseLandmark]) -> Feedback {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs_f64() * 1000.0)
            .unwrap_or(0.0);
        self.analyze_frame(landmarks, now)
    }

    /// Analyses one frame at `timestamp` (ms). Never fails.
    pub fn analyze_frame(&mut self, landmarks: &[PoseLandmark], timestamp: f64) -> Feedback {
        let feedback = self.process(landmarks, timestamp);
        self.last_feedback = Some(feedback.clone());
        feedback
    }

    fn process(&mut self, landmarks: &[PoseLandmark], timestamp: f64) -> Feedback {
        let Some(pose) = Pose::new(landmarks) else {
            return Feedback::no_pose();
        };
        self.record_shoulder(pose.shoulder_mid().y);
        let variance = self.movement_variance();

        let exercise = if !self.selected.is_auto() {
            self.selected
        } else if let Some(locked) = self.locked {
            self.follow_lock(locked, variance)
        } else {
            match self.seek_lock(landmarks, variance, timestamp) {
                Routing::Analyze(exercise) => exercise,
                Routing::Pending(feedback) => return feedback,
            }
        };

        let Some(analyzer) = self.analyzers.get_mut(&exercise) else {
            return Feedback::no_pose();
        };
        let mut feedback = analyzer.analyze(landmarks, timestamp);
        if self.selected.is_auto() {
            feedback.message = format!("[{}] {}", exercise.name(), feedback.message);
        }
        feedback.detected_exercise = Some(exercise);
        feedback
    }

    fn record_shoulder(&mut self, y: f32) {
        self.shoulder_y.push_back(y);
        while self.shoulder_y.len() > self.config.shoulder_history_len {
            self.shoulder_y.pop_front();
        }
    }

    /// Keeps the lock, except that a plank showing movement is a push-up.
    fn follow_lock(&mut self, locked: ExerciseType, variance: f32) -> ExerciseType {
        if locked == ExerciseType::Plank && variance > self.config.movement_variance_threshold {
            info!(variance, "movement detected, switching plank lock to push up");
            self.locked = Some(ExerciseType::PushUp);
            return ExerciseType::PushUp;
        }
        locked
    }

    fn seek_lock(&mut self, landmarks: &[PoseLandmark], variance: f32, timestamp: f64) -> Routing {
        let Some(mut candidate) = classify(landmarks) else {
            self.candidate = None;
            self.consecutive = 0;
            return Routing::Pending(Feedback::status(SCANNING));
        };

        let mut threshold = self.config.lock_frames_for(candidate);
        let moving = variance > self.config.movement_variance_threshold;
        if moving && matches!(candidate, ExerciseType::Plank | ExerciseType::PushUp) {
            candidate = ExerciseType::PushUp;
            threshold = self.config.dynamic_lock_frames;
        }

        if self.candidate == Some(candidate) {
            self.consecutive += 1;
        } else {
            debug!(candidate = %candidate, "new detection candidate");
            self.candidate = Some(candidate);
            self.consecutive = 1;
        }

        if self.consecutive <= threshold {
            return Routing::Pending(Feedback::status(format!("Detecting {}...", candidate.name())));
        }

        info!(exercise = %candidate, frames = self.consecutive, "exercise locked");
        self.locked = Some(candidate);
        self.candidate = None;
        self.consecutive = 0;
        if candidate == ExerciseType::Plank {
            let seconds = f64::from(threshold) / self.config.nominal_fps;
            if let Some(plank) = self.analyzers.get_mut(&candidate) {
                plank.seed_hold(seconds, timestamp);
            }
        }
        Routing::Analyze(candidate)
    }

    fn clear_lock(&mut self) {
        self.locked = None;
        self.candidate = None;
        self.consecutive = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::fixtures::*;

    /// Feeds frames at the nominal 6 fps cadence, carrying the clock along.
    struct Session {
        engine: GeometricRuleEngine,
        t: f64,
    }

    impl Session {
        fn new() -> Self {
            Self {
                engine: GeometricRuleEngine::new(),
                t: 0.0,
            }
        }

        fn feed(&mut self, frame: &[PoseLandmark], count: usize) -> Feedback {
            let mut last = Feedback::no_pose();
            for _ in 0..count {
                last = self.engine.analyze_frame(frame, self.t);
                self.t += 166.0;
            }
            last
        }
    }

    #[test]
    fn no_pose_is_reported_in_band() {
        let mut engine = GeometricRuleEngine::new();
        let feedback = engine.analyze_frame(&[], 0.0);
        assert_eq!(feedback.message, "No Pose");
        assert_eq!(feedback.score, 0.0);
        assert!(!engine.is_locked());
    }

    #[test]
    fn lock_requires_exceeding_the_threshold() {
        let curl = CURL_TOP.build();
        let mut session = Session::new();

        let pending = session.feed(&curl, 6);
        assert!(!session.engine.is_locked());
        assert_eq!(pending.message, "Detecting Barbell Curl...");
        assert_eq!(pending.reps, 0);
        assert_eq!(pending.detected_exercise, None);

        let locked = session.feed(&curl, 1);
        assert_eq!(session.engine.locked_exercise(), Some(ExerciseType::BarbellCurl));
        assert_eq!(locked.detected_exercise, Some(ExerciseType::BarbellCurl));
        assert!(locked.message.starts_with("[Barbell Curl] "));

        // Frames the classifier reads differently still go to the lock.
        let twist = session.feed(&V_SIT.build(), 1);
        assert_eq!(twist.detected_exercise, Some(ExerciseType::BarbellCurl));
    }

    #[test]
    fn unclassified_frame_breaks_the_streak() {
        let curl = CURL_TOP.build();
        let mut session = Session::new();
        session.feed(&curl, 5);

        let scanning = session.feed(&standing(), 1);
        assert_eq!(scanning.message, SCANNING);
        assert_eq!(session.engine.consecutive, 0);

        session.feed(&curl, 6);
        assert!(!session.engine.is_locked());
        session.feed(&curl, 1);
        assert!(session.engine.is_locked());
    }

    #[test]
    fn plank_lock_seeds_hold_then_switches_on_movement() {
        let plank = PLANK.build();
        let mut session = Session::new();

        session.feed(&plank, 30);
        assert!(!session.engine.is_locked());
        let locked = session.feed(&plank, 1);
        assert_eq!(session.engine.locked_exercise(), Some(ExerciseType::Plank));
        assert_eq!(locked.reps, 5);

        let moved = session.feed(&PLANK.skeleton().shifted(0.0, 0.08).build(), 1);
        assert!(session.engine.movement_variance() > 0.05);
        assert_eq!(session.engine.locked_exercise(), Some(ExerciseType::PushUp));
        assert_eq!(moved.detected_exercise, Some(ExerciseType::PushUp));
        assert!(moved.message.starts_with("[Push Up] "));
    }

    #[test]
    fn moving_plank_candidate_fast_locks_push_up() {
        let top = PUSH_UP_TOP.build();
        let bottom = PUSH_UP_BOTTOM.build();
        let mut session = Session::new();

        for _ in 0..2 {
            session.feed(&top, 1);
            session.feed(&bottom, 1);
        }
        session.feed(&top, 1);
        assert!(!session.engine.is_locked());
        session.feed(&bottom, 1);
        assert_eq!(session.engine.locked_exercise(), Some(ExerciseType::PushUp));
    }

    #[test]
    fn leg_extension_cycle_locks_under_auto_detect() {
        let bent = LEG_EXTENSION_BOTTOM.build();
        let extended = LEG_EXTENSION_TOP.build();
        let mut session = Session::new();

        for _ in 0..3 {
            session.feed(&bent, 1);
            session.feed(&extended, 1);
        }
        assert!(!session.engine.is_locked());
        assert_eq!(session.engine.consecutive, 6);

        let locked = session.feed(&bent, 1);
        assert_eq!(session.engine.locked_exercise(), Some(ExerciseType::LegExtension));
        assert_eq!(locked.detected_exercise, Some(ExerciseType::LegExtension));
    }

    #[test]
    fn manual_selection_routes_directly() {
        let mut session = Session::new();
        session.engine.set_exercise(ExerciseType::Squat);
        let feedback = session.feed(&SIDE_STANDING.build(), 1);
        assert_eq!(feedback.detected_exercise, Some(ExerciseType::Squat));
        assert!(!feedback.message.starts_with('['));
        assert!(!session.engine.is_locked());
        assert_eq!(session.engine.active_exercise(), Some(ExerciseType::Squat));
    }

    #[test]
    fn reselecting_auto_drops_the_lock() {
        let curl = CURL_TOP.build();
        let mut session = Session::new();
        session.feed(&curl, 7);
        assert!(session.engine.is_locked());

        session.engine.set_exercise(ExerciseType::AutoDetect);
        assert!(!session.engine.is_locked());
        assert_eq!(session.engine.movement_variance(), 0.0);
        assert!(session.engine.rep_timestamps().is_empty());
    }
}
