use super::feedback::GET_IN_POSITION;
use super::squat::FaultTracker;
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Feedback};
use crate::pose::{Pose, PoseLandmark, MIN_KEY_VISIBILITY};
use crate::reps::{HoldTimer, RepCounter, RepProgress, RepTimestamp, TwistCounter};
use crate::scoring::BiomechanicalScorer;

/// Weighted score an athlete must exceed, with no quality flags raised, for
/// the frame to count as good form.
pub const GOOD_FORM_SCORE: f32 = 80.0;

/// Separator used when several corrections are reported together.
pub const CORRECTION_SEPARATOR: &str = " | ";

#[derive(Debug, Clone)]
enum Tracker {
    Reps(RepCounter),
    Hold {
        timer: HoldTimer,
        form_ok: fn(&Pose<'_>) -> bool,
    },
    Twist(TwistCounter),
}

impl Tracker {
    fn for_counting(counting: Counting) -> Self {
        match counting {
            Counting::Reps { mode, low, high } => Tracker::Reps(RepCounter::new(low, high, mode)),
            Counting::Hold { form_ok } => Tracker::Hold {
                timer: HoldTimer::new(),
                form_ok,
            },
            Counting::Twist {
                reach_ratio,
                min_interval_ms,
            } => Tracker::Twist(TwistCounter::new(reach_ratio, min_interval_ms)),
        }
    }

    fn update(&mut self, pose: &Pose<'_>, completion: f32, timestamp: f64) -> RepProgress {
        match self {
            Tracker::Reps(counter) => counter.update(completion, timestamp),
            Tracker::Hold { timer, form_ok } => timer.update((*form_ok)(pose), timestamp),
            Tracker::Twist(counter) => counter.update(pose, timestamp),
        }
    }

    fn count(&self) -> u32 {
        match self {
            Tracker::Reps(counter) => counter.count(),
            Tracker::Hold { timer, .. } => timer.elapsed_seconds(),
            Tracker::Twist(counter) => counter.count(),
        }
    }

    fn rep_timestamps(&self) -> &[RepTimestamp] {
        match self {
            Tracker::Reps(counter) => counter.rep_timestamps(),
            Tracker::Hold { .. } => &[],
            Tracker::Twist(counter) => counter.rep_timestamps(),
        }
    }

    fn set_recording_start_time(&mut self, start: f64) {
        match self {
            Tracker::Reps(counter) => counter.set_recording_start_time(start),
            Tracker::Hold { .. } => {}
            Tracker::Twist(counter) => counter.set_recording_start_time(start),
        }
    }

    fn reset(&mut self) {
        match self {
            Tracker::Reps(counter) => counter.reset(),
            Tracker::Hold { timer, .. } => timer.reset(),
            Tracker::Twist(counter) => counter.reset(),
        }
    }
}

/// Stateful analyser for one exercise: rep tracking, pillar scoring and
/// corrections driven by that exercise's [`ExerciseProfile`].
#[derive(Debug, Clone)]
pub struct ExerciseAnalyzer {
    profile: &'static ExerciseProfile,
    tracker: Tracker,
    scorer: BiomechanicalScorer,
    faults: Option<FaultTracker>,
}

impl ExerciseAnalyzer {
    /// Returns `None` for [`ExerciseType::AutoDetect`], which has no profile.
    pub fn new(exercise: ExerciseType) -> Option<Self> {
        exercise.profile().map(Self::from_profile)
    }

    pub fn from_profile(profile: &'static ExerciseProfile) -> Self {
        Self {
            profile,
            tracker: Tracker::for_counting(profile.counting),
            scorer: BiomechanicalScorer::new(profile.pillars),
            faults: profile.tracks_faults.then(FaultTracker::default),
        }
    }

    pub fn exercise(&self) -> ExerciseType {
        self.profile.exercise
    }

    pub fn profile(&self) -> &'static ExerciseProfile {
        self.profile
    }

    /// Repetitions, or whole seconds held for timed exercises.
    pub fn reps(&self) -> u32 {
        self.tracker.count()
    }

    pub fn rep_timestamps(&self) -> &[RepTimestamp] {
        self.tracker.rep_timestamps()
    }

    pub fn set_recording_start_time(&mut self, start: f64) {
        self.tracker.set_recording_start_time(start);
    }

    /// Credits hold time accrued before this analyser started receiving
    /// frames. Has no effect on non-timed exercises.
    pub fn seed_hold(&mut self, seconds: f64, now: f64) {
        if let Tracker::Hold { timer, .. } = &mut self.tracker {
            timer.seed(seconds, now);
        }
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
        self.scorer.reset();
        if let Some(faults) = &mut self.faults {
            faults.reset();
        }
    }

    /// Analyses one frame. Never fails: missing or poorly tracked poses
    /// produce placeholder feedback and leave the tracker untouched.
    pub fn analyze(&mut self, landmarks: &[PoseLandmark], timestamp: f64) -> Feedback {
        let Some(pose) = Pose::new(landmarks) else {
            return Feedback::no_pose();
        };
        if pose.visibility_of(self.profile.key_landmarks) < MIN_KEY_VISIBILITY {
            let mut feedback = Feedback::status(GET_IN_POSITION);
            feedback.reps = self.reps();
            return feedback;
        }

        let view = pose.view();
        let motion = (self.profile.motion)(&pose);
        let progress = self.tracker.update(&pose, motion.completion, timestamp);
        let mut breakdown = self.scorer.analyze_pillars(pose, progress.phase, view);

        let context = CorrectionContext {
            pose,
            phase: progress.phase,
            view,
            breakdown: &breakdown,
            completion: motion.completion,
        };
        let mut corrections: Vec<String> = (self.profile.corrections)(&context)
            .into_iter()
            .map(String::from)
            .collect();

        let quality_flags = match &mut self.faults {
            Some(faults) => faults.observe(&pose, progress.phase, view),
            None => Vec::new(),
        };
        corrections.extend(quality_flags.iter().map(|flag| flag.message().to_string()));

        breakdown.total = self.profile.weights.total(&breakdown);
        let message = match corrections.first() {
            Some(first) => first.clone(),
            None => progress.status.unwrap_or(progress.phase.name()).to_string(),
        };
        let correction = (!corrections.is_empty()).then(|| corrections.join(CORRECTION_SEPARATOR));

        Feedback {
            score: breakdown.total,
            breakdown,
            reps: progress.count,
            rep_phase: progress.phase,
            message,
            correction,
            is_good_form: breakdown.total > GOOD_FORM_SCORE && quality_flags.is_empty(),
            joint_angles: Some(motion.angles),
            detected_exercise: None,
            quality_flags,
        }
    }
}
