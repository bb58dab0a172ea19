//! Per-exercise analysis.
//!
//! Each supported exercise is described by a static [`ExerciseProfile`]: how
//! to derive its completion signal, how it counts, which pillar rules apply,
//! how the pillars are weighted and which corrections to surface. A single
//! [`ExerciseAnalyzer`] type drives any profile.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarRules, PillarWeights, ScoreBreakdown};
use crate::FormCheckError;

mod analyzer;
mod checks;
mod feedback;

pub mod barbell_curl;
pub mod bench_press;
pub mod chest_fly;
pub mod incline_bench;
pub mod lat_pulldown;
pub mod lateral_raise;
pub mod leg_extension;
pub mod leg_raises;
pub mod plank;
pub mod pull_up;
pub mod push_up;
pub mod russian_twist;
pub mod squat;
pub mod t_bar_row;
pub mod tricep_dips;

pub use analyzer::ExerciseAnalyzer;
pub use analyzer::{CORRECTION_SEPARATOR, GOOD_FORM_SCORE};
pub use feedback::{Feedback, QualityFlag, GET_IN_POSITION, NO_POSE};

/// Joint angles reported alongside feedback, keyed by joint name.
pub type JointAngles = BTreeMap<String, f32>;

/// Supported exercises plus the auto-detect sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExerciseType {
    #[serde(rename = "Squat")]
    Squat,
    #[serde(rename = "Push Up")]
    PushUp,
    #[serde(rename = "Bench Press")]
    BenchPress,
    #[serde(rename = "Incline Bench Press")]
    InclineBenchPress,
    #[serde(rename = "Barbell Curl")]
    BarbellCurl,
    #[serde(rename = "Pull Up")]
    PullUp,
    #[serde(rename = "Lat Pulldown")]
    LatPulldown,
    #[serde(rename = "Lateral Raise")]
    LateralRaise,
    #[serde(rename = "Leg Raises")]
    LegRaises,
    #[serde(rename = "Tricep Dips")]
    TricepDips,
    #[serde(rename = "Plank")]
    Plank,
    #[serde(rename = "Russian Twist")]
    RussianTwist,
    #[serde(rename = "T-Bar Row")]
    TBarRow,
    #[serde(rename = "Chest Fly Machine")]
    ChestFlyMachine,
    #[serde(rename = "Leg Extension")]
    LegExtension,
    #[serde(rename = "Auto-Detect")]
    AutoDetect,
}

impl ExerciseType {
    /// Every concrete exercise, excluding [`ExerciseType::AutoDetect`].
    pub const ALL: [ExerciseType; 15] = [
        ExerciseType::Squat,
        ExerciseType::PushUp,
        ExerciseType::BenchPress,
        ExerciseType::InclineBenchPress,
        ExerciseType::BarbellCurl,
        ExerciseType::PullUp,
        ExerciseType::LatPulldown,
        ExerciseType::LateralRaise,
        ExerciseType::LegRaises,
        ExerciseType::TricepDips,
        ExerciseType::Plank,
        ExerciseType::RussianTwist,
        ExerciseType::TBarRow,
        ExerciseType::ChestFlyMachine,
        ExerciseType::LegExtension,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExerciseType::Squat => "Squat",
            ExerciseType::PushUp => "Push Up",
            ExerciseType::BenchPress => "Bench Press",
            ExerciseType::InclineBenchPress => "Incline Bench Press",
            ExerciseType::BarbellCurl => "Barbell Curl",
            ExerciseType::PullUp => "Pull Up",
            ExerciseType::LatPulldown => "Lat Pulldown",
            ExerciseType::LateralRaise => "Lateral Raise",
            ExerciseType::LegRaises => "Leg Raises",
            ExerciseType::TricepDips => "Tricep Dips",
            ExerciseType::Plank => "Plank",
            ExerciseType::RussianTwist => "Russian Twist",
            ExerciseType::TBarRow => "T-Bar Row",
            ExerciseType::ChestFlyMachine => "Chest Fly Machine",
            ExerciseType::LegExtension => "Leg Extension",
            ExerciseType::AutoDetect => "Auto-Detect",
        }
    }

    /// Kebab-case identifier, e.g. `push-up`.
    pub fn id(&self) -> &'static str {
        match self {
            ExerciseType::Squat => "squat",
            ExerciseType::PushUp => "push-up",
            ExerciseType::BenchPress => "bench-press",
            ExerciseType::InclineBenchPress => "incline-bench-press",
            ExerciseType::BarbellCurl => "barbell-curl",
            ExerciseType::PullUp => "pull-up",
            ExerciseType::LatPulldown => "lat-pulldown",
            ExerciseType::LateralRaise => "lateral-raise",
            ExerciseType::LegRaises => "leg-raises",
            ExerciseType::TricepDips => "tricep-dips",
            ExerciseType::Plank => "plank",
            ExerciseType::RussianTwist => "russian-twist",
            ExerciseType::TBarRow => "t-bar-row",
            ExerciseType::ChestFlyMachine => "chest-fly-machine",
            ExerciseType::LegExtension => "leg-extension",
            ExerciseType::AutoDetect => "auto-detect",
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, ExerciseType::AutoDetect)
    }

    /// Static description of the exercise; `None` for auto-detect.
    pub fn profile(&self) -> Option<&'static ExerciseProfile> {
        let profile = match self {
            ExerciseType::Squat => &squat::PROFILE,
            ExerciseType::PushUp => &push_up::PROFILE,
            ExerciseType::BenchPress => &bench_press::PROFILE,
            ExerciseType::InclineBenchPress => &incline_bench::PROFILE,
            ExerciseType::BarbellCurl => &barbell_curl::PROFILE,
            ExerciseType::PullUp => &pull_up::PROFILE,
            ExerciseType::LatPulldown => &lat_pulldown::PROFILE,
            ExerciseType::LateralRaise => &lateral_raise::PROFILE,
            ExerciseType::LegRaises => &leg_raises::PROFILE,
            ExerciseType::TricepDips => &tricep_dips::PROFILE,
            ExerciseType::Plank => &plank::PROFILE,
            ExerciseType::RussianTwist => &russian_twist::PROFILE,
            ExerciseType::TBarRow => &t_bar_row::PROFILE,
            ExerciseType::ChestFlyMachine => &chest_fly::PROFILE,
            ExerciseType::LegExtension => &leg_extension::PROFILE,
            ExerciseType::AutoDetect => return None,
        };
        Some(profile)
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExerciseType {
    type Err = FormCheckError;

    /// Accepts display names or ids in any case; `auto` selects auto-detect.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        if normalized == "auto" {
            return Ok(ExerciseType::AutoDetect);
        }
        ExerciseType::ALL
            .iter()
            .chain(std::iter::once(&ExerciseType::AutoDetect))
            .find(|exercise| exercise.id() == normalized)
            .copied()
            .ok_or_else(|| FormCheckError::UnknownExercise(s.to_string()))
    }
}

/// Completion signal plus the joint angles it was derived from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Motion {
    pub completion: f32,
    pub angles: JointAngles,
}

/// How an exercise turns frames into a count.
#[derive(Debug, Clone, Copy)]
pub enum Counting {
    /// Discrete repetitions through the phase state machine.
    Reps { mode: CountMode, low: f32, high: f32 },
    /// Elapsed whole seconds while `form_ok` holds.
    Hold { form_ok: fn(&Pose<'_>) -> bool },
    /// Side-to-side reversals of the hands around the hips.
    Twist { reach_ratio: f32, min_interval_ms: f64 },
}

/// Inputs visible to a correction builder.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionContext<'a> {
    pub pose: Pose<'a>,
    pub phase: RepPhase,
    pub view: CameraView,
    pub breakdown: &'a ScoreBreakdown,
    pub completion: f32,
}

/// Returns corrections in priority order, most urgent first.
pub type CorrectionFn = fn(&CorrectionContext<'_>) -> Vec<&'static str>;

/// Static description of one exercise.
#[derive(Debug, Clone, Copy)]
pub struct ExerciseProfile {
    pub exercise: ExerciseType,
    pub counting: Counting,
    pub motion: fn(&Pose<'_>) -> Motion,
    pub pillars: PillarRules,
    pub weights: PillarWeights,
    pub corrections: CorrectionFn,
    /// Landmarks that must be visible for the frame to be analysed.
    pub key_landmarks: &'static [usize],
    /// Enables the squat-specific fault detectors.
    pub tracks_faults: bool,
}
