use serde::{Deserialize, Serialize};

use super::{ExerciseType, JointAngles};
use crate::reps::RepPhase;
use crate::scoring::ScoreBreakdown;

/// Message returned when the frame carries no usable skeleton.
pub const NO_POSE: &str = "No Pose";
/// Message returned when key landmarks are too poorly tracked.
pub const GET_IN_POSITION: &str = "Get in position...";

/// Squat faults detected across frames rather than from a single pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QualityFlag {
    HeelLift,
    ButtWink,
    GoodMorning,
}

impl QualityFlag {
    pub fn message(&self) -> &'static str {
        match self {
            QualityFlag::HeelLift => "Keep your heels down",
            QualityFlag::ButtWink => "Don't let your pelvis tuck under",
            QualityFlag::GoodMorning => "Drive your chest up with your hips",
        }
    }
}

/// Result of analysing one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub score: f32,
    pub breakdown: ScoreBreakdown,
    pub reps: u32,
    pub rep_phase: RepPhase,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correction: Option<String>,
    pub is_good_form: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joint_angles: Option<JointAngles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_exercise: Option<ExerciseType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quality_flags: Vec<QualityFlag>,
}

impl Feedback {
    /// Placeholder feedback carrying only a status message.
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            breakdown: ScoreBreakdown::default(),
            reps: 0,
            rep_phase: RepPhase::Rest,
            message: message.into(),
            correction: None,
            is_good_form: false,
            joint_angles: None,
            detected_exercise: None,
            quality_flags: Vec::new(),
        }
    }

    pub fn no_pose() -> Self {
        Self::status(NO_POSE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_has_zero_score() {
        let feedback = Feedback::no_pose();
        assert_eq!(feedback.score, 0.0);
        assert_eq!(feedback.reps, 0);
        assert_eq!(feedback.rep_phase, RepPhase::Rest);
        assert_eq!(feedback.message, "No Pose");
        assert!(!feedback.is_good_form);
    }

    #[test]
    fn serializes_camel_case_and_skips_empty_fields() {
        let mut feedback = Feedback::status("Scanning...");
        feedback.detected_exercise = Some(ExerciseType::PushUp);
        let value = serde_json::to_value(&feedback).unwrap();

        assert_eq!(value["repPhase"], "Rest");
        assert_eq!(value["isGoodForm"], false);
        assert_eq!(value["detectedExercise"], "Push Up");
        assert!(value.get("correction").is_none());
        assert!(value.get("qualityFlags").is_none());

        let back: Feedback = serde_json::from_value(value).unwrap();
        assert_eq!(back, feedback);
    }
}
