//! T-bar row, performed from a hip hinge.

use super::checks::{hip_drift, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_below, completion};
use crate::pose::landmark::*;
use crate::pose::Pose;
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::TBarRow,
    counting: Counting::Reps {
        mode: CountMode::ConcentricFirst,
        low: 0.35,
        high: 0.60,
    },
    motion,
    pillars: PillarRules {
        stability: Some(soft_knees),
        rom: Some(pull_height),
        posture: Some(hinge),
        efficiency: Some(no_hip_drive),
        bracing: None,
    },
    weights: PillarWeights::new(0.20, 0.25, 0.30, 0.15, 0.10),
    corrections,
    key_landmarks: &[
        LEFT_SHOULDER,
        RIGHT_SHOULDER,
        LEFT_ELBOW,
        RIGHT_ELBOW,
        LEFT_HIP,
        RIGHT_HIP,
    ],
    tracks_faults: false,
};

fn motion(pose: &Pose<'_>) -> Motion {
    let elbow = pose.elbow_angle();
    Motion {
        completion: completion(elbow, 165.0, 80.0),
        angles: joint_angles(&[
            ("elbow", elbow),
            ("torso", pose.torso_lean()),
            ("knee", pose.knee_angle()),
        ]),
    }
}

fn soft_knees(context: &PillarContext<'_>) -> f32 {
    if context.pose.knee_angle() < 130.0 {
        80.0
    } else {
        100.0
    }
}

fn pull_height(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Top {
        return 100.0;
    }
    band_below(context.pose.elbow_angle(), &[(91.0, 100.0), (106.0, 80.0)], 60.0)
}

/// Back held in a 30-75 degree hinge.
fn hinge(context: &PillarContext<'_>) -> f32 {
    let lean = context.pose.torso_lean();
    if (30.0..=75.0).contains(&lean) {
        100.0
    } else if (20.0..=85.0).contains(&lean) {
        80.0
    } else {
        60.0
    }
}

fn no_hip_drive(context: &PillarContext<'_>) -> f32 {
    match hip_drift(context) {
        Some(drift) if drift > 0.04 => 70.0,
        _ => 100.0,
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.posture < 100.0 {
        out.push("Hold a flat back at about 45 degrees");
    }
    if scores.rom < 100.0 {
        out.push("Pull the handles to your chest");
    }
    if scores.efficiency < 100.0 {
        out.push("Don't jerk the weight with your hips");
    }
    if scores.stability < 100.0 {
        out.push("Keep a soft bend in your knees");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::ExerciseAnalyzer;
    use crate::pose::fixtures::{BENT_OVER_ROW, SIDE_STANDING};

    #[test]
    fn hinged_start_position_is_clean() {
        let frame = BENT_OVER_ROW.build();
        let mut row = ExerciseAnalyzer::new(ExerciseType::TBarRow).unwrap();
        let feedback = row.analyze(&frame, 0.0);
        assert_eq!(feedback.rep_phase, RepPhase::Rest);
        assert_eq!(feedback.correction, None);
    }

    #[test]
    fn standing_upright_breaks_the_hinge() {
        let frame = SIDE_STANDING.build();
        let mut row = ExerciseAnalyzer::new(ExerciseType::TBarRow).unwrap();
        let feedback = row.analyze(&frame, 0.0);
        assert_eq!(feedback.breakdown.posture, 60.0);
        assert_eq!(feedback.message, "Hold a flat back at about 45 degrees");
    }
}
