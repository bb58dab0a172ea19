use super::checks::{elbow_symmetry, hip_drift, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_at_least, band_below, completion};
use crate::pose::landmark::*;
use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::PullUp,
    counting: Counting::Reps {
        mode: CountMode::ConcentricFirst,
        low: 0.40,
        high: 0.55,
    },
    motion,
    pillars: PillarRules {
        stability: Some(no_kip),
        rom: Some(chin_over_bar),
        posture: Some(vertical_body),
        efficiency: Some(even_pull),
        bracing: Some(straight_legs),
    },
    weights: PillarWeights::new(0.25, 0.30, 0.15, 0.20, 0.10),
    corrections,
    key_landmarks: &[
        NOSE,
        LEFT_SHOULDER,
        RIGHT_SHOULDER,
        LEFT_ELBOW,
        RIGHT_ELBOW,
        LEFT_WRIST,
        RIGHT_WRIST,
    ],
    tracks_faults: false,
};

fn motion(pose: &Pose<'_>) -> Motion {
    let elbow = pose.elbow_angle();
    Motion {
        completion: completion(elbow, 160.0, 70.0),
        angles: joint_angles(&[("elbow", elbow), ("shoulder", pose.shoulder_angle())]),
    }
}

fn no_kip(context: &PillarContext<'_>) -> f32 {
    match hip_drift(context) {
        Some(drift) if drift > 0.05 => 70.0,
        _ => 100.0,
    }
}

fn chin_over_bar(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Top {
        return 100.0;
    }
    let pose = &context.pose;
    if pose.nose().y < pose.wrist_mid().y + 0.02 {
        100.0
    } else if pose.elbow_angle() <= 80.0 {
        80.0
    } else {
        60.0
    }
}

fn vertical_body(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    band_below(context.pose.torso_lean(), &[(20.0, 100.0), (35.0, 80.0)], 60.0)
}

fn even_pull(context: &PillarContext<'_>) -> f32 {
    elbow_symmetry(&context.pose)
}

fn straight_legs(context: &PillarContext<'_>) -> f32 {
    band_at_least(context.pose.knee_angle(), &[(150.0, 100.0)], 80.0)
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.rom < 100.0 {
        out.push("Pull your chin over the bar");
    }
    if scores.stability < 100.0 {
        out.push("Stop swinging");
    }
    if scores.efficiency < 100.0 {
        out.push("Pull evenly with both arms");
    }
    if scores.posture < 100.0 {
        out.push("Keep your body vertical");
    }
    if scores.bracing < 100.0 {
        out.push("Keep your legs straight");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::ExerciseAnalyzer;
    use crate::pose::fixtures::hanging;

    #[test]
    fn dead_hang_is_at_rest() {
        let frame = hanging().build();
        let mut pull_up = ExerciseAnalyzer::new(ExerciseType::PullUp).unwrap();
        let feedback = pull_up.analyze(&frame, 0.0);
        assert_eq!(feedback.rep_phase, RepPhase::Rest);
        assert_eq!(feedback.reps, 0);
        assert_eq!(feedback.correction, None);
    }
}
