use super::checks::{elbow_symmetry, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_below, completion};
use crate::pose::landmark::*;
use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::LatPulldown,
    counting: Counting::Reps {
        mode: CountMode::ConcentricFirst,
        low: 0.35,
        high: 0.60,
    },
    motion,
    pillars: PillarRules {
        stability: Some(no_rocking),
        rom: Some(bar_to_chest),
        posture: Some(lean_back),
        efficiency: Some(even_pull),
        bracing: None,
    },
    weights: PillarWeights::new(0.20, 0.30, 0.25, 0.20, 0.05),
    corrections,
    key_landmarks: &[
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
        completion: completion(elbow, 165.0, 70.0),
        angles: joint_angles(&[("elbow", elbow), ("torso", pose.torso_lean())]),
    }
}

/// Torso rocking to move the weight, measured against the oldest frame.
fn no_rocking(context: &PillarContext<'_>) -> f32 {
    let Some(baseline) = context.baseline() else {
        return 100.0;
    };
    let travel = (baseline.shoulder_mid().x - context.pose.shoulder_mid().x).abs();
    if travel > 0.05 {
        70.0
    } else {
        100.0
    }
}

fn bar_to_chest(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Top {
        return 100.0;
    }
    let pose = &context.pose;
    if pose.wrist_mid().y >= pose.shoulder_mid().y - 0.05 {
        100.0
    } else if pose.elbow_angle() <= 90.0 {
        80.0
    } else {
        60.0
    }
}

fn lean_back(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    band_below(context.pose.torso_lean(), &[(20.0, 100.0), (30.0, 80.0)], 60.0)
}

fn even_pull(context: &PillarContext<'_>) -> f32 {
    elbow_symmetry(&context.pose)
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.rom < 100.0 {
        out.push("Pull the bar to your upper chest");
    }
    if scores.posture < 100.0 {
        out.push("Don't lean back so far");
    }
    if scores.stability < 100.0 {
        out.push("Control the weight, don't rock");
    }
    if scores.efficiency < 100.0 {
        out.push("Pull evenly with both arms");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::ExerciseAnalyzer;
    use crate::pose::fixtures::seated;
    use crate::pose::PoseLandmark;

    /// Seated front view; the right arm mirrors the left.
    fn arms(elbows: (f32, f32), wrists: (f32, f32)) -> Vec<PoseLandmark> {
        let mut skeleton = seated();
        skeleton.pair(
            LEFT_ELBOW,
            RIGHT_ELBOW,
            (elbows.0, elbows.1),
            (1.0 - elbows.0, elbows.1),
        );
        skeleton.pair(
            LEFT_WRIST,
            RIGHT_WRIST,
            (wrists.0, wrists.1),
            (1.0 - wrists.0, wrists.1),
        );
        skeleton.build()
    }

    #[test]
    fn counts_reach_pull_reach() {
        let reach = arms((0.68, 0.18), (0.7, 0.05));
        let pulled = arms((0.74, 0.4), (0.68, 0.26));
        let mut pulldown = ExerciseAnalyzer::new(ExerciseType::LatPulldown).unwrap();

        pulldown.analyze(&reach, 0.0);
        let top = pulldown.analyze(&pulled, 100.0);
        assert_eq!(top.rep_phase, RepPhase::Top);
        assert_eq!(top.correction, None);

        let last = pulldown.analyze(&reach, 200.0);
        assert_eq!(last.reps, 1);
        assert_eq!(last.rep_phase, RepPhase::Bottom);
        assert!(last.is_good_form, "{last:?}");
    }

    #[test]
    fn bar_stopping_above_the_face_is_called_out() {
        let reach = arms((0.68, 0.18), (0.7, 0.05));
        let short = arms((0.75, 0.25), (0.72, 0.12));
        let mut pulldown = ExerciseAnalyzer::new(ExerciseType::LatPulldown).unwrap();

        pulldown.analyze(&reach, 0.0);
        let feedback = pulldown.analyze(&short, 100.0);
        assert_eq!(feedback.rep_phase, RepPhase::Top);
        assert_eq!(feedback.breakdown.rom, 60.0);
        assert_eq!(feedback.message, "Pull the bar to your upper chest");
    }
}
