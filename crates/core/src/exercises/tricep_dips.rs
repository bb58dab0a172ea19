use super::checks::{elbow_symmetry, is_front, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_below, completion};
use crate::pose::landmark::*;
use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

/// Neck length, as a fraction of shoulder width, below which the shoulders
/// are shrugged towards the ears.
const SHRUGGED_NECK_RATIO: f32 = 0.35;

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::TricepDips,
    counting: Counting::Reps {
        mode: CountMode::EccentricFirst,
        low: 0.35,
        high: 0.55,
    },
    motion,
    pillars: PillarRules {
        stability: Some(even_push),
        rom: Some(depth),
        posture: Some(upright),
        efficiency: Some(depressed_shoulders),
        bracing: None,
    },
    weights: PillarWeights::new(0.20, 0.30, 0.25, 0.15, 0.10),
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
        completion: completion(elbow, 170.0, 90.0),
        angles: joint_angles(&[("elbow", elbow), ("torso", pose.torso_lean())]),
    }
}

fn even_push(context: &PillarContext<'_>) -> f32 {
    elbow_symmetry(&context.pose)
}

fn depth(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Bottom {
        return 100.0;
    }
    band_below(context.pose.elbow_angle(), &[(96.0, 100.0), (111.0, 80.0)], 60.0)
}

fn upright(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    band_below(context.pose.torso_lean(), &[(20.0, 100.0), (35.0, 80.0)], 60.0)
}

fn depressed_shoulders(context: &PillarContext<'_>) -> f32 {
    if !is_front(context.view) {
        return 100.0;
    }
    let pose = &context.pose;
    let neck = pose.shoulder_mid().y - pose.ear_mid().y;
    if neck / pose.shoulder_width() < SHRUGGED_NECK_RATIO {
        70.0
    } else {
        100.0
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.rom < 100.0 {
        out.push("Lower until your elbows reach 90 degrees");
    }
    if scores.efficiency < 100.0 {
        out.push("Keep your shoulders away from your ears");
    }
    if scores.posture < 100.0 {
        out.push("Stay upright");
    }
    if scores.stability < 100.0 {
        out.push("Push evenly with both arms");
    }
    out
}
