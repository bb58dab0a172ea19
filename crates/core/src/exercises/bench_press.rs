//! Flat bench press. The incline variant reuses most of these rules.

use super::checks::{elbow_symmetry, hip_rise, is_front, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_below, completion};
use crate::pose::landmark::*;
use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub(super) const PRESS_KEY_LANDMARKS: &[usize] = &[
    LEFT_SHOULDER,
    RIGHT_SHOULDER,
    LEFT_ELBOW,
    RIGHT_ELBOW,
    LEFT_WRIST,
    RIGHT_WRIST,
];

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::BenchPress,
    counting: Counting::Reps {
        mode: CountMode::EccentricFirst,
        low: 0.35,
        high: 0.60,
    },
    motion,
    pillars: PillarRules {
        stability: Some(even_press),
        rom: Some(depth),
        posture: Some(elbow_flare),
        efficiency: Some(bar_path),
        bracing: Some(hips_down),
    },
    weights: PillarWeights::new(0.25, 0.25, 0.20, 0.20, 0.10),
    corrections,
    key_landmarks: PRESS_KEY_LANDMARKS,
    tracks_faults: false,
};

pub(super) fn motion(pose: &Pose<'_>) -> Motion {
    let elbow = pose.elbow_angle();
    Motion {
        completion: completion(elbow, 170.0, 80.0),
        angles: joint_angles(&[("elbow", elbow), ("shoulder", pose.shoulder_angle())]),
    }
}

/// Both arms extending together, with the bar level.
pub(super) fn even_press(context: &PillarContext<'_>) -> f32 {
    let pose = &context.pose;
    if pose.vertical_gap(LEFT_WRIST, RIGHT_WRIST) > 0.04 {
        return 70.0;
    }
    elbow_symmetry(pose)
}

fn depth(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Bottom {
        return 100.0;
    }
    band_below(context.pose.elbow_angle(), &[(96.0, 100.0), (111.0, 80.0)], 60.0)
}

pub(super) fn elbow_flare(context: &PillarContext<'_>) -> f32 {
    if is_front(context.view)
        && context.phase != RepPhase::Rest
        && context.pose.shoulder_angle() > 80.0
    {
        70.0
    } else {
        100.0
    }
}

/// Wrists stacked over the elbows, seen from the side.
pub(super) fn bar_path(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    let pose = &context.pose;
    let offset = (pose.wrist_mid().x - pose.elbow_mid().x).abs();
    band_below(offset, &[(0.05, 100.0), (0.1, 80.0)], 60.0)
}

pub(super) fn hips_down(context: &PillarContext<'_>) -> f32 {
    match hip_rise(context) {
        Some(rise) if rise > 0.03 => 70.0,
        _ => 100.0,
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    press_corrections(context, "Tuck your elbows to about 45 degrees")
}

/// Shared press corrections; `posture` is the message for a low posture
/// score, which differs between the flat and incline variants.
pub(super) fn press_corrections(
    context: &CorrectionContext<'_>,
    posture: &'static str,
) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.bracing < 100.0 {
        out.push("Keep your hips on the bench");
    }
    if scores.rom < 100.0 {
        out.push("Lower the bar to your chest");
    }
    if scores.stability < 100.0 {
        out.push("Press evenly with both arms");
    }
    if scores.posture < 100.0 {
        out.push(posture);
    }
    if scores.efficiency < 100.0 {
        out.push("Keep your wrists over your elbows");
    }
    out
}
