//! Barbell curl.

use super::checks::{elbow_symmetry, is_front, joint_angles, shoulder_rise, SHRUG_TOLERANCE};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_below, completion};
use crate::pose::landmark::*;
use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::BarbellCurl,
    counting: Counting::Reps {
        mode: CountMode::ConcentricFirst,
        low: 0.35,
        high: 0.65,
    },
    motion,
    pillars: PillarRules {
        stability: Some(pinned_elbows),
        rom: Some(range),
        posture: Some(no_swing),
        efficiency: Some(no_shrug),
        bracing: None,
    },
    weights: PillarWeights::new(0.30, 0.25, 0.25, 0.15, 0.05),
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
        completion: completion(elbow, 160.0, 50.0),
        angles: joint_angles(&[("elbow", elbow), ("torso", pose.torso_lean())]),
    }
}

/// Elbows drifting forward in profile, or curling unevenly from the front.
fn pinned_elbows(context: &PillarContext<'_>) -> f32 {
    let pose = &context.pose;
    if is_front(context.view) {
        return elbow_symmetry(pose);
    }
    let drift = (pose.elbow_mid().x - pose.shoulder_mid().x).abs();
    band_below(drift, &[(0.06, 100.0), (0.1, 70.0)], 50.0)
}

fn range(context: &PillarContext<'_>) -> f32 {
    let elbow = context.pose.elbow_angle();
    match context.phase {
        RepPhase::Top => band_below(elbow, &[(66.0, 100.0), (80.0, 80.0)], 60.0),
        RepPhase::Bottom if elbow < 145.0 => 80.0,
        _ => 100.0,
    }
}

fn no_swing(context: &PillarContext<'_>) -> f32 {
    band_below(context.pose.torso_lean(), &[(10.0, 100.0), (20.0, 80.0)], 60.0)
}

fn no_shrug(context: &PillarContext<'_>) -> f32 {
    match shoulder_rise(context) {
        Some(rise) if rise > SHRUG_TOLERANCE => 80.0,
        _ => 100.0,
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.posture < 100.0 {
        out.push("Don't swing your torso");
    }
    if scores.stability < 100.0 {
        if context.view == CameraView::Side {
            out.push("Keep your elbows pinned to your sides");
        } else {
            out.push("Curl evenly with both arms");
        }
    }
    if scores.rom < 100.0 {
        if context.phase == RepPhase::Top {
            out.push("Curl all the way up");
        } else {
            out.push("Fully extend your arms at the bottom");
        }
    }
    if scores.efficiency < 100.0 {
        out.push("Keep your shoulders down");
    }
    out
}
