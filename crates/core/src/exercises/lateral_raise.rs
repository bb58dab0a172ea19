//! Dumbbell lateral raise, driven by the elbow-shoulder-hip angle.

use super::checks::{joint_angles, shoulder_rise, SHRUG_TOLERANCE};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_at_least, band_below, completion};
use crate::pose::landmark::*;
use crate::pose::Pose;
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::LateralRaise,
    counting: Counting::Reps {
        mode: CountMode::ConcentricFirst,
        low: 0.30,
        high: 0.60,
    },
    motion,
    pillars: PillarRules {
        stability: Some(even_arms),
        rom: Some(height),
        posture: Some(shrug_creep),
        efficiency: Some(soft_elbows),
        bracing: Some(still_torso),
    },
    weights: PillarWeights::new(0.25, 0.25, 0.25, 0.20, 0.05),
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
    let abduction = pose.shoulder_angle();
    Motion {
        completion: completion(abduction, 15.0, 90.0),
        angles: joint_angles(&[("shoulder", abduction), ("elbow", pose.elbow_angle())]),
    }
}

fn even_arms(context: &PillarContext<'_>) -> f32 {
    if context.pose.vertical_gap(LEFT_WRIST, RIGHT_WRIST) > 0.05 {
        70.0
    } else {
        100.0
    }
}

fn height(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Top {
        return 100.0;
    }
    band_at_least(context.pose.shoulder_angle(), &[(80.0, 100.0), (65.0, 80.0)], 60.0)
}

/// Shoulders creeping up towards the ears over the set.
fn shrug_creep(context: &PillarContext<'_>) -> f32 {
    match shoulder_rise(context) {
        Some(rise) if rise > SHRUG_TOLERANCE => 60.0,
        _ => 100.0,
    }
}

/// A deep elbow bend turns the raise into an upright row.
fn soft_elbows(context: &PillarContext<'_>) -> f32 {
    if context.phase == RepPhase::Rest {
        return 100.0;
    }
    band_at_least(context.pose.elbow_angle(), &[(150.0, 100.0), (120.0, 80.0)], 60.0)
}

fn still_torso(context: &PillarContext<'_>) -> f32 {
    band_below(context.pose.torso_lean(), &[(15.0, 100.0)], 70.0)
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.posture < 100.0 {
        out.push("Keep your shoulders down");
    }
    if scores.rom < 100.0 {
        out.push("Raise to shoulder height");
    }
    if scores.stability < 100.0 {
        out.push("Raise both arms evenly");
    }
    if scores.efficiency < 100.0 {
        out.push("Keep your arms nearly straight");
    }
    if scores.bracing < 100.0 {
        out.push("Don't swing your body");
    }
    out
}
