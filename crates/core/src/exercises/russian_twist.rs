//! Russian twist: counted per side-to-side reversal rather than by a
//! completion signal.

use super::checks::joint_angles;
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::band_at_least;
use crate::pose::landmark::*;
use crate::pose::Pose;
use crate::reps::twist::{DEFAULT_MIN_INTERVAL_MS, DEFAULT_REACH_RATIO};
use crate::reps::RepPhase;
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::RussianTwist,
    counting: Counting::Twist {
        reach_ratio: DEFAULT_REACH_RATIO,
        min_interval_ms: DEFAULT_MIN_INTERVAL_MS,
    },
    motion,
    pillars: PillarRules {
        stability: Some(bent_knees),
        rom: Some(rotation),
        posture: Some(recline),
        efficiency: None,
        bracing: None,
    },
    weights: PillarWeights::new(0.25, 0.30, 0.25, 0.10, 0.10),
    corrections,
    key_landmarks: &[
        LEFT_SHOULDER,
        RIGHT_SHOULDER,
        LEFT_WRIST,
        RIGHT_WRIST,
        LEFT_HIP,
        RIGHT_HIP,
    ],
    tracks_faults: false,
};

/// Hand offset from the hips as a fraction of shoulder width.
fn reach(pose: &Pose<'_>) -> f32 {
    (pose.wrist_mid().x - pose.hip_mid().x).abs() / pose.shoulder_width()
}

fn motion(pose: &Pose<'_>) -> Motion {
    Motion {
        completion: reach(pose).clamp(0.0, 1.0),
        angles: joint_angles(&[("torso", pose.torso_lean()), ("knee", pose.knee_angle())]),
    }
}

fn bent_knees(context: &PillarContext<'_>) -> f32 {
    if context.pose.knee_angle() <= 120.0 {
        100.0
    } else {
        80.0
    }
}

fn rotation(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Top {
        return 100.0;
    }
    band_at_least(reach(&context.pose), &[(0.8, 100.0)], 80.0)
}

/// Torso reclined to roughly 45 degrees.
fn recline(context: &PillarContext<'_>) -> f32 {
    let lean = context.pose.torso_lean();
    if (30.0..=60.0).contains(&lean) {
        100.0
    } else if (20.0..=70.0).contains(&lean) {
        80.0
    } else {
        60.0
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.posture < 100.0 {
        out.push("Lean back to about 45 degrees");
    }
    if scores.rom < 100.0 {
        out.push("Rotate further to each side");
    }
    if scores.stability < 100.0 {
        out.push("Keep your knees bent");
    }
    out
}
