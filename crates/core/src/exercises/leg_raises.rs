//! Hanging leg raises.

use super::checks::{hip_drift, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_at_least, band_below, completion};
use crate::pose::landmark::*;
use crate::pose::Pose;
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::LegRaises,
    counting: Counting::Reps {
        mode: CountMode::ConcentricFirst,
        low: 0.35,
        high: 0.60,
    },
    motion,
    pillars: PillarRules {
        stability: Some(no_swing),
        rom: Some(leg_height),
        posture: Some(straight_legs),
        efficiency: None,
        bracing: Some(still_torso),
    },
    weights: PillarWeights::new(0.30, 0.30, 0.10, 0.10, 0.20),
    corrections,
    key_landmarks: &[LEFT_HIP, RIGHT_HIP, LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE],
    tracks_faults: false,
};

fn motion(pose: &Pose<'_>) -> Motion {
    let hip = pose.hip_angle();
    Motion {
        completion: completion(hip, 170.0, 90.0),
        angles: joint_angles(&[("hip", hip), ("knee", pose.knee_angle())]),
    }
}

fn no_swing(context: &PillarContext<'_>) -> f32 {
    match hip_drift(context) {
        Some(drift) if drift > 0.05 => 70.0,
        _ => 100.0,
    }
}

fn leg_height(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Top {
        return 100.0;
    }
    band_below(context.pose.hip_angle(), &[(96.0, 100.0), (111.0, 80.0)], 60.0)
}

fn straight_legs(context: &PillarContext<'_>) -> f32 {
    band_at_least(context.pose.knee_angle(), &[(150.0, 100.0), (130.0, 80.0)], 60.0)
}

fn still_torso(context: &PillarContext<'_>) -> f32 {
    band_below(context.pose.torso_lean(), &[(15.0, 100.0), (30.0, 80.0)], 60.0)
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.rom < 100.0 {
        out.push("Raise your legs to hip height");
    }
    if scores.stability < 100.0 {
        out.push("Stop swinging");
    }
    if scores.bracing < 100.0 {
        out.push("Keep your torso still");
    }
    if scores.posture < 100.0 {
        out.push("Keep your legs straight");
    }
    out
}
