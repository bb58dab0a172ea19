use super::checks::{hip_rise, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_at_least, band_below, completion};
use crate::pose::landmark::*;
use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::LegExtension,
    counting: Counting::Reps {
        mode: CountMode::ConcentricFirst,
        low: 0.35,
        high: 0.65,
    },
    motion,
    pillars: PillarRules {
        stability: Some(seated),
        rom: Some(lockout),
        posture: Some(against_pad),
        efficiency: Some(even_legs),
        bracing: None,
    },
    weights: PillarWeights::new(0.30, 0.35, 0.15, 0.20, 0.00),
    corrections,
    key_landmarks: &[LEFT_HIP, RIGHT_HIP, LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE],
    tracks_faults: false,
};

fn motion(pose: &Pose<'_>) -> Motion {
    let knee = pose.knee_angle();
    Motion {
        completion: completion(knee, 90.0, 170.0),
        angles: joint_angles(&[("knee", knee), ("hip", pose.hip_angle())]),
    }
}

fn seated(context: &PillarContext<'_>) -> f32 {
    match hip_rise(context) {
        Some(rise) if rise > 0.03 => 60.0,
        _ => 100.0,
    }
}

fn lockout(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Top {
        return 100.0;
    }
    band_at_least(context.pose.knee_angle(), &[(165.0, 100.0), (150.0, 80.0)], 60.0)
}

fn against_pad(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    band_below(context.pose.torso_lean(), &[(25.0, 100.0)], 80.0)
}

fn even_legs(context: &PillarContext<'_>) -> f32 {
    band_below(context.pose.knee_asymmetry(), &[(15.0, 100.0), (30.0, 80.0)], 60.0)
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.rom < 100.0 {
        out.push("Extend your legs fully");
    }
    if scores.stability < 100.0 {
        out.push("Keep your hips on the seat");
    }
    if scores.efficiency < 100.0 {
        out.push("Extend both legs evenly");
    }
    if scores.posture < 100.0 {
        out.push("Sit back against the pad");
    }
    out
}
