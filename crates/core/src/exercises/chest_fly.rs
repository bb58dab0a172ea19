//! Seated chest fly machine. The completion signal is the distance between
//! the hands relative to shoulder width, so it is read from the front.

use super::checks::{joint_angles, shoulder_rise, SHRUG_TOLERANCE};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_at_least, band_below, completion};
use crate::pose::landmark::*;
use crate::pose::Pose;
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

const OPEN_SPAN: f32 = 2.5;
const CLOSED_SPAN: f32 = 0.6;

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::ChestFlyMachine,
    counting: Counting::Reps {
        mode: CountMode::ConcentricFirst,
        low: 0.35,
        high: 0.60,
    },
    motion,
    pillars: PillarRules {
        stability: Some(fixed_elbows),
        rom: Some(close_hands),
        posture: Some(back_on_pad),
        efficiency: Some(chest_height),
        bracing: Some(no_shrug),
    },
    weights: PillarWeights::new(0.20, 0.30, 0.20, 0.25, 0.05),
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

fn span(pose: &Pose<'_>) -> f32 {
    pose.wrist_distance() / pose.shoulder_width()
}

fn motion(pose: &Pose<'_>) -> Motion {
    let span = span(pose);
    Motion {
        completion: completion(span, OPEN_SPAN, CLOSED_SPAN),
        angles: joint_angles(&[("elbow", pose.elbow_angle()), ("shoulder", pose.shoulder_angle())]),
    }
}

/// Elbows held at a fixed slight bend; pressing turns the fly into a press.
fn fixed_elbows(context: &PillarContext<'_>) -> f32 {
    band_at_least(context.pose.elbow_angle(), &[(140.0, 100.0), (120.0, 80.0)], 60.0)
}

fn close_hands(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Top {
        return 100.0;
    }
    band_below(span(&context.pose), &[(0.81, 100.0), (1.21, 80.0)], 60.0)
}

fn back_on_pad(context: &PillarContext<'_>) -> f32 {
    band_below(context.pose.torso_lean(), &[(15.0, 100.0)], 80.0)
}

fn chest_height(context: &PillarContext<'_>) -> f32 {
    let pose = &context.pose;
    let offset = (pose.wrist_mid().y - pose.shoulder_mid().y).abs();
    band_below(offset, &[(0.08, 100.0), (0.15, 80.0)], 60.0)
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
    if scores.rom < 100.0 {
        out.push("Bring your hands together");
    }
    if scores.stability < 100.0 {
        out.push("Keep your arms slightly bent");
    }
    if scores.efficiency < 100.0 {
        out.push("Keep your hands at chest height");
    }
    if scores.posture < 100.0 {
        out.push("Keep your back against the pad");
    }
    if scores.bracing < 100.0 {
        out.push("Keep your shoulders down");
    }
    out
}
