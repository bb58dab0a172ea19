//! Plank: a timed hold. The count is whole seconds held with good form.

use super::checks::{hip_drift, joint_angles};
use super::push_up::{PIKE_LIMIT, SAG_LIMIT};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::band_at_least;
use crate::pose::landmark::*;
use crate::pose::Pose;
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

/// Minimum shoulder-hip-ankle angle for the hold to count.
const MIN_BODY_LINE: f32 = 165.0;
/// Minimum knee angle for the hold to count.
const MIN_KNEE: f32 = 160.0;

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::Plank,
    counting: Counting::Hold { form_ok },
    motion,
    pillars: PillarRules {
        stability: Some(locked_knees),
        rom: None,
        posture: Some(body_line),
        efficiency: None,
        bracing: Some(hip_height),
    },
    weights: PillarWeights::new(0.20, 0.00, 0.40, 0.00, 0.40),
    corrections,
    key_landmarks: &[
        LEFT_SHOULDER,
        RIGHT_SHOULDER,
        LEFT_HIP,
        RIGHT_HIP,
        LEFT_ANKLE,
        RIGHT_ANKLE,
    ],
    tracks_faults: false,
};

fn form_ok(pose: &Pose<'_>) -> bool {
    pose.body_line_angle() >= MIN_BODY_LINE
        && pose.hip_sag().abs() <= SAG_LIMIT
        && pose.knee_angle() >= MIN_KNEE
}

fn motion(pose: &Pose<'_>) -> Motion {
    Motion {
        completion: 0.0,
        angles: joint_angles(&[
            ("bodyLine", pose.body_line_angle()),
            ("knee", pose.knee_angle()),
        ]),
    }
}

fn locked_knees(context: &PillarContext<'_>) -> f32 {
    if context.pose.knee_angle() < MIN_KNEE {
        return 60.0;
    }
    match hip_drift(context) {
        Some(drift) if drift > 0.03 => 80.0,
        _ => 100.0,
    }
}

fn body_line(context: &PillarContext<'_>) -> f32 {
    band_at_least(
        context.pose.body_line_angle(),
        &[(MIN_BODY_LINE, 100.0), (150.0, 70.0)],
        40.0,
    )
}

fn hip_height(context: &PillarContext<'_>) -> f32 {
    let sag = context.pose.hip_sag();
    if sag > SAG_LIMIT {
        50.0
    } else if sag < PIKE_LIMIT {
        70.0
    } else {
        100.0
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.bracing < 100.0 {
        if context.pose.hip_sag() > 0.0 {
            out.push("Lift your hips");
        } else {
            out.push("Lower your hips");
        }
    }
    if scores.posture < 100.0 {
        out.push("Straighten your body line");
    }
    if scores.stability < 100.0 {
        out.push("Lock your knees and hold still");
    }
    out
}
