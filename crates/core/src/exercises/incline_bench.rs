//! Incline bench press. Shares the flat press rules apart from depth and
//! bench angle.

use super::bench_press::{
    bar_path, elbow_flare, even_press, hips_down, motion, press_corrections, PRESS_KEY_LANDMARKS,
};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType};
use crate::geometry::band_below;
use crate::pose::CameraView;
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::InclineBenchPress,
    counting: Counting::Reps {
        mode: CountMode::EccentricFirst,
        low: 0.35,
        high: 0.60,
    },
    motion,
    pillars: PillarRules {
        stability: Some(even_press),
        rom: Some(depth),
        posture: Some(posture),
        efficiency: Some(bar_path),
        bracing: Some(hips_down),
    },
    weights: PillarWeights::new(0.25, 0.25, 0.20, 0.20, 0.10),
    corrections,
    key_landmarks: PRESS_KEY_LANDMARKS,
    tracks_faults: false,
};

fn depth(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Bottom {
        return 100.0;
    }
    band_below(context.pose.elbow_angle(), &[(101.0, 100.0), (116.0, 80.0)], 60.0)
}

/// Elbow flare from the front; from the side, a bench set too flat or too
/// upright.
fn posture(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return elbow_flare(context);
    }
    let recline = 90.0 - context.pose.torso_lean();
    if (15.0..=60.0).contains(&recline) {
        100.0
    } else {
        80.0
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let posture = if context.view == CameraView::Side {
        "Set the bench to a 30 to 45 degree incline"
    } else {
        "Tuck your elbows to about 45 degrees"
    };
    press_corrections(context, posture)
}
