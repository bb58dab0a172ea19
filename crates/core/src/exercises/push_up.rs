//! Push-up: elbow-driven, with the body held as a rigid line.

use super::checks::{is_front, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion};
use crate::geometry::{band_at_least, band_below, completion};
use crate::pose::landmark::*;
use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

/// Hips this far below the shoulder-ankle line are sagging.
pub(crate) const SAG_LIMIT: f32 = 0.05;
/// Hips this far above the line are piking.
pub(crate) const PIKE_LIMIT: f32 = -0.08;

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::PushUp,
    counting: Counting::Reps {
        mode: CountMode::EccentricFirst,
        low: 0.35,
        high: 0.60,
    },
    motion,
    pillars: PillarRules {
        stability: Some(elbow_flare),
        rom: Some(depth),
        posture: Some(body_line),
        efficiency: None,
        bracing: Some(hip_height),
    },
    weights: PillarWeights::new(0.15, 0.25, 0.20, 0.10, 0.30),
    corrections,
    key_landmarks: &[
        LEFT_SHOULDER,
        RIGHT_SHOULDER,
        LEFT_ELBOW,
        RIGHT_ELBOW,
        LEFT_WRIST,
        RIGHT_WRIST,
        LEFT_HIP,
        RIGHT_HIP,
    ],
    tracks_faults: false,
};

fn motion(pose: &Pose<'_>) -> Motion {
    let elbow = pose.elbow_angle();
    Motion {
        completion: completion(elbow, 165.0, 90.0),
        angles: joint_angles(&[("elbow", elbow), ("bodyLine", pose.body_line_angle())]),
    }
}

fn elbow_flare(context: &PillarContext<'_>) -> f32 {
    if is_front(context.view) && context.pose.shoulder_angle() > 75.0 {
        70.0
    } else {
        100.0
    }
}

fn depth(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Bottom {
        return 100.0;
    }
    band_below(context.pose.elbow_angle(), &[(101.0, 100.0), (121.0, 80.0)], 60.0)
}

fn body_line(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    band_at_least(context.pose.body_line_angle(), &[(165.0, 100.0), (150.0, 80.0)], 60.0)
}

fn hip_height(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    let sag = context.pose.hip_sag();
    if sag > SAG_LIMIT {
        60.0
    } else if sag < PIKE_LIMIT {
        75.0
    } else {
        100.0
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.bracing < 100.0 {
        if context.pose.hip_sag() > 0.0 {
            out.push("Keep your hips up");
        } else {
            out.push("Lower your hips");
        }
    }
    if scores.posture < 100.0 {
        out.push("Keep your body in a straight line");
    }
    if scores.rom < 100.0 {
        out.push("Go lower");
    }
    if scores.stability < 100.0 {
        out.push("Tuck your elbows");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercises::ExerciseAnalyzer;
    use crate::pose::fixtures::{PUSH_UP_BOTTOM, PUSH_UP_TOP};

    #[test]
    fn counts_top_bottom_top() {
        let top = PUSH_UP_TOP.build();
        let bottom = PUSH_UP_BOTTOM.build();
        let mut push_up = ExerciseAnalyzer::new(ExerciseType::PushUp).unwrap();

        let mut t = 0.0;
        let mut last = None;
        for frame in [&top, &top, &bottom, &bottom, &top] {
            last = Some(push_up.analyze(frame, t));
            t += 100.0;
        }
        let last = last.unwrap();
        assert_eq!(last.reps, 1);
        assert_eq!(last.rep_phase, RepPhase::Top);
        assert!(last.is_good_form, "{last:?}");
    }

    #[test]
    fn sagging_hips_lead_the_corrections() {
        let mut skeleton = PUSH_UP_TOP.skeleton();
        skeleton.set_y(LEFT_HIP, 0.6);
        skeleton.set_y(RIGHT_HIP, 0.6);
        let frame = skeleton.build();

        let mut push_up = ExerciseAnalyzer::new(ExerciseType::PushUp).unwrap();
        let feedback = push_up.analyze(&frame, 0.0);
        assert_eq!(feedback.breakdown.bracing, 60.0);
        assert_eq!(feedback.message, "Keep your hips up");
        assert!(!feedback.is_good_form);
    }

    #[test]
    fn piked_hips_ask_to_lower() {
        let mut skeleton = PUSH_UP_TOP.skeleton();
        skeleton.set_y(LEFT_HIP, 0.38);
        skeleton.set_y(RIGHT_HIP, 0.38);
        let frame = skeleton.build();

        let mut push_up = ExerciseAnalyzer::new(ExerciseType::PushUp).unwrap();
        let feedback = push_up.analyze(&frame, 0.0);
        assert_eq!(feedback.breakdown.bracing, 75.0);
        assert_eq!(feedback.message, "Lower your hips");
    }
}
