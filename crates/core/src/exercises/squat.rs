//! Squat: knee-driven, counted top to bottom and back.
//!
//! Besides the per-frame pillars the squat tracks three faults that only
//! show up against earlier frames (see [`FaultTracker`]).

use super::checks::{hips_uneven, is_front, joint_angles};
use super::{CorrectionContext, Counting, ExerciseProfile, ExerciseType, Motion, QualityFlag};
use crate::geometry::{band_at_least, band_below, completion};
use crate::pose::landmark::*;
use crate::pose::{CameraView, Pose};
use crate::reps::{CountMode, RepPhase};
use crate::scoring::{PillarContext, PillarRules, PillarWeights};

const KNEE_REST: f32 = 175.0;
const KNEE_DEPTH: f32 = 90.0;

pub const PROFILE: ExerciseProfile = ExerciseProfile {
    exercise: ExerciseType::Squat,
    counting: Counting::Reps {
        mode: CountMode::EccentricFirst,
        low: 0.30,
        high: 0.65,
    },
    motion,
    pillars: PillarRules {
        stability: Some(knee_tracking),
        rom: Some(depth),
        posture: Some(chest_up),
        efficiency: Some(knee_drift),
        bracing: Some(level_hips),
    },
    weights: PillarWeights::new(0.15, 0.30, 0.30, 0.10, 0.15),
    corrections,
    key_landmarks: &[LEFT_HIP, RIGHT_HIP, LEFT_KNEE, RIGHT_KNEE, LEFT_ANKLE, RIGHT_ANKLE],
    tracks_faults: true,
};

fn motion(pose: &Pose<'_>) -> Motion {
    let knee = pose.knee_angle();
    Motion {
        completion: completion(knee, KNEE_REST, KNEE_DEPTH),
        angles: joint_angles(&[
            ("knee", knee),
            ("hip", pose.hip_angle()),
            ("torso", pose.torso_lean()),
        ]),
    }
}

/// Knees caving inside the feet, seen from the front.
fn knee_tracking(context: &PillarContext<'_>) -> f32 {
    if !is_front(context.view) {
        return 100.0;
    }
    let pose = &context.pose;
    let knees = (pose.at(LEFT_KNEE).x - pose.at(RIGHT_KNEE).x).abs();
    let ankles = (pose.at(LEFT_ANKLE).x - pose.at(RIGHT_ANKLE).x).abs().max(1e-3);
    band_at_least(knees / ankles, &[(0.9, 100.0), (0.75, 80.0)], 60.0)
}

/// Hip crease at or below the knee at the bottom.
fn depth(context: &PillarContext<'_>) -> f32 {
    if context.phase != RepPhase::Bottom {
        return 100.0;
    }
    let pose = &context.pose;
    if pose.hip_mid().y >= pose.knee_mid().y - 0.05 {
        100.0
    } else if pose.knee_angle() < 110.0 {
        80.0
    } else {
        60.0
    }
}

fn chest_up(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    band_below(context.pose.torso_lean(), &[(45.0, 100.0), (55.0, 80.0)], 60.0)
}

/// Forward travel of the knees past the ankles, in the direction of the toes.
fn knee_drift(context: &PillarContext<'_>) -> f32 {
    if context.view != CameraView::Side {
        return 100.0;
    }
    let pose = &context.pose;
    let toes = pose.at(LEFT_FOOT_INDEX).midpoint(pose.at(RIGHT_FOOT_INDEX));
    let facing = (toes.x - pose.heel_mid().x).signum();
    let travel = (pose.knee_mid().x - pose.ankle_mid().x) * facing;
    band_below(travel, &[(0.08, 100.0), (0.12, 80.0)], 60.0)
}

fn level_hips(context: &PillarContext<'_>) -> f32 {
    if is_front(context.view) && hips_uneven(&context.pose) {
        70.0
    } else {
        100.0
    }
}

fn corrections(context: &CorrectionContext<'_>) -> Vec<&'static str> {
    let scores = context.breakdown;
    let mut out = Vec::new();
    if scores.rom < 100.0 {
        out.push("Go deeper");
    }
    if scores.stability < 100.0 {
        out.push("Push your knees out");
    }
    if scores.posture < 100.0 {
        out.push("Keep your chest up");
    }
    if scores.efficiency < 100.0 {
        out.push("Sit back into your hips");
    }
    if scores.bracing < 100.0 {
        out.push("Keep your hips level");
    }
    out
}

/// Frames used to establish the standing heel height.
const HEEL_BASELINE_FRAMES: usize = 10;
/// Heel rise above the baseline that counts as lifting, in image units.
const HEEL_LIFT_TOLERANCE: f32 = 0.02;
/// Hip angle at the bottom below which the pelvis is tucking under.
const BUTT_WINK_HIP_ANGLE: f32 = 45.0;
/// Extra rise of the hips over the shoulders, per frame, that reads as the
/// hips shooting up first.
const GOOD_MORNING_MARGIN: f32 = 0.02;

/// Detects heel lift, butt wink and good-morning squats.
#[derive(Debug, Clone, Default)]
pub(crate) struct FaultTracker {
    heel_samples: Vec<f32>,
    heel_baseline: Option<f32>,
    previous: Option<(f32, f32)>,
}

impl FaultTracker {
    pub(crate) fn observe(
        &mut self,
        pose: &Pose<'_>,
        phase: RepPhase,
        view: CameraView,
    ) -> Vec<QualityFlag> {
        let mut flags = Vec::new();
        let heel = pose.heel_mid().y;
        let hip = pose.hip_mid().y;
        let shoulder = pose.shoulder_mid().y;
        let loaded = matches!(
            phase,
            RepPhase::Eccentric | RepPhase::Bottom | RepPhase::Concentric
        );

        match self.heel_baseline {
            Some(baseline) if loaded && baseline - heel > HEEL_LIFT_TOLERANCE => {
                flags.push(QualityFlag::HeelLift);
            }
            Some(_) => {}
            None => {
                self.heel_samples.push(heel);
                if self.heel_samples.len() >= HEEL_BASELINE_FRAMES {
                    let sum: f32 = self.heel_samples.iter().sum();
                    let mean = sum / self.heel_samples.len() as f32;
                    self.heel_baseline = Some(mean);
                }
            }
        }

        if phase == RepPhase::Bottom
            && view != CameraView::Front
            && pose.hip_angle() < BUTT_WINK_HIP_ANGLE
        {
            flags.push(QualityFlag::ButtWink);
        }

        if let (RepPhase::Concentric, Some((previous_hip, previous_shoulder))) =
            (phase, self.previous)
        {
            let hip_rise = previous_hip - hip;
            let shoulder_rise = previous_shoulder - shoulder;
            if hip_rise - shoulder_rise > GOOD_MORNING_MARGIN {
                flags.push(QualityFlag::GoodMorning);
            }
        }
        self.previous = Some((hip, shoulder));

        if !flags.is_empty() {
            tracing::trace!(?flags, %phase, "squat faults");
        }
        flags
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
