//! Measurements shared by several exercise profiles.

use super::JointAngles;
use crate::pose::landmark::{LEFT_HIP, RIGHT_HIP};
use crate::pose::{CameraView, Pose};
use crate::scoring::PillarContext;

/// Left/right height difference tolerated before a pair counts as uneven,
/// in normalised image units.
pub(crate) const LEVEL_TOLERANCE: f32 = 0.05;

/// Joint angle difference tolerated between the two sides, in degrees.
pub(crate) const SYMMETRY_TOLERANCE: f32 = 15.0;

/// Upward shoulder travel against the history baseline that reads as a shrug.
pub(crate) const SHRUG_TOLERANCE: f32 = 0.03;

pub(crate) fn joint_angles(pairs: &[(&str, f32)]) -> JointAngles {
    pairs
        .iter()
        .map(|&(name, angle)| (name.to_string(), angle))
        .collect()
}

pub(crate) fn is_front(view: CameraView) -> bool {
    matches!(view, CameraView::Front | CameraView::FortyFive)
}

pub(crate) fn hips_uneven(pose: &Pose<'_>) -> bool {
    pose.vertical_gap(LEFT_HIP, RIGHT_HIP) > LEVEL_TOLERANCE
}

/// Shoulder travel towards the ears since the oldest buffered frame.
/// Positive means the shoulders rose.
pub(crate) fn shoulder_rise(context: &PillarContext<'_>) -> Option<f32> {
    let baseline = context.baseline()?;
    Some(baseline.shoulder_mid().y - context.pose.shoulder_mid().y)
}

/// Hip travel upwards since the oldest buffered frame.
pub(crate) fn hip_rise(context: &PillarContext<'_>) -> Option<f32> {
    let baseline = context.baseline()?;
    Some(baseline.hip_mid().y - context.pose.hip_mid().y)
}

/// Horizontal hip travel since the oldest buffered frame.
pub(crate) fn hip_drift(context: &PillarContext<'_>) -> Option<f32> {
    let baseline = context.baseline()?;
    Some((baseline.hip_mid().x - context.pose.hip_mid().x).abs())
}

/// Scores left/right elbow symmetry: full marks within tolerance.
pub(crate) fn elbow_symmetry(pose: &Pose<'_>) -> f32 {
    let difference = pose.elbow_asymmetry();
    if difference <= SYMMETRY_TOLERANCE {
        100.0
    } else if difference <= SYMMETRY_TOLERANCE * 2.0 {
        80.0
    } else {
        60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::fixtures::{standing, Skeleton};
    use crate::pose::landmark::{LEFT_ELBOW, LEFT_WRIST};
    use crate::reps::RepPhase;
    use crate::scoring::LandmarkHistory;

    #[test]
    fn reports_shoulder_rise_against_oldest_frame() {
        let base = standing();
        let shrugged = Skeleton::standing().shifted(0.0, -0.05).build();
        let mut history = LandmarkHistory::default();
        for _ in 0..5 {
            history.push(&base);
        }
        let context = PillarContext {
            pose: Pose::new(&shrugged).unwrap(),
            phase: RepPhase::Top,
            view: CameraView::Front,
            history: &history,
        };
        let rise = shoulder_rise(&context).unwrap();
        assert!((rise - 0.05).abs() < 1e-5);
        assert!(hip_drift(&context).unwrap() < 1e-6);
    }

    #[test]
    fn flags_uneven_elbows() {
        let frame = standing();
        assert_eq!(elbow_symmetry(&Pose::new(&frame).unwrap()), 100.0);

        let mut skeleton = Skeleton::standing();
        skeleton.set(LEFT_ELBOW, 0.7, 0.45);
        skeleton.set(LEFT_WRIST, 0.6, 0.4);
        let frame = skeleton.build();
        assert_eq!(elbow_symmetry(&Pose::new(&frame).unwrap()), 60.0);
    }

    #[test]
    fn hips_within_five_hundredths_count_as_level() {
        let mut skeleton = Skeleton::standing();
        skeleton.set_y(LEFT_HIP, 0.645);
        let frame = skeleton.build();
        assert!(!hips_uneven(&Pose::new(&frame).unwrap()));

        skeleton.set_y(LEFT_HIP, 0.66);
        let frame = skeleton.build();
        assert!(hips_uneven(&Pose::new(&frame).unwrap()));
    }
}
