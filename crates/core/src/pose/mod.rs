//! Pose landmark data model.
//!
//! Landmarks follow the 33-point body topology produced by the upstream pose
//! estimator. Coordinates are normalised to the camera frame with the origin
//! in the top-left corner, so a *smaller* `y` is physically *higher*.

use serde::{Deserialize, Serialize};

use crate::geometry::{angle_at, detect_view, distance, lean_from_vertical};

#[cfg(test)]
pub(crate) mod fixtures;

/// Number of landmarks in a usable frame.
pub const LANDMARK_COUNT: usize = 33;

/// Mean visibility below which an exercise's key landmarks are considered
/// out of frame.
pub const MIN_KEY_VISIBILITY: f32 = 0.5;

/// Landmark indices of the body topology.
pub mod landmark {
    pub const NOSE: usize = 0;
    pub const LEFT_EYE: usize = 2;
    pub const RIGHT_EYE: usize = 5;
    pub const LEFT_EAR: usize = 7;
    pub const RIGHT_EAR: usize = 8;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
    pub const LEFT_HEEL: usize = 29;
    pub const RIGHT_HEEL: usize = 30;
    pub const LEFT_FOOT_INDEX: usize = 31;
    pub const RIGHT_FOOT_INDEX: usize = 32;
}

use landmark::*;

/// A single keypoint estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseLandmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    #[serde(default = "full_visibility")]
    pub visibility: f32,
}

fn full_visibility() -> f32 {
    1.0
}

impl PoseLandmark {
    pub const fn new(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Point in the image plane with full visibility.
    pub const fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 1.0)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self {
            x: (self.x + other.x) * 0.5,
            y: (self.y + other.y) * 0.5,
            z: (self.z + other.z) * 0.5,
            visibility: self.visibility.min(other.visibility),
        }
    }
}

/// Camera viewing angle relative to the subject's shoulder plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraView {
    Front,
    Side,
    FortyFive,
    Unknown,
}

/// Read-only view over a frame that is known to hold a full skeleton.
///
/// Construction is the only place the landmark count is checked, every
/// accessor can therefore index the topology directly.
#[derive(Debug, Clone, Copy)]
pub struct Pose<'a> {
    landmarks: &'a [PoseLandmark],
}

impl<'a> Pose<'a> {
    /// Returns `None` when the frame is too short to hold a full skeleton.
    pub fn new(landmarks: &'a [PoseLandmark]) -> Option<Self> {
        (landmarks.len() >= LANDMARK_COUNT).then_some(Self { landmarks })
    }

    pub fn landmarks(&self) -> &'a [PoseLandmark] {
        self.landmarks
    }

    pub fn at(&self, index: usize) -> PoseLandmark {
        self.landmarks[index]
    }

    pub fn view(&self) -> CameraView {
        detect_view(self.landmarks)
    }

    /// Mean visibility of the given landmarks.
    pub fn visibility_of(&self, indices: &[usize]) -> f32 {
        if indices.is_empty() {
            return 1.0;
        }
        let sum: f32 = indices.iter().map(|&i| self.at(i).visibility).sum();
        sum / indices.len() as f32
    }

    pub fn nose(&self) -> PoseLandmark {
        self.at(NOSE)
    }

    pub fn ear_mid(&self) -> PoseLandmark {
        self.at(LEFT_EAR).midpoint(self.at(RIGHT_EAR))
    }

    pub fn shoulder_mid(&self) -> PoseLandmark {
        self.at(LEFT_SHOULDER).midpoint(self.at(RIGHT_SHOULDER))
    }

    pub fn elbow_mid(&self) -> PoseLandmark {
        self.at(LEFT_ELBOW).midpoint(self.at(RIGHT_ELBOW))
    }

    pub fn wrist_mid(&self) -> PoseLandmark {
        self.at(LEFT_WRIST).midpoint(self.at(RIGHT_WRIST))
    }

    pub fn hip_mid(&self) -> PoseLandmark {
        self.at(LEFT_HIP).midpoint(self.at(RIGHT_HIP))
    }

    pub fn knee_mid(&self) -> PoseLandmark {
        self.at(LEFT_KNEE).midpoint(self.at(RIGHT_KNEE))
    }

    pub fn ankle_mid(&self) -> PoseLandmark {
        self.at(LEFT_ANKLE).midpoint(self.at(RIGHT_ANKLE))
    }

    pub fn heel_mid(&self) -> PoseLandmark {
        self.at(LEFT_HEEL).midpoint(self.at(RIGHT_HEEL))
    }

    /// Horizontal shoulder separation, floored so ratios stay finite.
    pub fn shoulder_width(&self) -> f32 {
        (self.at(LEFT_SHOULDER).x - self.at(RIGHT_SHOULDER).x)
            .abs()
            .max(1e-3)
    }

    pub fn wrist_distance(&self) -> f32 {
        distance(self.at(LEFT_WRIST), self.at(RIGHT_WRIST))
    }

    pub fn left_elbow_angle(&self) -> f32 {
        angle_at(self.at(LEFT_SHOULDER), self.at(LEFT_ELBOW), self.at(LEFT_WRIST))
    }

    pub fn right_elbow_angle(&self) -> f32 {
        angle_at(
            self.at(RIGHT_SHOULDER),
            self.at(RIGHT_ELBOW),
            self.at(RIGHT_WRIST),
        )
    }

    pub fn elbow_angle(&self) -> f32 {
        (self.left_elbow_angle() + self.right_elbow_angle()) * 0.5
    }

    pub fn left_knee_angle(&self) -> f32 {
        angle_at(self.at(LEFT_HIP), self.at(LEFT_KNEE), self.at(LEFT_ANKLE))
    }

    pub fn right_knee_angle(&self) -> f32 {
        angle_at(self.at(RIGHT_HIP), self.at(RIGHT_KNEE), self.at(RIGHT_ANKLE))
    }

    pub fn knee_angle(&self) -> f32 {
        (self.left_knee_angle() + self.right_knee_angle()) * 0.5
    }

    /// Shoulder-hip-knee angle averaged over both sides.
    pub fn hip_angle(&self) -> f32 {
        let left = angle_at(self.at(LEFT_SHOULDER), self.at(LEFT_HIP), self.at(LEFT_KNEE));
        let right = angle_at(
            self.at(RIGHT_SHOULDER),
            self.at(RIGHT_HIP),
            self.at(RIGHT_KNEE),
        );
        (left + right) * 0.5
    }

    /// Shoulder-hip-ankle angle averaged over both sides; 180 is a straight
    /// body line.
    pub fn body_line_angle(&self) -> f32 {
        let left = angle_at(
            self.at(LEFT_SHOULDER),
            self.at(LEFT_HIP),
            self.at(LEFT_ANKLE),
        );
        let right = angle_at(
            self.at(RIGHT_SHOULDER),
            self.at(RIGHT_HIP),
            self.at(RIGHT_ANKLE),
        );
        (left + right) * 0.5
    }

    /// Elbow-shoulder-hip angle averaged over both sides. Measures arm
    /// abduction for raises and elbow flare for presses.
    pub fn shoulder_angle(&self) -> f32 {
        let left = angle_at(self.at(LEFT_ELBOW), self.at(LEFT_SHOULDER), self.at(LEFT_HIP));
        let right = angle_at(
            self.at(RIGHT_ELBOW),
            self.at(RIGHT_SHOULDER),
            self.at(RIGHT_HIP),
        );
        (left + right) * 0.5
    }

    /// Wrist-shoulder-hip angle averaged over both sides.
    pub fn arm_abduction(&self) -> f32 {
        let left = angle_at(self.at(LEFT_WRIST), self.at(LEFT_SHOULDER), self.at(LEFT_HIP));
        let right = angle_at(
            self.at(RIGHT_WRIST),
            self.at(RIGHT_SHOULDER),
            self.at(RIGHT_HIP),
        );
        (left + right) * 0.5
    }

    /// Torso inclination from vertical in degrees (0 = upright).
    pub fn torso_lean(&self) -> f32 {
        lean_from_vertical(self.hip_mid(), self.shoulder_mid())
    }

    /// Signed vertical offset of the hips from the shoulder-knee midpoint.
    /// Positive values mean the hips sit lower than it (sagging).
    pub fn hip_sag(&self) -> f32 {
        let line = self.shoulder_mid().midpoint(self.knee_mid());
        self.hip_mid().y - line.y
    }

    pub fn elbow_asymmetry(&self) -> f32 {
        (self.left_elbow_angle() - self.right_elbow_angle()).abs()
    }

    pub fn knee_asymmetry(&self) -> f32 {
        (self.left_knee_angle() - self.right_knee_angle()).abs()
    }

    pub fn vertical_gap(&self, a: usize, b: usize) -> f32 {
        (self.at(a).y - self.at(b).y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::fixtures::{standing, Skeleton, PLANK};

    #[test]
    fn rejects_short_frames() {
        let landmarks = vec![PoseLandmark::at(0.5, 0.5); LANDMARK_COUNT - 1];
        assert!(Pose::new(&landmarks).is_none());
        assert!(Pose::new(&[]).is_none());
    }

    #[test]
    fn standing_pose_is_straight() {
        let frame = standing();
        let pose = Pose::new(&frame).unwrap();
        assert!(pose.knee_angle() > 170.0);
        assert!(pose.hip_angle() > 170.0);
        assert!(pose.torso_lean() < 5.0);
        assert!((pose.shoulder_width() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn missing_visibility_defaults_to_visible() {
        let json = r#"{"x": 0.5, "y": 0.25}"#;
        let landmark: PoseLandmark = serde_json::from_str(json).unwrap();
        assert_eq!(landmark.visibility, 1.0);
        assert_eq!(landmark.z, 0.0);
    }

    #[test]
    fn reports_key_visibility() {
        let mut skeleton = Skeleton::standing();
        skeleton.set_visibility(&[LEFT_KNEE, RIGHT_KNEE], 0.0);
        let frame = skeleton.build();
        let pose = Pose::new(&frame).unwrap();
        let vis = pose.visibility_of(&[LEFT_KNEE, RIGHT_KNEE, LEFT_HIP, RIGHT_HIP]);
        assert!((vis - 0.5).abs() < 1e-6);
    }

    #[test]
    fn hip_sag_ignores_the_feet() {
        let mut skeleton = PLANK.skeleton();
        skeleton.set_y(LEFT_HIP, 0.58);
        skeleton.set_y(RIGHT_HIP, 0.58);
        let flat = skeleton.build();
        skeleton.set_y(LEFT_ANKLE, 0.4);
        skeleton.set_y(RIGHT_ANKLE, 0.4);
        let feet_raised = skeleton.build();

        let sag = Pose::new(&flat).unwrap().hip_sag();
        assert!((sag - 0.06).abs() < 1e-5, "{sag}");
        assert_eq!(Pose::new(&feet_raised).unwrap().hip_sag(), sag);
    }
}
