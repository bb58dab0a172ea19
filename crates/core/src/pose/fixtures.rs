//! Synthetic skeletons for unit tests.

use super::landmark::*;
use super::{PoseLandmark, LANDMARK_COUNT};

/// Horizontal offset between the left and right side in profile poses.
const SIDE_OFFSET: f32 = 0.01;

pub(crate) type Point = (f32, f32);

/// Mutable 33-point skeleton.
#[derive(Debug, Clone)]
pub(crate) struct Skeleton {
    points: [PoseLandmark; LANDMARK_COUNT],
}

impl Skeleton {
    /// Front-facing upright stance with arms hanging straight down.
    pub fn standing() -> Self {
        let mut skeleton = Self {
            points: [PoseLandmark::at(0.5, 0.15); LANDMARK_COUNT],
        };
        skeleton.set(NOSE, 0.5, 0.15);
        skeleton.pair(LEFT_EYE, RIGHT_EYE, (0.52, 0.13), (0.48, 0.13));
        skeleton.pair(LEFT_EAR, RIGHT_EAR, (0.54, 0.15), (0.46, 0.15));
        skeleton.pair(LEFT_SHOULDER, RIGHT_SHOULDER, (0.6, 0.3), (0.4, 0.3));
        skeleton.pair(LEFT_ELBOW, RIGHT_ELBOW, (0.6, 0.45), (0.4, 0.45));
        skeleton.pair(LEFT_WRIST, RIGHT_WRIST, (0.6, 0.6), (0.4, 0.6));
        skeleton.pair(LEFT_HIP, RIGHT_HIP, (0.58, 0.6), (0.42, 0.6));
        skeleton.pair(LEFT_KNEE, RIGHT_KNEE, (0.58, 0.78), (0.42, 0.78));
        skeleton.pair(LEFT_ANKLE, RIGHT_ANKLE, (0.58, 0.95), (0.42, 0.95));
        skeleton.pair(LEFT_HEEL, RIGHT_HEEL, (0.58, 0.97), (0.42, 0.97));
        skeleton.pair(LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX, (0.6, 0.98), (0.4, 0.98));
        skeleton.hands_follow_wrists();
        skeleton
    }

    pub fn build(&self) -> Vec<PoseLandmark> {
        self.points.to_vec()
    }

    pub fn set(&mut self, index: usize, x: f32, y: f32) {
        self.points[index].x = x;
        self.points[index].y = y;
    }

    pub fn set_x(&mut self, index: usize, x: f32) {
        self.points[index].x = x;
    }

    pub fn set_y(&mut self, index: usize, y: f32) {
        self.points[index].y = y;
    }

    pub fn pair(&mut self, left: usize, right: usize, l: Point, r: Point) {
        self.set(left, l.0, l.1);
        self.set(right, r.0, r.1);
    }

    pub fn set_visibility(&mut self, indices: &[usize], visibility: f32) {
        for &index in indices {
            self.points[index].visibility = visibility;
        }
    }

    pub fn set_shoulder_depth(&mut self, left_z: f32, right_z: f32) {
        self.points[LEFT_SHOULDER].z = left_z;
        self.points[RIGHT_SHOULDER].z = right_z;
    }

    /// Moves every landmark by the given offset.
    pub fn shifted(&self, dx: f32, dy: f32) -> Self {
        let mut moved = self.clone();
        for point in moved.points.iter_mut() {
            point.x += dx;
            point.y += dy;
        }
        moved
    }

    fn hands_follow_wrists(&mut self) {
        for (hand, wrist) in [(17, LEFT_WRIST), (19, LEFT_WRIST), (21, LEFT_WRIST)]
            .into_iter()
            .chain([(18, RIGHT_WRIST), (20, RIGHT_WRIST), (22, RIGHT_WRIST)])
        {
            self.points[hand] = self.points[wrist];
        }
    }
}

/// Profile (side-on) body description; both sides overlap with a small
/// horizontal offset and the shoulders are separated in depth.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Profile {
    pub head: Point,
    pub shoulder: Point,
    pub elbow: Point,
    pub wrist: Point,
    pub hip: Point,
    pub knee: Point,
    pub ankle: Point,
}

impl Profile {
    pub fn skeleton(&self) -> Skeleton {
        let mut skeleton = Skeleton {
            points: [PoseLandmark::at(self.head.0, self.head.1); LANDMARK_COUNT],
        };
        let side = |s: &mut Skeleton, left: usize, right: usize, p: Point| {
            s.pair(left, right, (p.0 + SIDE_OFFSET, p.1), (p.0 - SIDE_OFFSET, p.1));
        };
        skeleton.set(NOSE, self.head.0, self.head.1);
        side(&mut skeleton, LEFT_EYE, RIGHT_EYE, (self.head.0, self.head.1 - 0.02));
        side(&mut skeleton, LEFT_EAR, RIGHT_EAR, (self.head.0 - 0.02, self.head.1));
        side(&mut skeleton, LEFT_SHOULDER, RIGHT_SHOULDER, self.shoulder);
        side(&mut skeleton, LEFT_ELBOW, RIGHT_ELBOW, self.elbow);
        side(&mut skeleton, LEFT_WRIST, RIGHT_WRIST, self.wrist);
        side(&mut skeleton, LEFT_HIP, RIGHT_HIP, self.hip);
        side(&mut skeleton, LEFT_KNEE, RIGHT_KNEE, self.knee);
        side(&mut skeleton, LEFT_ANKLE, RIGHT_ANKLE, self.ankle);
        side(
            &mut skeleton,
            LEFT_HEEL,
            RIGHT_HEEL,
            (self.ankle.0 - 0.03, self.ankle.1 + 0.02),
        );
        side(
            &mut skeleton,
            LEFT_FOOT_INDEX,
            RIGHT_FOOT_INDEX,
            (self.ankle.0 + 0.06, self.ankle.1 + 0.03),
        );
        skeleton.set_shoulder_depth(-0.1, 0.1);
        skeleton.hands_follow_wrists();
        skeleton
    }

    pub fn build(&self) -> Vec<PoseLandmark> {
        self.skeleton().build()
    }
}

pub(crate) fn standing() -> Vec<PoseLandmark> {
    Skeleton::standing().build()
}

/// Upright in profile, arms hanging, knee angle 180.
pub(crate) const SIDE_STANDING: Profile = Profile {
    head: (0.57, 0.18),
    shoulder: (0.55, 0.29),
    elbow: (0.55, 0.44),
    wrist: (0.55, 0.58),
    hip: (0.55, 0.59),
    knee: (0.55, 0.77),
    ankle: (0.55, 0.95),
};

/// Bottom of a squat in profile: thigh level with the knee (hip.y == knee.y),
/// vertical shin giving a 90 degree knee, torso leaning forward about 40 degrees.
pub(crate) const SQUAT_BOTTOM: Profile = Profile {
    head: (0.6, 0.46),
    shoulder: (0.543, 0.54),
    elbow: (0.6, 0.62),
    wrist: (0.66, 0.64),
    hip: (0.35, 0.77),
    knee: (0.55, 0.77),
    ankle: (0.55, 0.95),
};

/// Forearm plank with a perfectly straight shoulder-hip-knee-ankle line.
pub(crate) const PLANK: Profile = Profile {
    head: (0.25, 0.47),
    shoulder: (0.3, 0.5),
    elbow: (0.3, 0.62),
    wrist: (0.4, 0.62),
    hip: (0.55, 0.525),
    knee: (0.7, 0.54),
    ankle: (0.85, 0.555),
};

/// Top of a push-up: straight arms stacked under the shoulders.
pub(crate) const PUSH_UP_TOP: Profile = Profile {
    head: (0.25, 0.43),
    shoulder: (0.3, 0.45),
    elbow: (0.3, 0.55),
    wrist: (0.3, 0.65),
    hip: (0.55, 0.5),
    knee: (0.7, 0.53),
    ankle: (0.85, 0.56),
};

/// Bottom of a push-up: 90 degree elbows, body still in one line.
pub(crate) const PUSH_UP_BOTTOM: Profile = Profile {
    head: (0.25, 0.56),
    shoulder: (0.3, 0.57),
    elbow: (0.38, 0.57),
    wrist: (0.38, 0.65),
    hip: (0.55, 0.5609),
    knee: (0.7, 0.5555),
    ankle: (0.85, 0.55),
};

/// Bent-over row: hinged torso about 50 degrees from vertical, elbows under
/// the shoulders and partly bent.
pub(crate) const BENT_OVER_ROW: Profile = Profile {
    head: (0.76, 0.36),
    shoulder: (0.68, 0.407),
    elbow: (0.68, 0.55),
    wrist: (0.72, 0.62),
    hip: (0.45, 0.6),
    knee: (0.51, 0.78),
    ankle: (0.5, 0.95),
};

/// Top of a standing curl in profile.
pub(crate) const CURL_TOP: Profile = Profile {
    head: (0.57, 0.18),
    shoulder: (0.5, 0.3),
    elbow: (0.5, 0.45),
    wrist: (0.6, 0.4),
    hip: (0.5, 0.6),
    knee: (0.5, 0.78),
    ankle: (0.5, 0.95),
};

/// Bottom of a standing curl in profile: arms almost straight.
pub(crate) const CURL_BOTTOM: Profile = Profile {
    head: (0.57, 0.18),
    shoulder: (0.5, 0.3),
    elbow: (0.5, 0.45),
    wrist: (0.51, 0.6),
    hip: (0.5, 0.6),
    knee: (0.5, 0.78),
    ankle: (0.5, 0.95),
};

/// V-sit on the floor with bent knees, torso reclined about 40 degrees.
pub(crate) const V_SIT: Profile = Profile {
    head: (0.38, 0.42),
    shoulder: (0.4, 0.47),
    elbow: (0.48, 0.58),
    wrist: (0.55, 0.6),
    hip: (0.55, 0.65),
    knee: (0.7, 0.52),
    ankle: (0.82, 0.6),
};

/// Flat bench press lockout: lying face up with the bar above the chest.
pub(crate) const BENCH_TOP: Profile = Profile {
    head: (0.25, 0.58),
    shoulder: (0.3, 0.6),
    elbow: (0.3, 0.5),
    wrist: (0.3, 0.4),
    hip: (0.55, 0.6),
    knee: (0.7, 0.6),
    ankle: (0.85, 0.62),
};

/// Pendlay-style row: torso hinged almost level, arms hanging under the
/// shoulders.
pub(crate) const PENDLAY_ROW: Profile = Profile {
    head: (0.8, 0.52),
    shoulder: (0.743, 0.538),
    elbow: (0.743, 0.66),
    wrist: (0.75, 0.76),
    hip: (0.45, 0.6),
    knee: (0.51, 0.78),
    ankle: (0.5, 0.95),
};

/// Leg extension machine, knees bent 90 degrees under the pad.
pub(crate) const LEG_EXTENSION_BOTTOM: Profile = Profile {
    head: (0.52, 0.18),
    shoulder: (0.5, 0.3),
    elbow: (0.5, 0.45),
    wrist: (0.55, 0.58),
    hip: (0.5, 0.6),
    knee: (0.7, 0.6),
    ankle: (0.7, 0.82),
};

/// Leg extension lockout: shins raised level with the thighs.
pub(crate) const LEG_EXTENSION_TOP: Profile = Profile {
    ankle: (0.9, 0.58),
    ..LEG_EXTENSION_BOTTOM
};

/// Top of a bench dip: elbows nearly locked, hands beside the hips, knees
/// bent behind.
pub(crate) const DIP_TOP: Profile = Profile {
    head: (0.52, 0.18),
    shoulder: (0.5, 0.3),
    elbow: (0.47, 0.45),
    wrist: (0.5, 0.6),
    hip: (0.5, 0.62),
    knee: (0.5, 0.8),
    ankle: (0.38, 0.85),
};

/// Hanging from a bar with straight legs raised about 50 degrees.
pub(crate) const HANGING_LEG_RAISE: Profile = Profile {
    head: (0.52, 0.18),
    shoulder: (0.5, 0.3),
    elbow: (0.5, 0.17),
    wrist: (0.5, 0.05),
    hip: (0.5, 0.6),
    knee: (0.638, 0.716),
    ankle: (0.776, 0.832),
};

/// Lockout on a 45 degree incline bench, feet planted on the floor.
pub(crate) const INCLINE_PRESS_TOP: Profile = Profile {
    head: (0.37, 0.47),
    shoulder: (0.41, 0.51),
    elbow: (0.41, 0.41),
    wrist: (0.41, 0.31),
    hip: (0.55, 0.65),
    knee: (0.72, 0.62),
    ankle: (0.75, 0.85),
};

/// Bar lowered to the upper chest on the same incline.
pub(crate) const INCLINE_PRESS_BOTTOM: Profile = Profile {
    elbow: (0.36, 0.56),
    wrist: (0.42, 0.48),
    ..INCLINE_PRESS_TOP
};

/// Lockout on a 30 degree incline with the legs stretched out along the
/// floor.
pub(crate) const INCLINE_PRESS_LEGS_OUT: Profile = Profile {
    head: (0.29, 0.5),
    shoulder: (0.333, 0.525),
    elbow: (0.333, 0.43),
    wrist: (0.333, 0.33),
    hip: (0.55, 0.65),
    knee: (0.7, 0.66),
    ankle: (0.85, 0.67),
};

/// Reclined well back with bent knees and the hands over the chest.
pub(crate) const LYING_TWIST: Profile = Profile {
    head: (0.27, 0.54),
    shoulder: (0.315, 0.5645),
    elbow: (0.38, 0.5),
    wrist: (0.42, 0.45),
    hip: (0.55, 0.65),
    knee: (0.68, 0.5),
    ankle: (0.82, 0.6),
};

/// Row with a level torso and straight legs, framed from further back.
pub(crate) const FLAT_BACK_ROW: Profile = Profile {
    head: (0.85, 0.53),
    shoulder: (0.8, 0.55),
    elbow: (0.8, 0.65),
    wrist: (0.8, 0.75),
    hip: (0.45, 0.55),
    knee: (0.44, 0.65),
    ankle: (0.45, 0.75),
};

/// Front-facing back squat stance holding the bar across the shoulders.
pub(crate) fn barbell_on_back() -> Skeleton {
    let mut skeleton = Skeleton::standing();
    skeleton.pair(LEFT_ELBOW, RIGHT_ELBOW, (0.7, 0.4), (0.3, 0.4));
    skeleton.pair(LEFT_WRIST, RIGHT_WRIST, (0.72, 0.28), (0.28, 0.28));
    skeleton.hands_follow_wrists();
    skeleton
}

/// Front-facing with straight arms raised in a wide V above the head.
pub(crate) fn arms_overhead_wide() -> Skeleton {
    let mut skeleton = Skeleton::standing();
    skeleton.pair(LEFT_ELBOW, RIGHT_ELBOW, (0.775, 0.2), (0.225, 0.2));
    skeleton.pair(LEFT_WRIST, RIGHT_WRIST, (0.95, 0.1), (0.05, 0.1));
    skeleton.hands_follow_wrists();
    skeleton
}

/// Front-facing skeleton hanging from a bar with a wide grip.
pub(crate) fn hanging() -> Skeleton {
    let mut skeleton = Skeleton::standing();
    skeleton.pair(LEFT_ELBOW, RIGHT_ELBOW, (0.68, 0.18), (0.32, 0.18));
    skeleton.pair(LEFT_WRIST, RIGHT_WRIST, (0.7, 0.05), (0.3, 0.05));
    skeleton.hands_follow_wrists();
    skeleton
}

/// Front-facing skeleton sitting upright on a machine, thighs level.
pub(crate) fn seated() -> Skeleton {
    let mut skeleton = Skeleton::standing();
    skeleton.pair(LEFT_HIP, RIGHT_HIP, (0.58, 0.6), (0.42, 0.6));
    skeleton.pair(LEFT_KNEE, RIGHT_KNEE, (0.6, 0.62), (0.4, 0.62));
    skeleton.pair(LEFT_ANKLE, RIGHT_ANKLE, (0.6, 0.85), (0.4, 0.85));
    skeleton.pair(LEFT_HEEL, RIGHT_HEEL, (0.6, 0.87), (0.4, 0.87));
    skeleton.pair(LEFT_FOOT_INDEX, RIGHT_FOOT_INDEX, (0.6, 0.88), (0.4, 0.88));
    skeleton
}
