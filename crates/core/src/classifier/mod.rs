//! Stateless single-frame exercise classifier.
//!
//! A frame is reduced to a [`BodySnapshot`] once, then matched against
//! [`RULES`] in order; the first matching rule wins. Temporal stability is
//! the engine's job, not the classifier's.

use crate::exercises::ExerciseType;
use crate::geometry::lean_from_vertical;
use crate::pose::landmark::*;
use crate::pose::{Pose, PoseLandmark};

/// Torso lean under which the body counts as upright.
const UPRIGHT_LEAN: f32 = 25.0;
/// Horizontal spread must exceed vertical spread by this factor to count as
/// lying down.
const LYING_SPREAD_RATIO: f32 = 1.2;
/// Mean elbow-to-shoulder horizontal offset under which the elbows are tucked.
const TUCKED_ELBOW_OFFSET: f32 = 0.06;

/// Derived quantities shared by every rule, computed once per frame.
#[derive(Debug, Clone, Copy)]
pub struct BodySnapshot {
    pub nose: PoseLandmark,
    pub shoulder: PoseLandmark,
    pub elbow: PoseLandmark,
    pub wrist: PoseLandmark,
    pub hip: PoseLandmark,
    pub knee: PoseLandmark,
    pub ankle: PoseLandmark,
    pub shoulder_width: f32,
    /// Wrist distance in shoulder widths.
    pub span: f32,
    /// Torso lean from vertical in degrees.
    pub recline: f32,
    /// Thigh lean from vertical in degrees.
    pub thigh_lean: f32,
    pub elbow_angle: f32,
    pub hip_angle: f32,
    pub knee_angle: f32,
    pub hip_sag: f32,
    pub upright: bool,
    pub is_lying: bool,
    pub is_standing: bool,
    pub feet_on_floor: bool,
    pub hands_overhead: bool,
    pub elbows_tucked: bool,
    /// Upright torso with the thighs horizontal, whatever the shins do.
    pub thighs_level: bool,
    pub seated: bool,
    pub torso_inclined: bool,
    /// Hands below the shoulders, as when supporting the body face down.
    pub prone: bool,
    /// Hands above the shoulders, as when pressing face up.
    pub supine: bool,
}

impl BodySnapshot {
    pub fn from_pose(pose: &Pose<'_>) -> Self {
        let shoulder = pose.shoulder_mid();
        let hip = pose.hip_mid();
        let knee = pose.knee_mid();
        let ankle = pose.ankle_mid();
        let wrist = pose.wrist_mid();
        let elbow = pose.elbow_mid();
        let nose = pose.nose();
        let shoulder_width = pose.shoulder_width();

        let xs = [shoulder.x, hip.x, ankle.x];
        let ys = [shoulder.y, hip.y, ankle.y];
        let spread = |values: [f32; 3]| {
            let max = values.iter().copied().fold(f32::MIN, f32::max);
            let min = values.iter().copied().fold(f32::MAX, f32::min);
            max - min
        };
        let recline = pose.torso_lean();
        let upright = recline < UPRIGHT_LEAN;
        // An upright torso with the legs held out front is sitting, not lying.
        let is_lying = !upright && spread(xs) > spread(ys) * LYING_SPREAD_RATIO;
        let thighs_level = (knee.y - hip.y).abs() < 0.1 && recline < 35.0;
        let tuck = ((pose.at(LEFT_ELBOW).x - pose.at(LEFT_SHOULDER).x).abs()
            + (pose.at(RIGHT_ELBOW).x - pose.at(RIGHT_SHOULDER).x).abs())
            * 0.5;

        Self {
            nose,
            shoulder,
            elbow,
            wrist,
            hip,
            knee,
            ankle,
            shoulder_width,
            span: pose.wrist_distance() / shoulder_width,
            recline,
            thigh_lean: lean_from_vertical(knee, hip),
            elbow_angle: pose.elbow_angle(),
            hip_angle: pose.hip_angle(),
            knee_angle: pose.knee_angle(),
            hip_sag: pose.hip_sag(),
            upright,
            is_lying,
            is_standing: !is_lying && shoulder.y < hip.y,
            feet_on_floor: ankle.y > hip.y + 0.1,
            hands_overhead: wrist.y < nose.y,
            elbows_tucked: tuck < TUCKED_ELBOW_OFFSET,
            thighs_level,
            seated: thighs_level && ankle.y > knee.y + 0.1,
            torso_inclined: (UPRIGHT_LEAN..=80.0).contains(&recline),
            prone: wrist.y > shoulder.y + 0.03,
            supine: wrist.y < shoulder.y,
        }
    }
}

/// Body orientation a rule is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Global,
    Standing,
    Lying,
}

impl Branch {
    fn admits(self, body: &BodySnapshot) -> bool {
        match self {
            Branch::Global => true,
            Branch::Standing => body.is_standing,
            Branch::Lying => body.is_lying,
        }
    }
}

/// One entry in the ordered rule list.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierRule {
    pub name: &'static str,
    pub branch: Branch,
    pub exercise: ExerciseType,
    pub predicate: fn(&BodySnapshot) -> bool,
}

impl ClassifierRule {
    pub fn matches(&self, body: &BodySnapshot) -> bool {
        self.branch.admits(body) && (self.predicate)(body)
    }
}

const fn rule(
    name: &'static str,
    branch: Branch,
    exercise: ExerciseType,
    predicate: fn(&BodySnapshot) -> bool,
) -> ClassifierRule {
    ClassifierRule {
        name,
        branch,
        exercise,
        predicate,
    }
}

/// Detection rules in priority order. Later rules rely on earlier ones having
/// claimed their more specific poses, so the order must not change casually.
pub static RULES: &[ClassifierRule] = &[
    rule("incline-row", Branch::Global, ExerciseType::TBarRow, |b| {
        (35.0..75.0).contains(&b.recline)
            && b.shoulder.y < b.hip.y
            && b.ankle.y > b.hip.y + 0.15
            && b.knee_angle > 120.0
            && b.wrist.y > b.shoulder.y + 0.05
    }),
    rule("v-sit", Branch::Global, ExerciseType::RussianTwist, |b| {
        (25.0..65.0).contains(&b.recline)
            && b.shoulder.y < b.hip.y
            && b.knee_angle < 120.0
            && b.hip_angle < 110.0
            && b.ankle.y < b.hip.y + 0.1
            && b.wrist.y > b.shoulder.y
    }),
    rule("machine-fly", Branch::Global, ExerciseType::ChestFlyMachine, |b| {
        b.seated && b.span > 1.8 && (b.wrist.y - b.shoulder.y).abs() < 0.12 && !b.torso_inclined
    }),
    rule("hinged-row", Branch::Standing, ExerciseType::TBarRow, |b| {
        b.hip_angle < 130.0
            && b.recline > 30.0
            && b.knee_angle > 120.0
            && b.wrist.y > b.hip.y - 0.1
            && b.ankle.y > b.hip.y + 0.1
    }),
    rule("seated-leg-extension", Branch::Standing, ExerciseType::LegExtension, |b| {
        b.thighs_level && b.wrist.y > b.hip.y - 0.1
    }),
    rule("dip-support", Branch::Standing, ExerciseType::TricepDips, |b| {
        b.upright
            && !b.seated
            && (b.wrist.y - b.hip.y).abs() < 0.15
            && b.elbow.y < b.wrist.y
            && (60.0..=175.0).contains(&b.elbow_angle)
            && b.knee_angle < 140.0
    }),
    rule("barbell-squat", Branch::Standing, ExerciseType::Squat, |b| {
        b.feet_on_floor
            && !b.hands_overhead
            && (b.wrist.y - b.shoulder.y).abs() < 0.1
            && b.span > 1.2
            && b.elbow.y > b.wrist.y + 0.05
    }),
    rule("deep-bodyweight-squat", Branch::Standing, ExerciseType::Squat, |b| {
        b.knee_angle < 110.0
            && b.hip_angle < 110.0
            && b.hip.y > b.knee.y - 0.1
            && b.ankle.y > b.knee.y
    }),
    rule("standing-curl", Branch::Standing, ExerciseType::BarbellCurl, |b| {
        b.feet_on_floor
            && b.elbows_tucked
            && b.wrist.y > b.shoulder.y + 0.05
            && b.elbow_angle < 160.0
            && b.knee_angle > 150.0
    }),
    rule("seated-incline-press", Branch::Standing, ExerciseType::InclineBenchPress, |b| {
        b.supine && b.torso_inclined && b.feet_on_floor && b.hip.y > b.shoulder.y + 0.1
    }),
    rule("hanging-leg-raise", Branch::Standing, ExerciseType::LegRaises, |b| {
        b.hands_overhead && !b.seated && b.elbow_angle > 140.0 && b.hip_angle < 140.0
    }),
    rule("standing-lateral-raise", Branch::Standing, ExerciseType::LateralRaise, |b| {
        !b.hands_overhead
            && b.feet_on_floor
            && !b.seated
            && b.span > 2.2
            && (b.wrist.y - b.shoulder.y).abs() < 0.12
            && b.elbow_angle > 140.0
            && b.knee_angle > 150.0
    }),
    rule("overhead-lateral-raise", Branch::Standing, ExerciseType::LateralRaise, |b| {
        b.hands_overhead
            && !b.seated
            && b.span > 3.0
            && b.wrist.y > b.nose.y - 0.08
            && b.elbow_angle > 150.0
            && b.knee_angle > 150.0
    }),
    rule("seated-pulldown", Branch::Standing, ExerciseType::LatPulldown, |b| {
        b.hands_overhead && b.seated
    }),
    rule("hanging-pull-up", Branch::Standing, ExerciseType::PullUp, |b| {
        b.hands_overhead && b.span > 1.0
    }),
    rule("lying-twist", Branch::Lying, ExerciseType::RussianTwist, |b| {
        b.knee_angle < 120.0 && b.hip_angle < 120.0 && b.shoulder.y < b.hip.y
    }),
    rule("flat-back-row", Branch::Lying, ExerciseType::TBarRow, |b| {
        b.recline > 70.0 && b.thigh_lean < 25.0 && b.ankle.y > b.hip.y + 0.15
    }),
    rule("forearm-plank", Branch::Lying, ExerciseType::Plank, |b| {
        b.prone
            && b.elbow_angle < 110.0
            && b.elbow.y > b.shoulder.y + 0.05
            && b.hip_sag.abs() < 0.1
    }),
    rule("high-plank", Branch::Lying, ExerciseType::Plank, |b| {
        b.prone && b.elbow_angle >= 160.0 && b.hip_sag.abs() < 0.05
    }),
    rule("push-up", Branch::Lying, ExerciseType::PushUp, |b| b.prone),
    rule("incline-press", Branch::Lying, ExerciseType::InclineBenchPress, |b| {
        b.supine && b.recline < 75.0
    }),
    rule("flat-press", Branch::Lying, ExerciseType::BenchPress, |b| b.supine),
];

/// First rule matching the frame, if any.
pub fn matching_rule(landmarks: &[PoseLandmark]) -> Option<&'static ClassifierRule> {
    let pose = Pose::new(landmarks)?;
    let body = BodySnapshot::from_pose(&pose);
    RULES.iter().find(|rule| rule.matches(&body))
}

/// Classifies a single frame. `None` means no confident classification.
pub fn classify(landmarks: &[PoseLandmark]) -> Option<ExerciseType> {
    matching_rule(landmarks).map(|rule| rule.exercise)
}
