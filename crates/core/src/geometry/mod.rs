//! Geometric primitives shared by every analyzer.

use std::f32::consts::PI;

use crate::pose::{landmark, CameraView, PoseLandmark, LANDMARK_COUNT};

/// Depth-to-width ratio below which the subject faces the camera.
const FRONT_VIEW_RATIO: f32 = 0.5;
/// Depth-to-width ratio above which the subject is seen in profile.
const SIDE_VIEW_RATIO: f32 = 1.5;

/// Unsigned angle in degrees at vertex `b` formed by the rays towards `a`
/// and `c`, measured in the image plane and folded into `[0, 180]`.
///
/// Coincident points yield `0.0`.
pub fn angle_at(a: PoseLandmark, b: PoseLandmark, c: PoseLandmark) -> f32 {
    let (ax, ay) = (a.x - b.x, a.y - b.y);
    let (cx, cy) = (c.x - b.x, c.y - b.y);
    if ax.hypot(ay) <= f32::EPSILON || cx.hypot(cy) <= f32::EPSILON {
        return 0.0;
    }

    let radians = cy.atan2(cx) - ay.atan2(ax);
    let mut degrees = (radians * 180.0 / PI).abs();
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }

    if degrees.is_finite() {
        degrees.clamp(0.0, 180.0)
    } else {
        0.0
    }
}

/// Euclidean distance in the image plane.
pub fn distance(a: PoseLandmark, b: PoseLandmark) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Inclination of the segment `lower -> upper` away from straight up, in
/// degrees. `0` is vertical, `90` horizontal, above `90` points downwards.
pub fn lean_from_vertical(lower: PoseLandmark, upper: PoseLandmark) -> f32 {
    let dx = (upper.x - lower.x).abs();
    let dy = upper.y - lower.y;
    if dx.hypot(dy) <= f32::EPSILON {
        return 0.0;
    }
    dx.atan2(-dy) * 180.0 / PI
}

/// Classifies the camera view from the shoulder pair.
///
/// The ratio of depth separation to horizontal separation is small when the
/// shoulders are square to the camera and large in profile. No smoothing is
/// applied, so callers should expect jitter near the thresholds.
pub fn detect_view(landmarks: &[PoseLandmark]) -> CameraView {
    if landmarks.len() < LANDMARK_COUNT {
        return CameraView::Unknown;
    }

    let left = landmarks[landmark::LEFT_SHOULDER];
    let right = landmarks[landmark::RIGHT_SHOULDER];
    let dx = (left.x - right.x).abs();
    let dz = (left.z - right.z).abs();
    if dx == 0.0 {
        return CameraView::Side;
    }

    let ratio = dz / dx;
    if ratio < FRONT_VIEW_RATIO {
        CameraView::Front
    } else if ratio > SIDE_VIEW_RATIO {
        CameraView::Side
    } else {
        CameraView::FortyFive
    }
}

/// Maps `value` linearly from `rest` (0.0) to `peak` (1.0), clamped.
/// Works for either direction of travel.
pub fn completion(value: f32, rest: f32, peak: f32) -> f32 {
    let span = peak - rest;
    if span.abs() <= f32::EPSILON {
        return 0.0;
    }
    let progress = (value - rest) / span;
    if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Scores `value` with the first tier whose bound it stays below.
pub fn band_below(value: f32, tiers: &[(f32, f32)], otherwise: f32) -> f32 {
    tiers
        .iter()
        .find(|(bound, _)| value < *bound)
        .map(|(_, score)| *score)
        .unwrap_or(otherwise)
}

/// Scores `value` with the first tier whose bound it reaches.
pub fn band_at_least(value: f32, tiers: &[(f32, f32)], otherwise: f32) -> f32 {
    tiers
        .iter()
        .find(|(bound, _)| value >= *bound)
        .map(|(_, score)| *score)
        .unwrap_or(otherwise)
}
