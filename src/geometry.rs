//! Geometry primitives shared by the metric extractors.
//!
//! All angles are in degrees. Image coordinates have y growing downward, so
//! "up" in the image is negative y.

use crate::types::Point;

/// Euclidean distance between two points.
pub fn distance(p1: Point, p2: Point) -> f64 {
    p1.distance(&p2)
}

/// Angle at `p2` between the rays `p2 → p1` and `p2 → p3`, in `[0, 180]`.
///
/// Returns `0.0` when either ray has zero length. The cosine is clamped to
/// `[-1, 1]` before `acos` so floating-point drift on near-collinear input
/// cannot produce NaN.
pub fn angle_at_vertex(p1: Point, p2: Point, p3: Point) -> f64 {
    let v1 = p1 - p2;
    let v2 = p3 - p2;

    let mag1 = v1.norm();
    let mag2 = v2.norm();
    if mag1 == 0.0 || mag2 == 0.0 {
        return 0.0;
    }

    let cos_angle = clamp_cosine(v1.dot(&v2) / (mag1 * mag2));
    cos_angle.acos().to_degrees()
}

/// Signed angle of the line `p1 → p2` against the horizontal.
///
/// Positive when `p2` sits higher in the image than `p1`. The result is in
/// `(-180, 180]`.
pub fn tilt_angle(p1: Point, p2: Point) -> f64 {
    let rise = p1.y - p2.y;
    let run = p2.x - p1.x;
    rise.atan2(run).to_degrees()
}

/// Clamp a cosine into the domain of `acos`. NaN maps to `1.0`.
pub fn clamp_cosine(value: f64) -> f64 {
    if value.is_nan() {
        return 1.0;
    }
    value.clamp(-1.0, 1.0)
}

/// Clamp a score into `[lo, hi]`, mapping NaN to `lo`.
pub fn clamp_score(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.clamp(lo, hi)
}

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Divide, or return `fallback` when the denominator is not positive.
pub fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator > 0.0 {
        finite_or(numerator / denominator, fallback)
    } else {
        fallback
    }
}

/// Replace NaN and infinities with `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
