//! Geometric facial aesthetics metrics.
//!
//! Each extractor is an independent pure function over a [`LandmarkAccessor`].
//! Missing landmarks and degenerate geometry never fail: numeric metrics fall
//! back to a fixed population-average constant, and the nose/chin/jaw-angle
//! metrics report `None` (unavailable) instead.

use serde::{Deserialize, Serialize};

use crate::geometry::{angle_at_vertex, distance, finite_or, ratio_or, round_to, tilt_angle};
use crate::landmarks::{Landmark, LandmarkAccessor};
use crate::types::Point;

pub const DEFAULT_CANTHAL_TILT: f64 = 0.0;
pub const DEFAULT_INTERPUPIL_DISTANCE: f64 = 60.0;
pub const DEFAULT_MID_FACE_RATIO: f64 = 0.65;
pub const DEFAULT_BIZYGOMATIC_WIDTH: f64 = 130.0;
pub const DEFAULT_BIGONIAL_WIDTH: f64 = 110.0;
pub const DEFAULT_FWHR: f64 = 0.85;
pub const DEFAULT_THIRD: f64 = 33.3;
pub const DEFAULT_SYMMETRY: f64 = 0.8;
pub const DEFAULT_EYE_WHR: f64 = 0.33;
pub const DEFAULT_LIP_FULLNESS: f64 = 0.12;
pub const DEFAULT_JAW_PROMINENCE: f64 = 0.85;

/// Hairline offset above the chin used when no hairline point is available.
pub const ESTIMATED_HAIRLINE_OFFSET: f64 = 200.0;

/// Estimated upper third as a share of the brow → chin height, used when the
/// fixed offset would put the hairline at or below the brow.
const ESTIMATED_UPPER_SHARE: f64 = 0.5;

/// Facial thirds as percentages of total face height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacialThirds {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl FacialThirds {
    pub const fn even() -> Self {
        Self {
            upper: DEFAULT_THIRD,
            middle: DEFAULT_THIRD,
            lower: DEFAULT_THIRD,
        }
    }

    pub fn total(&self) -> f64 {
        self.upper + self.middle + self.lower
    }
}

/// All landmark-derived metrics for one analysis.
///
/// Front-view metrics are always present (possibly as fallbacks). Profile
/// metrics are `None` when no profile view was supplied or its landmarks
/// could not support the measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMetrics {
    pub canthal_tilt: f64,
    pub interpupil_distance: f64,
    pub mid_face_ratio: f64,
    pub bizygomatic_width: f64,
    pub bigonial_width: f64,
    pub facial_width_height_ratio: f64,
    pub facial_thirds: FacialThirds,
    pub symmetry_score: f64,
    pub eye_whr: f64,
    pub lip_fullness: f64,
    pub jaw_prominence: f64,
    pub nose_width: Option<f64>,
    pub nose_length: Option<f64>,

    // Profile view
    pub gonial_angle: Option<f64>,
    pub nose_projection: Option<f64>,
    pub chin_projection: Option<f64>,
    pub nose_chin_distance: Option<f64>,
}

impl FaceMetrics {
    /// Run every extractor over the front view and, if given, the profile view.
    pub fn compute(front: &LandmarkAccessor, profile: Option<&LandmarkAccessor>) -> Self {
        Self {
            canthal_tilt: canthal_tilt(front),
            interpupil_distance: interpupil_distance(front),
            mid_face_ratio: mid_face_ratio(front),
            bizygomatic_width: bizygomatic_width(front),
            bigonial_width: bigonial_width(front),
            facial_width_height_ratio: facial_width_height_ratio(front),
            facial_thirds: facial_thirds(front),
            symmetry_score: symmetry_score(front),
            eye_whr: eye_whr(front),
            lip_fullness: lip_fullness(front),
            jaw_prominence: jaw_prominence(front),
            nose_width: nose_width(front),
            nose_length: nose_length(front),
            gonial_angle: profile.and_then(gonial_angle),
            nose_projection: profile.and_then(nose_projection),
            chin_projection: profile.and_then(chin_projection),
            nose_chin_distance: profile.and_then(nose_chin_distance),
        }
    }
}

/// Mean canthal tilt of both eyes in degrees; positive when the outer canthus
/// sits above the inner canthus. Uses the single available eye if only one is
/// detected.
pub fn canthal_tilt(lm: &LandmarkAccessor) -> f64 {
    let left = lm
        .pair(Landmark::LeftEyeInner, Landmark::LeftEyeOuter)
        .and_then(|(inner, outer)| eye_tilt(inner, outer));
    let right = lm
        .pair(Landmark::RightEyeInner, Landmark::RightEyeOuter)
        .and_then(|(inner, outer)| eye_tilt(inner, outer));

    let tilt = match (left, right) {
        (Some(l), Some(r)) => (l + r) / 2.0,
        (Some(t), None) | (None, Some(t)) => t,
        (None, None) => return DEFAULT_CANTHAL_TILT,
    };
    finite_or(tilt, DEFAULT_CANTHAL_TILT)
}

/// Tilt of one eye. The outer canthus is mirrored to the right of the inner
/// one so both eyes share a sign convention.
fn eye_tilt(inner: Point, outer: Point) -> Option<f64> {
    let run = (outer.x - inner.x).abs();
    if run == 0.0 {
        return None;
    }
    Some(tilt_angle(inner, Point::new(inner.x + run, outer.y)))
}

pub fn interpupil_distance(lm: &LandmarkAccessor) -> f64 {
    lm.pair(Landmark::LeftPupil, Landmark::RightPupil)
        .map(|(l, r)| distance(l, r))
        .filter(|d| d.is_finite() && *d > 0.0)
        .unwrap_or(DEFAULT_INTERPUPIL_DISTANCE)
}

/// Subnasale → upper lip height over glabella → chin height.
pub fn mid_face_ratio(lm: &LandmarkAccessor) -> f64 {
    let Some((subnasale, lip)) = lm.pair(Landmark::Subnasale, Landmark::UpperLipTop) else {
        return DEFAULT_MID_FACE_RATIO;
    };
    let Some((glabella, chin)) = lm.pair(Landmark::Glabella, Landmark::Chin) else {
        return DEFAULT_MID_FACE_RATIO;
    };

    ratio_or(
        distance(subnasale, lip),
        distance(glabella, chin),
        DEFAULT_MID_FACE_RATIO,
    )
}

fn measured_width(lm: &LandmarkAccessor, left: Landmark, right: Landmark) -> Option<f64> {
    lm.pair(left, right)
        .map(|(l, r)| distance(l, r))
        .filter(|d| d.is_finite() && *d > 0.0)
}

/// Face width across the cheekbones.
pub fn bizygomatic_width(lm: &LandmarkAccessor) -> f64 {
    measured_width(lm, Landmark::ZygionLeft, Landmark::ZygionRight)
        .unwrap_or(DEFAULT_BIZYGOMATIC_WIDTH)
}

/// Face width across the jaw corners.
pub fn bigonial_width(lm: &LandmarkAccessor) -> f64 {
    measured_width(lm, Landmark::GonionLeft, Landmark::GonionRight)
        .unwrap_or(DEFAULT_BIGONIAL_WIDTH)
}

/// Bizygomatic width over brow → chin height.
pub fn facial_width_height_ratio(lm: &LandmarkAccessor) -> f64 {
    let Some(width) = measured_width(lm, Landmark::ZygionLeft, Landmark::ZygionRight) else {
        return DEFAULT_FWHR;
    };
    let Some((brow, chin)) = lm.pair(Landmark::Glabella, Landmark::Chin) else {
        return DEFAULT_FWHR;
    };

    ratio_or(width, distance(brow, chin), DEFAULT_FWHR)
}

/// Hairline → brow, brow → subnasale, subnasale → chin as percentages.
///
/// Without a hairline landmark the hairline is placed
/// [`ESTIMATED_HAIRLINE_OFFSET`] pixels above the chin. On large photos that
/// point can fall below the brow; the hairline is then placed half the brow →
/// chin height above the brow instead.
pub fn facial_thirds(lm: &LandmarkAccessor) -> FacialThirds {
    let (Some(glabella), Some(subnasale), Some(chin)) = (
        lm.point(Landmark::Glabella),
        lm.point(Landmark::Subnasale),
        lm.point(Landmark::Chin),
    ) else {
        return FacialThirds::even();
    };

    let hairline = lm
        .point(Landmark::Hairline)
        .unwrap_or_else(|| estimated_hairline(glabella, chin));

    let upper = distance(hairline, glabella);
    let middle = distance(glabella, subnasale);
    let lower = distance(subnasale, chin);

    let total = upper + middle + lower;
    if !total.is_finite() || total <= 0.0 {
        return FacialThirds::even();
    }

    FacialThirds {
        upper: upper / total * 100.0,
        middle: middle / total * 100.0,
        lower: lower / total * 100.0,
    }
}

fn estimated_hairline(glabella: Point, chin: Point) -> Point {
    let fixed = chin.y - ESTIMATED_HAIRLINE_OFFSET;
    if fixed < glabella.y {
        return Point::new(chin.x, fixed);
    }
    let lower_face = (chin.y - glabella.y).abs();
    Point::new(glabella.x, glabella.y - lower_face * ESTIMATED_UPPER_SHARE)
}

const SYMMETRY_PAIRS: [(Landmark, Landmark); 4] = [
    (Landmark::LeftPupil, Landmark::RightPupil),
    (Landmark::LeftBrow, Landmark::RightBrow),
    (Landmark::MouthLeft, Landmark::MouthRight),
    (Landmark::GonionLeft, Landmark::GonionRight),
];

/// One minus the mean relative horizontal asymmetry of paired landmarks
/// around the nose-tip midline. Always in `[0, 1]`.
pub fn symmetry_score(lm: &LandmarkAccessor) -> f64 {
    let Some(nose_tip) = lm.point(Landmark::NoseTip) else {
        return DEFAULT_SYMMETRY;
    };
    let center_x = nose_tip.x;

    let mut total_asymmetry = 0.0;
    let mut valid_pairs = 0usize;

    for (left_role, right_role) in SYMMETRY_PAIRS {
        let Some((left, right)) = lm.pair(left_role, right_role) else {
            continue;
        };

        let left_dist = (left.x - center_x).abs();
        let right_dist = (right.x - center_x).abs();
        let widest = left_dist.max(right_dist);
        if widest > 0.0 {
            total_asymmetry += (left_dist - right_dist).abs() / widest;
            valid_pairs += 1;
        }
    }

    if valid_pairs == 0 {
        return DEFAULT_SYMMETRY;
    }

    let score = 1.0 - total_asymmetry / valid_pairs as f64;
    finite_or(score, DEFAULT_SYMMETRY).clamp(0.0, 1.0)
}

/// Mean eye height over mean eye width, over the eyes that were detected.
pub fn eye_whr(lm: &LandmarkAccessor) -> f64 {
    let eyes = [
        (
            (Landmark::LeftEyeOuter, Landmark::LeftEyeInner),
            (Landmark::LeftEyeUpper, Landmark::LeftEyeLower),
        ),
        (
            (Landmark::RightEyeInner, Landmark::RightEyeOuter),
            (Landmark::RightEyeUpper, Landmark::RightEyeLower),
        ),
    ];

    let mut width_sum = 0.0;
    let mut height_sum = 0.0;
    let mut count = 0usize;

    for ((w1, w2), (h1, h2)) in eyes {
        if let (Some((a, b)), Some((c, d))) = (lm.pair(w1, w2), lm.pair(h1, h2)) {
            width_sum += distance(a, b);
            height_sum += distance(c, d);
            count += 1;
        }
    }

    if count == 0 {
        return DEFAULT_EYE_WHR;
    }

    let n = count as f64;
    ratio_or(height_sum / n, width_sum / n, DEFAULT_EYE_WHR)
}

/// Vermillion height over bizygomatic width.
pub fn lip_fullness(lm: &LandmarkAccessor) -> f64 {
    let Some((upper, lower)) = lm.pair(Landmark::UpperLipTop, Landmark::LowerLipBottom) else {
        return DEFAULT_LIP_FULLNESS;
    };
    let Some(width) = measured_width(lm, Landmark::ZygionLeft, Landmark::ZygionRight) else {
        return DEFAULT_LIP_FULLNESS;
    };

    ratio_or(distance(upper, lower), width, DEFAULT_LIP_FULLNESS)
}

/// Bigonial width over bizygomatic width.
pub fn jaw_prominence(lm: &LandmarkAccessor) -> f64 {
    let (Some(bigonial), Some(bizygomatic)) = (
        measured_width(lm, Landmark::GonionLeft, Landmark::GonionRight),
        measured_width(lm, Landmark::ZygionLeft, Landmark::ZygionRight),
    ) else {
        return DEFAULT_JAW_PROMINENCE;
    };

    ratio_or(bigonial, bizygomatic, DEFAULT_JAW_PROMINENCE)
}

fn rounded(value: f64) -> Option<f64> {
    value.is_finite().then(|| round_to(value, 1))
}

/// Alar width.
pub fn nose_width(lm: &LandmarkAccessor) -> Option<f64> {
    let (left, right) = lm.pair(Landmark::NoseLeft, Landmark::NoseRight)?;
    rounded(distance(left, right))
}

/// Nose root to tip.
pub fn nose_length(lm: &LandmarkAccessor) -> Option<f64> {
    let (root, tip) = lm.pair(Landmark::NoseRoot, Landmark::NoseTip)?;
    rounded(distance(root, tip))
}

/// Angle at the chin contour between the two jaw contour points.
pub fn gonial_angle(lm: &LandmarkAccessor) -> Option<f64> {
    let (left, right) = lm.pair(Landmark::GonionLeft, Landmark::GonionRight)?;
    let vertex = lm.point(Landmark::Chin)?;
    if distance(left, vertex) == 0.0 || distance(right, vertex) == 0.0 {
        return None;
    }
    rounded(angle_at_vertex(left, vertex, right))
}

/// Horizontal offset of the nose tip from the nose root.
pub fn nose_projection(lm: &LandmarkAccessor) -> Option<f64> {
    let (tip, root) = lm.pair(Landmark::NoseTip, Landmark::NoseRoot)?;
    rounded((tip.x - root.x).abs())
}

/// Horizontal offset of the chin from the subnasale, or from the nose tip when
/// the subnasale is missing.
pub fn chin_projection(lm: &LandmarkAccessor) -> Option<f64> {
    let chin = lm.point(Landmark::Chin)?;
    let reference = lm
        .point(Landmark::Subnasale)
        .or_else(|| lm.point(Landmark::NoseTip))?;
    rounded((chin.x - reference.x).abs())
}

pub fn nose_chin_distance(lm: &LandmarkAccessor) -> Option<f64> {
    let (chin, tip) = lm.pair(Landmark::Chin, Landmark::NoseTip)?;
    rounded(distance(chin, tip))
}
