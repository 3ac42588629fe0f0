//! Landmark sets and the role-based accessor.
//!
//! The provider reports landmarks as a JSON object of named points. Names vary
//! by provider, so extractors ask for anatomical [`Landmark`] roles and a
//! [`LandmarkKeys`] table resolves each role to the provider's key.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::Point;

/// Immutable map of provider landmark names to image-space points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    points: BTreeMap<String, Point>,
}

impl LandmarkSet {
    pub fn new(points: BTreeMap<String, Point>) -> Self {
        Self { points }
    }

    /// Build a set from a provider `landmark` object.
    ///
    /// Entries that are not `{x, y}` objects with numeric coordinates are
    /// dropped. Fails only when `value` is not an object at all.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::InvalidPayload("landmark data is not an object".into()))?;

        let mut points = BTreeMap::new();
        for (name, raw) in map {
            match parse_point(raw) {
                Some(point) => {
                    points.insert(name.clone(), point);
                }
                None => debug!(landmark = %name, "dropping malformed landmark entry"),
            }
        }

        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Typed lookup. `None` when the key is absent or holds the provider's
    /// `(0, 0)` missing marker.
    pub fn get(&self, key: &str) -> Option<Point> {
        self.points.get(key).copied().filter(|p| !p.is_zero())
    }

    /// Lookup returning the `(0, 0)` sentinel when the point is unavailable.
    pub fn get_point(&self, key: &str) -> Point {
        self.get(key).unwrap_or_else(Point::zero)
    }
}

impl<K: Into<String>> FromIterator<(K, Point)> for LandmarkSet {
    fn from_iter<I: IntoIterator<Item = (K, Point)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(|(k, p)| (k.into(), p)).collect(),
        }
    }
}

fn parse_point(raw: &Value) -> Option<Point> {
    let x = raw.get("x")?.as_f64()?;
    let y = raw.get("y")?.as_f64()?;
    if x.is_finite() && y.is_finite() {
        Some(Point::new(x, y))
    } else {
        None
    }
}

/// Anatomical landmark roles used by the metric extractors.
///
/// "Left" and "right" follow the provider's naming (the subject's left/right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Landmark {
    LeftEyeOuter,
    LeftEyeInner,
    RightEyeInner,
    RightEyeOuter,
    LeftPupil,
    RightPupil,
    LeftEyeUpper,
    LeftEyeLower,
    RightEyeUpper,
    RightEyeLower,
    /// Glabella approximation; also the brow reference for face height.
    Glabella,
    LeftBrow,
    RightBrow,
    /// Estimated from the chin when the provider has no hairline point.
    Hairline,
    NoseTip,
    NoseRoot,
    NoseLeft,
    NoseRight,
    Subnasale,
    UpperLipTop,
    LowerLipBottom,
    MouthLeft,
    MouthRight,
    Chin,
    GonionLeft,
    GonionRight,
    ZygionLeft,
    ZygionRight,
}

/// Role → provider key table. Defaults follow the Face++ 83-point vocabulary.
///
/// Loaded from the `[landmarks]` section of the config file; omitted entries
/// keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkKeys {
    pub left_eye_outer: String,
    pub left_eye_inner: String,
    pub right_eye_inner: String,
    pub right_eye_outer: String,
    pub left_pupil: String,
    pub right_pupil: String,
    pub left_eye_upper: String,
    pub left_eye_lower: String,
    pub right_eye_upper: String,
    pub right_eye_lower: String,
    pub glabella: String,
    pub left_brow: String,
    pub right_brow: String,
    pub hairline: Option<String>,
    pub nose_tip: String,
    pub nose_root: String,
    pub nose_left: String,
    pub nose_right: String,
    pub subnasale: String,
    pub upper_lip_top: String,
    pub lower_lip_bottom: String,
    pub mouth_left: String,
    pub mouth_right: String,
    pub chin: String,
    pub gonion_left: String,
    pub gonion_right: String,
    pub zygion_left: String,
    pub zygion_right: String,
}

impl LandmarkKeys {
    /// Provider key for a role, if one is configured.
    pub fn key(&self, role: Landmark) -> Option<&str> {
        let key = match role {
            Landmark::LeftEyeOuter => &self.left_eye_outer,
            Landmark::LeftEyeInner => &self.left_eye_inner,
            Landmark::RightEyeInner => &self.right_eye_inner,
            Landmark::RightEyeOuter => &self.right_eye_outer,
            Landmark::LeftPupil => &self.left_pupil,
            Landmark::RightPupil => &self.right_pupil,
            Landmark::LeftEyeUpper => &self.left_eye_upper,
            Landmark::LeftEyeLower => &self.left_eye_lower,
            Landmark::RightEyeUpper => &self.right_eye_upper,
            Landmark::RightEyeLower => &self.right_eye_lower,
            Landmark::Glabella => &self.glabella,
            Landmark::LeftBrow => &self.left_brow,
            Landmark::RightBrow => &self.right_brow,
            Landmark::Hairline => return self.hairline.as_deref(),
            Landmark::NoseTip => &self.nose_tip,
            Landmark::NoseRoot => &self.nose_root,
            Landmark::NoseLeft => &self.nose_left,
            Landmark::NoseRight => &self.nose_right,
            Landmark::Subnasale => &self.subnasale,
            Landmark::UpperLipTop => &self.upper_lip_top,
            Landmark::LowerLipBottom => &self.lower_lip_bottom,
            Landmark::MouthLeft => &self.mouth_left,
            Landmark::MouthRight => &self.mouth_right,
            Landmark::Chin => &self.chin,
            Landmark::GonionLeft => &self.gonion_left,
            Landmark::GonionRight => &self.gonion_right,
            Landmark::ZygionLeft => &self.zygion_left,
            Landmark::ZygionRight => &self.zygion_right,
        };
        Some(key.as_str()).filter(|k| !k.is_empty())
    }
}

impl Default for LandmarkKeys {
    fn default() -> Self {
        Self {
            left_eye_outer: "left_eye_left_corner".to_string(),
            left_eye_inner: "left_eye_right_corner".to_string(),
            right_eye_inner: "right_eye_left_corner".to_string(),
            right_eye_outer: "right_eye_right_corner".to_string(),
            left_pupil: "left_eye_pupil".to_string(),
            right_pupil: "right_eye_pupil".to_string(),
            left_eye_upper: "left_eye_upper_left_quarter".to_string(),
            left_eye_lower: "left_eye_lower_left_quarter".to_string(),
            right_eye_upper: "right_eye_upper_right_quarter".to_string(),
            right_eye_lower: "right_eye_lower_right_quarter".to_string(),
            glabella: "left_eyebrow_upper_middle".to_string(),
            left_brow: "left_eyebrow_upper_middle".to_string(),
            right_brow: "right_eyebrow_upper_middle".to_string(),
            hairline: None,
            nose_tip: "nose_tip".to_string(),
            nose_root: "nose_contour_upper_middle".to_string(),
            nose_left: "nose_left".to_string(),
            nose_right: "nose_right".to_string(),
            subnasale: "nose_contour_lower_middle".to_string(),
            upper_lip_top: "mouth_upper_lip_top".to_string(),
            lower_lip_bottom: "mouth_lower_lip_bottom".to_string(),
            mouth_left: "mouth_left_corner".to_string(),
            mouth_right: "mouth_right_corner".to_string(),
            chin: "contour_chin".to_string(),
            gonion_left: "contour_left9".to_string(),
            gonion_right: "contour_right9".to_string(),
            zygion_left: "contour_left7".to_string(),
            zygion_right: "contour_right7".to_string(),
        }
    }
}

/// Resolves landmark roles against one landmark set.
#[derive(Debug, Clone, Copy)]
pub struct LandmarkAccessor<'a> {
    landmarks: &'a LandmarkSet,
    keys: &'a LandmarkKeys,
}

impl<'a> LandmarkAccessor<'a> {
    pub fn new(landmarks: &'a LandmarkSet, keys: &'a LandmarkKeys) -> Self {
        Self { landmarks, keys }
    }

    /// The point for `role`, or `None` when unconfigured, absent or `(0, 0)`.
    pub fn point(&self, role: Landmark) -> Option<Point> {
        self.keys.key(role).and_then(|key| self.landmarks.get(key))
    }

    /// Both points of a pair, or `None` if either is unavailable.
    pub fn pair(&self, a: Landmark, b: Landmark) -> Option<(Point, Point)> {
        Some((self.point(a)?, self.point(b)?))
    }
}

/// Point for `key`, or the `(0, 0)` sentinel when the key is absent, the value
/// is not a well-formed `{x, y}` object, or `landmarks` is not an object.
pub fn get_point(landmarks: &Value, key: &str) -> Point {
    landmarks
        .get(key)
        .and_then(parse_point)
        .unwrap_or_else(Point::zero)
}
