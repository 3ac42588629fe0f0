//! Combines landmark metrics, skin scores and provider attributes into one
//! [`MetricRecord`].

use tracing::debug;

use crate::landmarks::{LandmarkAccessor, LandmarkKeys};
use crate::metrics::FaceMetrics;
use crate::provider::FaceObservation;
use crate::record::{MetricRecord, MetricValue};
use crate::skin::normalize_skin;

/// Beauty sub-score used when the provider omits it (0–100 scale).
pub const DEFAULT_BEAUTY: f64 = 50.0;

/// Runs every extractor with a fixed landmark key table.
#[derive(Debug, Clone, Default)]
pub struct MetricAggregator {
    keys: LandmarkKeys,
}

impl MetricAggregator {
    pub fn new(keys: LandmarkKeys) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &LandmarkKeys {
        &self.keys
    }

    /// Compute the full metric record for a front view and an optional
    /// profile view.
    ///
    /// Returns an empty record when the front view has no landmarks. Profile
    /// metrics are `N/A` without a profile view. Never fails.
    pub fn compute_all(
        &self,
        front: &FaceObservation,
        profile: Option<&FaceObservation>,
    ) -> MetricRecord {
        if front.landmarks.is_empty() {
            debug!("front view has no landmarks, nothing to compute");
            return MetricRecord::new();
        }

        let front_lm = LandmarkAccessor::new(&front.landmarks, &self.keys);
        let profile_lm = profile
            .filter(|p| !p.landmarks.is_empty())
            .map(|p| LandmarkAccessor::new(&p.landmarks, &self.keys));

        debug!(
            front_landmarks = front.landmarks.len(),
            has_profile = profile_lm.is_some(),
            "computing facial metrics"
        );

        let m = FaceMetrics::compute(&front_lm, profile_lm.as_ref());
        let attrs = &front.attributes;
        let skin = normalize_skin(attrs);

        let beauty_male = attrs.beauty_male.unwrap_or(DEFAULT_BEAUTY);
        let beauty_female = attrs.beauty_female.unwrap_or(DEFAULT_BEAUTY);
        let pose = attrs.head_pose.unwrap_or_default();

        let mut record = MetricRecord::new();
        record.insert("canthal_tilt", m.canthal_tilt);
        record.insert("interpupil_distance", m.interpupil_distance);
        record.insert("mid_face_ratio", m.mid_face_ratio);
        record.insert("gonial_angle", m.gonial_angle);
        record.insert("chin_projection", m.chin_projection);
        record.insert("nose_chin_distance", m.nose_chin_distance);
        record.insert("nose_projection", m.nose_projection);
        record.insert("bizygomatic_width", m.bizygomatic_width);
        record.insert("bigonial_width", m.bigonial_width);
        record.insert("facial_width_height_ratio", m.facial_width_height_ratio);
        record.insert("facial_thirds", m.facial_thirds);
        record.insert("age", attrs.age);
        record.insert("gender", attrs.gender.clone());
        record.insert("symmetry_score", m.symmetry_score);
        record.insert("eye_whr", m.eye_whr);
        record.insert("lip_fullness", m.lip_fullness);
        record.insert("jaw_prominence", m.jaw_prominence);
        record.insert("nose_width", m.nose_width);
        record.insert("nose_length", m.nose_length);
        record.insert("beauty_male", beauty_male);
        record.insert("beauty_female", beauty_female);
        record.insert("beauty_avg", (beauty_male + beauty_female) / 2.0);
        record.insert("yaw", pose.yaw);
        record.insert("pitch", pose.pitch);
        record.insert("roll", pose.roll);
        record.insert("skin_score", skin.skin_score);
        record.insert("health", skin.health);
        record.insert("acne", skin.acne);
        record.insert("stain", skin.stain);

        let unavailable: Vec<&str> = record
            .iter()
            .filter(|(_, v)| v.is_unavailable())
            .map(|(k, _)| k)
            .collect();
        if !unavailable.is_empty() {
            debug!(metrics = ?unavailable, "metrics unavailable for this analysis");
        }

        record
    }
}

/// [`MetricAggregator::compute_all`] with the default Face++ key table.
pub fn compute_all(front: &FaceObservation, profile: Option<&FaceObservation>) -> MetricRecord {
    MetricAggregator::default().compute_all(front, profile)
}

/// Keys every non-empty record contains.
pub const RECORD_KEYS: [&str; 29] = [
    "canthal_tilt",
    "interpupil_distance",
    "mid_face_ratio",
    "gonial_angle",
    "chin_projection",
    "nose_chin_distance",
    "nose_projection",
    "bizygomatic_width",
    "bigonial_width",
    "facial_width_height_ratio",
    "facial_thirds",
    "age",
    "gender",
    "symmetry_score",
    "eye_whr",
    "lip_fullness",
    "jaw_prominence",
    "nose_width",
    "nose_length",
    "beauty_male",
    "beauty_female",
    "beauty_avg",
    "yaw",
    "pitch",
    "roll",
    "skin_score",
    "health",
    "acne",
    "stain",
];

/// True when `key` is absent from the record or holds the unavailable marker.
pub fn is_unavailable(record: &MetricRecord, key: &str) -> bool {
    record.get(key).map_or(true, MetricValue::is_unavailable)
}
