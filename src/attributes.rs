//! Provider-reported face attributes that are not derived from landmarks.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Head orientation in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HeadPose {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

/// Raw provider skin status. Health is roughly 0–10 (higher is better); acne
/// and stain are roughly 0–100 (higher is worse).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkinStatus {
    pub health: Option<f64>,
    pub acne: Option<f64>,
    pub stain: Option<f64>,
}

/// Scalar and structured attributes for one analyzed face. Every field is
/// optional; absent and malformed fields read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceAttributes {
    pub beauty_male: Option<f64>,
    pub beauty_female: Option<f64>,
    pub age: Option<f64>,
    pub gender: Option<String>,
    pub skin: SkinStatus,
    pub face_quality: Option<f64>,
    pub head_pose: Option<HeadPose>,
}

impl FaceAttributes {
    /// Read attributes from a Face++-shaped `attributes` object.
    ///
    /// Never fails: fields with unexpected types are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let head_pose = value.get("headpose").filter(|v| v.is_object()).map(|pose| HeadPose {
            yaw: number_at(pose, &["yaw_angle"]).unwrap_or(0.0),
            pitch: number_at(pose, &["pitch_angle"]).unwrap_or(0.0),
            roll: number_at(pose, &["roll_angle"]).unwrap_or(0.0),
        });

        Self {
            beauty_male: number_at(value, &["beauty", "male_score"]),
            beauty_female: number_at(value, &["beauty", "female_score"]),
            age: number_at(value, &["age", "value"]),
            gender: value
                .pointer("/gender/value")
                .and_then(Value::as_str)
                .map(str::to_string),
            skin: SkinStatus {
                health: number_at(value, &["skinstatus", "health"]),
                acne: number_at(value, &["skinstatus", "acne"]),
                stain: number_at(value, &["skinstatus", "stain"]),
            },
            face_quality: number_at(value, &["facequality", "value"]),
            head_pose,
        }
    }
}

/// Follow `path` through nested objects and read a finite number.
fn number_at(value: &Value, path: &[&str]) -> Option<f64> {
    path.iter()
        .try_fold(value, |node, key| node.get(key))
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
}
