//! Skin and face-quality normalization.
//!
//! Provider skin attributes use different scales and directions. Each is mapped
//! onto 0–100 where 100 is the best skin, then combined with the face-quality
//! score into a single composite.

use serde::{Deserialize, Serialize};

use crate::attributes::FaceAttributes;
use crate::geometry::{clamp_score, round_to};

/// Sub-score used when a raw attribute is absent.
pub const MISSING_SUB_SCORE: f64 = 50.0;

const HEALTH_SCALE: f64 = 12.5;
const HEALTH_OFFSET: f64 = 20.0;
const BLEMISH_SCALE: f64 = -1.2;
const BLEMISH_OFFSET: f64 = 120.0;

const HEALTH_WEIGHT: f64 = 0.45;
const ACNE_WEIGHT: f64 = 0.40;
const STAIN_WEIGHT: f64 = 0.15;

const SKIN_SHARE: f64 = 0.7;
const QUALITY_SHARE: f64 = 0.3;

/// Normalized skin sub-scores and their composite, all on 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkinScores {
    pub skin_score: f64,
    pub health: f64,
    pub acne: f64,
    pub stain: f64,
}

/// `health·12.5 + 20`, so a raw 8 already reaches the top of the scale.
pub fn normalize_health(raw: f64) -> f64 {
    clamp_score(raw * HEALTH_SCALE + HEALTH_OFFSET, 0.0, 100.0)
}

/// `120 − 1.2·raw` for acne and stain, where a higher raw value is worse.
pub fn normalize_blemish(raw: f64) -> f64 {
    clamp_score(raw * BLEMISH_SCALE + BLEMISH_OFFSET, 0.0, 100.0)
}

pub fn normalize_skin(attributes: &FaceAttributes) -> SkinScores {
    let skin = &attributes.skin;
    let health = skin.health.map_or(MISSING_SUB_SCORE, normalize_health);
    let acne = skin.acne.map_or(MISSING_SUB_SCORE, normalize_blemish);
    let stain = skin.stain.map_or(MISSING_SUB_SCORE, normalize_blemish);
    let quality = attributes
        .face_quality
        .map_or(MISSING_SUB_SCORE, |q| clamp_score(q, 0.0, 100.0));

    let intrinsic = HEALTH_WEIGHT * health + ACNE_WEIGHT * acne + STAIN_WEIGHT * stain;
    let skin_score = round_to(SKIN_SHARE * intrinsic + QUALITY_SHARE * quality, 1);

    SkinScores {
        skin_score,
        health: round_to(health, 2),
        acne: round_to(acne, 2),
        stain: round_to(stain, 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::SkinStatus;

    fn attributes(health: f64, acne: f64, stain: f64, quality: f64) -> FaceAttributes {
        FaceAttributes {
            skin: SkinStatus {
                health: Some(health),
                acne: Some(acne),
                stain: Some(stain),
            },
            face_quality: Some(quality),
            ..FaceAttributes::default()
        }
    }

    #[test]
    fn flawless_skin_scores_at_the_top() {
        let scores = normalize_skin(&attributes(8.0, 0.0, 0.0, 100.0));
        assert_eq!(scores.health, 100.0);
        assert_eq!(scores.acne, 100.0);
        assert_eq!(scores.stain, 100.0);
        assert!((scores.skin_score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn worse_raw_values_score_lower() {
        let scores = normalize_skin(&attributes(2.0, 50.0, 80.0, 61.0));
        assert!((scores.health - 45.0).abs() < 1e-9);
        assert!((scores.acne - 60.0).abs() < 1e-9);
        assert!((scores.stain - 24.0).abs() < 1e-9);
        // 0.7 * (20.25 + 24 + 3.6) + 18.3 = 51.795
        assert!((scores.skin_score - 51.8).abs() < 1e-9);
    }

    #[test]
    fn sub_scores_are_clamped() {
        assert_eq!(normalize_health(-5.0), 0.0);
        assert_eq!(normalize_health(30.0), 100.0);
        assert_eq!(normalize_blemish(0.0), 100.0);
        assert_eq!(normalize_blemish(150.0), 0.0);
    }

    #[test]
    fn missing_attributes_use_midpoint() {
        let scores = normalize_skin(&FaceAttributes::default());
        assert_eq!(scores.health, MISSING_SUB_SCORE);
        assert_eq!(scores.acne, MISSING_SUB_SCORE);
        assert_eq!(scores.stain, MISSING_SUB_SCORE);
        assert!((scores.skin_score - 50.0).abs() < 1e-9);

        let partial = FaceAttributes {
            skin: SkinStatus {
                health: Some(8.0),
                ..SkinStatus::default()
            },
            ..FaceAttributes::default()
        };
        let scores = normalize_skin(&partial);
        assert_eq!(scores.health, 100.0);
        assert_eq!(scores.acne, MISSING_SUB_SCORE);
    }
}
