//! Composite 0–10 rating and tier classification.
//!
//! Each input metric is mapped onto a 0–10 component score and the components
//! are combined with fixed weights:
//!
//! | component | source | weight |
//! |---|---|---|
//! | beauty | `beauty_avg / 10` | 0.40 |
//! | canthal | `5 + canthal_tilt / 2` | 0.25 |
//! | gonial | `10 − |gonial_angle − 120| / 10` | 0.20 |
//! | symmetry | `symmetry_score · 10` | 0.10 |
//! | midface | `10 − |mid_face_ratio − 0.5| · 20` | 0.05 |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::clamp_score;
use crate::record::MetricRecord;

const BEAUTY_WEIGHT: f64 = 0.40;
const CANTHAL_WEIGHT: f64 = 0.25;
const GONIAL_WEIGHT: f64 = 0.20;
const SYMMETRY_WEIGHT: f64 = 0.10;
const MIDFACE_WEIGHT: f64 = 0.05;

pub const IDEAL_GONIAL_ANGLE: f64 = 120.0;
pub const IDEAL_MID_FACE_RATIO: f64 = 0.5;

// Values assumed for metrics the record lacks or marks unavailable.
const DEFAULT_BEAUTY_AVG: f64 = 50.0;
const DEFAULT_CANTHAL_TILT: f64 = 0.0;
const DEFAULT_SYMMETRY: f64 = 0.8;

/// Ordered rating tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Sub-5")]
    Sub5,
    #[serde(rename = "LTN")]
    Ltn,
    #[serde(rename = "HTN")]
    Htn,
    #[serde(rename = "Chad-Lite")]
    ChadLite,
    #[serde(rename = "PSL-God-Candidate")]
    PslGodCandidate,
    #[serde(rename = "PSL-God")]
    PslGod,
}

/// Inclusive upper bound of each tier except the last.
const TIER_BOUNDS: [(f64, Tier); 5] = [
    (3.0, Tier::Sub5),
    (4.5, Tier::Ltn),
    (6.0, Tier::Htn),
    (7.5, Tier::ChadLite),
    (8.5, Tier::PslGodCandidate),
];

impl Tier {
    pub const ALL: [Tier; 6] = [
        Tier::Sub5,
        Tier::Ltn,
        Tier::Htn,
        Tier::ChadLite,
        Tier::PslGodCandidate,
        Tier::PslGod,
    ];

    pub fn from_score(score: f64) -> Self {
        TIER_BOUNDS
            .iter()
            .find(|(bound, _)| score <= *bound)
            .map_or(Tier::PslGod, |&(_, tier)| tier)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Sub5 => "Sub-5",
            Tier::Ltn => "LTN",
            Tier::Htn => "HTN",
            Tier::ChadLite => "Chad-Lite",
            Tier::PslGodCandidate => "PSL-God-Candidate",
            Tier::PslGod => "PSL-God",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Component scores on 0–10, before weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub beauty: f64,
    pub canthal: f64,
    pub gonial: f64,
    pub symmetry: f64,
    pub midface: f64,
}

impl ScoreBreakdown {
    pub fn from_record(metrics: &MetricRecord) -> Self {
        let beauty_avg = metrics.number("beauty_avg").unwrap_or(DEFAULT_BEAUTY_AVG);
        let tilt = metrics.number("canthal_tilt").unwrap_or(DEFAULT_CANTHAL_TILT);
        let gonial = metrics.number("gonial_angle").unwrap_or(IDEAL_GONIAL_ANGLE);
        let symmetry = metrics.number("symmetry_score").unwrap_or(DEFAULT_SYMMETRY);
        let midface = metrics.number("mid_face_ratio").unwrap_or(IDEAL_MID_FACE_RATIO);

        Self {
            beauty: component(beauty_avg / 10.0),
            canthal: component(5.0 + tilt / 2.0),
            gonial: component(10.0 - (gonial - IDEAL_GONIAL_ANGLE).abs() / 10.0),
            symmetry: component(symmetry * 10.0),
            midface: component(10.0 - (midface - IDEAL_MID_FACE_RATIO).abs() * 20.0),
        }
    }

    pub fn composite(&self) -> f64 {
        let score = BEAUTY_WEIGHT * self.beauty
            + CANTHAL_WEIGHT * self.canthal
            + GONIAL_WEIGHT * self.gonial
            + SYMMETRY_WEIGHT * self.symmetry
            + MIDFACE_WEIGHT * self.midface;
        component(score)
    }
}

fn component(value: f64) -> f64 {
    clamp_score(value, 0.0, 10.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    pub composite_score: f64,
    pub category: Tier,
}

/// Rate a metric record. Pure: the same record always gives the same result,
/// regardless of key order.
pub fn classify(metrics: &MetricRecord) -> RatingResult {
    let composite_score = ScoreBreakdown::from_record(metrics).composite();
    RatingResult {
        composite_score,
        category: Tier::from_score(composite_score),
    }
}
