//! Output formats for a finished analysis.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::rating::{classify, RatingResult};
use crate::record::{MetricRecord, MetricValue};

/// Metrics plus their rating, as written by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub metrics: MetricRecord,
    pub rating: RatingResult,
}

impl MetricReport {
    /// Rate `metrics` and wrap both.
    ///
    /// An empty record means no analysis was possible and is rejected with
    /// [`Error::NoLandmarks`] rather than rated on defaults.
    pub fn try_new(metrics: MetricRecord) -> Result<Self> {
        if metrics.is_empty() {
            return Err(Error::NoLandmarks);
        }
        let rating = classify(&metrics);
        Ok(Self { metrics, rating })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn prompt_block(&self, skip_unavailable: bool) -> String {
        prompt_block(&self.metrics, &self.rating, skip_unavailable)
    }
}

fn is_blank(value: &MetricValue) -> bool {
    match value {
        MetricValue::Unavailable => true,
        MetricValue::Number(n) => *n == 0.0,
        _ => false,
    }
}

/// Flat `key: value` lines in record order, closed by the composite score and
/// category. With `skip_unavailable`, `N/A` and zero values are left out.
pub fn prompt_block(record: &MetricRecord, rating: &RatingResult, skip_unavailable: bool) -> String {
    let mut block = String::new();

    for (key, value) in record.iter() {
        if skip_unavailable && is_blank(value) {
            continue;
        }
        block.push_str(&format!("{}: {}\n", key, value));
    }

    block.push_str(&format!(
        "composite_score: {}\n",
        MetricValue::Number(rating.composite_score)
    ));
    block.push_str(&format!("category: {}", rating.category));
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FacialThirds;
    use crate::rating::Tier;

    fn sample() -> MetricRecord {
        let mut record = MetricRecord::new();
        record.insert("canthal_tilt", -14.036243);
        record.insert("gonial_angle", None::<f64>);
        record.insert("yaw", 0.0);
        record.insert(
            "facial_thirds",
            FacialThirds {
                upper: 31.25,
                middle: 34.376,
                lower: 34.374,
            },
        );
        record.insert("gender", Some("Male".to_string()));
        record
    }

    fn rating() -> RatingResult {
        RatingResult {
            composite_score: 6.4,
            category: Tier::ChadLite,
        }
    }

    #[test]
    fn block_skips_blank_values() {
        let block = prompt_block(&sample(), &rating(), true);
        assert_eq!(
            block,
            "canthal_tilt: -14.04\n\
             facial_thirds: 31.25/34.38/34.37\n\
             gender: Male\n\
             composite_score: 6.4\n\
             category: Chad-Lite"
        );
    }

    #[test]
    fn block_keeps_everything_when_asked() {
        let block = prompt_block(&sample(), &rating(), false);
        let lines: Vec<_> = block.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1], "gonial_angle: N/A");
        assert_eq!(lines[2], "yaw: 0");
    }

    #[test]
    fn empty_record_is_not_rated() {
        assert!(matches!(
            MetricReport::try_new(MetricRecord::new()),
            Err(Error::NoLandmarks)
        ));
    }

    #[test]
    fn block_with_only_blank_metrics_keeps_rating_lines() {
        let mut record = MetricRecord::new();
        record.insert("gonial_angle", None::<f64>);
        let report = MetricReport::try_new(record).unwrap();
        let block = report.prompt_block(true);
        assert!(block.starts_with("composite_score: "));
        assert!(block.ends_with(&format!("category: {}", report.rating.category)));
    }

    #[test]
    fn json_report_shape() {
        let report = MetricReport::try_new(sample()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["metrics"]["gonial_angle"], "N/A");
        assert_eq!(json["metrics"]["gender"], "Male");
        assert!(json["rating"]["composite_score"].is_f64());
        assert!(json["rating"]["category"].is_string());
    }
}
