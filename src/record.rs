//! The flat metric record handed to the classifier and the report step.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::metrics::FacialThirds;

/// Serialized form of [`MetricValue::Unavailable`].
pub const UNAVAILABLE: &str = "N/A";

/// One metric value.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Thirds(FacialThirds),
    Text(String),
    Unavailable,
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, MetricValue::Unavailable)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<Option<f64>> for MetricValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(MetricValue::Unavailable, MetricValue::Number)
    }
}

impl From<FacialThirds> for MetricValue {
    fn from(value: FacialThirds) -> Self {
        MetricValue::Thirds(value)
    }
}

impl From<Option<String>> for MetricValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(MetricValue::Unavailable, MetricValue::Text)
    }
}

impl fmt::Display for MetricValue {
    /// Numbers print with at most two decimals and no trailing zeros.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", compact(*n)),
            MetricValue::Thirds(t) => write!(
                f,
                "{}/{}/{}",
                compact(t.upper),
                compact(t.middle),
                compact(t.lower)
            ),
            MetricValue::Text(s) => f.write_str(s),
            MetricValue::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

fn compact(n: f64) -> String {
    let s = format!("{:.2}", n);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Number(n) => serializer.serialize_f64(*n),
            MetricValue::Thirds(t) => t.serialize(serializer),
            MetricValue::Text(s) => serializer.serialize_str(s),
            MetricValue::Unavailable => serializer.serialize_str(UNAVAILABLE),
        }
    }
}

/// Metric name → value, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricRecord {
    entries: Vec<(String, MetricValue)>,
    index: BTreeMap<String, usize>,
}

impl MetricRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Numeric value for `key`; `None` when absent, unavailable or non-numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(MetricValue::as_number)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<MetricValue>> FromIterator<(K, V)> for MetricRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for MetricRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut record = MetricRecord::new();
        record.insert("a", 1.0);
        record.insert("b", None::<f64>);
        record.insert("a", 2.0);

        assert_eq!(record.len(), 2);
        assert_eq!(record.number("a"), Some(2.0));
        assert!(record.get("b").is_some_and(MetricValue::is_unavailable));
        assert_eq!(record.number("b"), None);
        assert_eq!(record.number("missing"), None);

        let keys: Vec<_> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn serializes_unavailable_as_marker() {
        let mut record = MetricRecord::new();
        record.insert("gonial_angle", None::<f64>);
        record.insert("age", 27.0);
        record.insert("gender", Some("Female".to_string()));
        record.insert(
            "facial_thirds",
            FacialThirds {
                upper: 30.0,
                middle: 35.0,
                lower: 35.0,
            },
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["gonial_angle"], "N/A");
        assert_eq!(json["age"], 27.0);
        assert_eq!(json["gender"], "Female");
        assert_eq!(json["facial_thirds"]["middle"], 35.0);
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(MetricValue::Number(100.0).to_string(), "100");
        assert_eq!(MetricValue::Number(-14.0362).to_string(), "-14.04");
        assert_eq!(MetricValue::Number(0.5).to_string(), "0.5");
        assert_eq!(MetricValue::Number(-0.001).to_string(), "0");
        assert_eq!(MetricValue::Unavailable.to_string(), "N/A");
        assert_eq!(
            MetricValue::Thirds(FacialThirds {
                upper: 30.0,
                middle: 35.0,
                lower: 35.0
            })
            .to_string(),
            "30/35/35"
        );
    }
}
