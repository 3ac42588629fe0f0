//! # facial-aesthetics
//!
//! Facial aesthetics metrics from face-analysis provider output.
//!
//! This crate provides:
//! - **Landmark Access**: Named 2D landmarks with a configurable role → key table
//! - **Feature Metrics**: Canthal tilt, facial thirds, width/height ratios,
//!   symmetry, lip fullness, jaw prominence and profile-view measurements
//! - **Skin Normalization**: Provider skin attributes mapped onto 0–100
//! - **Rating**: A weighted 0–10 composite score and a tier label
//!
//! Every metric has a documented fallback, so partial landmark sets still
//! produce a complete record. Metrics that need a profile view are reported as
//! `N/A` without one.
//!
//! ## Pipeline
//!
//! 1. Parse a provider detect response and select the face to analyze
//! 2. Resolve landmark roles and run each metric extractor
//! 3. Normalize skin and face-quality attributes
//! 4. Assemble the flat metric record
//! 5. Classify the record into a composite score and tier
//!
//! ## Quick Start
//!
//! ```rust
//! use facial_aesthetics::{classify, compute_all, DetectResponse};
//! use serde_json::json;
//!
//! let response = DetectResponse::from_value(&json!({
//!     "faces": [{
//!         "landmark": {
//!             "left_eye_left_corner":  {"x": 50, "y": 100},
//!             "left_eye_right_corner": {"x": 70, "y": 95},
//!             "nose_tip":              {"x": 100, "y": 150},
//!             "contour_chin":          {"x": 100, "y": 250}
//!         },
//!         "attributes": {
//!             "beauty": {"male_score": 70.0, "female_score": 74.0}
//!         }
//!     }]
//! }))?;
//!
//! let front = response.into_face()?;
//! let metrics = compute_all(&front, None);
//! let rating = classify(&metrics);
//!
//! assert_eq!(metrics.number("beauty_avg"), Some(72.0));
//! assert!((0.0..=10.0).contains(&rating.composite_score));
//! println!("{}: {:.2}", rating.category, rating.composite_score);
//! # Ok::<(), facial_aesthetics::Error>(())
//! ```
//!
//! ## Custom Landmark Keys
//!
//! Providers with a different landmark vocabulary are supported by remapping
//! roles, either in code or through the `[landmarks]` config section:
//!
//! ```rust
//! use facial_aesthetics::{LandmarkKeys, MetricAggregator};
//!
//! let keys = LandmarkKeys {
//!     chin: "chin_bottom".to_string(),
//!     hairline: Some("forehead_top".to_string()),
//!     ..LandmarkKeys::default()
//! };
//! let aggregator = MetricAggregator::new(keys);
//! ```

pub mod aggregate;
pub mod attributes;
pub mod config;
mod error;
pub mod geometry;
pub mod landmarks;
pub mod metrics;
pub mod provider;
pub mod rating;
pub mod record;
pub mod report;
pub mod skin;
mod types;

pub use aggregate::{compute_all, is_unavailable, MetricAggregator, RECORD_KEYS};
pub use attributes::{FaceAttributes, HeadPose, SkinStatus};
pub use config::Config;
pub use error::{Error, Result};
pub use landmarks::{get_point, Landmark, LandmarkAccessor, LandmarkKeys, LandmarkSet};
pub use metrics::{FaceMetrics, FacialThirds};
pub use provider::{DetectResponse, FaceObservation};
pub use rating::{classify, RatingResult, ScoreBreakdown, Tier};
pub use record::{MetricRecord, MetricValue, UNAVAILABLE};
pub use report::{prompt_block, MetricReport};
pub use skin::{normalize_skin, SkinScores};
pub use types::{BoundingBox, Point};
