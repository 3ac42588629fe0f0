//! Parsing of face-analysis provider responses.
//!
//! The provider returns, per photo, a list of detected faces, each carrying a
//! `landmark` object, an `attributes` object and a `face_rectangle`.

use serde_json::Value;
use tracing::warn;

use crate::attributes::FaceAttributes;
use crate::error::{Error, Result};
use crate::landmarks::LandmarkSet;
use crate::types::BoundingBox;

/// Landmarks and attributes for one detected face.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceObservation {
    pub landmarks: LandmarkSet,
    pub attributes: FaceAttributes,
    pub face_rectangle: Option<BoundingBox>,
}

impl FaceObservation {
    /// Build an observation from one provider face object.
    ///
    /// Fails when `value` is not an object or has no `landmark` object.
    /// Missing or malformed attributes are tolerated.
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidPayload("face entry is not an object".into()));
        }

        let landmark = value
            .get("landmark")
            .ok_or_else(|| Error::InvalidPayload("face entry has no landmark data".into()))?;
        let landmarks = LandmarkSet::from_value(landmark)?;

        let attributes = value
            .get("attributes")
            .map(FaceAttributes::from_value)
            .unwrap_or_default();

        let face_rectangle = value
            .get("face_rectangle")
            .and_then(|r| serde_json::from_value::<BoundingBox>(r.clone()).ok());

        Ok(Self {
            landmarks,
            attributes,
            face_rectangle,
        })
    }
}

/// Parse every face entry, skipping unusable ones. Fails with the first
/// entry's error only when no entry is usable.
fn usable_faces(items: &[Value]) -> Result<Vec<FaceObservation>> {
    let mut faces = Vec::with_capacity(items.len());
    let mut first_error = None;

    for (index, item) in items.iter().enumerate() {
        match FaceObservation::from_value(item) {
            Ok(face) => faces.push(face),
            Err(e) => {
                warn!(face = index, error = %e, "skipping unusable face entry");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if faces.is_empty() => Err(e),
        _ => Ok(faces),
    }
}

/// A full detect response for one photo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectResponse {
    pub faces: Vec<FaceObservation>,
}

impl DetectResponse {
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Parse a response object. A provider `error_message` becomes
    /// [`Error::Provider`].
    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidPayload("response is not an object".into()));
        }

        if let Some(message) = value.get("error_message").and_then(Value::as_str) {
            return Err(Error::Provider(message.to_string()));
        }

        let faces = match value.get("faces") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => usable_faces(items)?,
            Some(_) => return Err(Error::InvalidPayload("faces is not an array".into())),
        };

        Ok(Self { faces })
    }

    /// The face to analyze: the one with the largest rectangle, or the first
    /// face when no rectangles were reported.
    pub fn select_face(&self) -> Result<&FaceObservation> {
        self.selected_index().map(|i| &self.faces[i])
    }

    /// Consume the response, keeping only the selected face.
    pub fn into_face(mut self) -> Result<FaceObservation> {
        let index = self.selected_index()?;
        Ok(self.faces.swap_remove(index))
    }

    fn selected_index(&self) -> Result<usize> {
        if self.faces.len() > 1 {
            warn!(faces = self.faces.len(), "several faces detected, using the largest");
        }

        let area = |face: &FaceObservation| face.face_rectangle.map_or(0.0, |r| r.area());

        let mut best: Option<(usize, f64)> = None;
        for (i, face) in self.faces.iter().enumerate() {
            let a = area(face);
            match best {
                Some((_, best_area)) if a <= best_area => {}
                _ => best = Some((i, a)),
            }
        }

        best.map(|(i, _)| i).ok_or(Error::NoFaceDetected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use serde_json::json;

    fn face(width: f64, nose_x: f64) -> Value {
        json!({
            "face_rectangle": {"top": 10, "left": 10, "width": width, "height": width},
            "landmark": {"nose_tip": {"x": nose_x, "y": 50}},
            "attributes": {"age": {"value": 30}},
        })
    }

    #[test]
    fn parses_single_face_response() {
        let response = DetectResponse::from_value(&json!({"faces": [face(100.0, 42.0)]})).unwrap();
        let selected = response.select_face().unwrap();
        assert_eq!(selected.landmarks.get("nose_tip"), Some(Point::new(42.0, 50.0)));
        assert_eq!(selected.attributes.age, Some(30.0));
        assert_eq!(selected.face_rectangle.map(|r| r.area()), Some(10000.0));
    }

    #[test]
    fn selects_largest_face() {
        let response = DetectResponse::from_value(&json!({
            "faces": [face(50.0, 1.0), face(120.0, 2.0), face(80.0, 3.0)]
        }))
        .unwrap();

        let face = response.into_face().unwrap();
        assert_eq!(face.landmarks.get("nose_tip"), Some(Point::new(2.0, 50.0)));
    }

    #[test]
    fn first_face_without_rectangles() {
        let response = DetectResponse::from_value(&json!({
            "faces": [
                {"landmark": {"nose_tip": {"x": 1, "y": 1}}},
                {"landmark": {"nose_tip": {"x": 2, "y": 2}}},
            ]
        }))
        .unwrap();
        let face = response.select_face().unwrap();
        assert_eq!(face.landmarks.get("nose_tip"), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn no_faces_is_an_error() {
        let response = DetectResponse::from_value(&json!({"faces": []})).unwrap();
        assert!(matches!(response.select_face(), Err(Error::NoFaceDetected)));
        assert!(matches!(response.into_face(), Err(Error::NoFaceDetected)));
    }

    #[test]
    fn provider_error_message() {
        let err = DetectResponse::from_value(&json!({"error_message": "CONCURRENCY_LIMIT_EXCEEDED"}))
            .unwrap_err();
        assert!(matches!(err, Error::Provider(ref m) if m == "CONCURRENCY_LIMIT_EXCEEDED"));
    }

    #[test]
    fn rejects_unusable_payloads() {
        assert!(DetectResponse::from_json("not json").is_err());
        assert!(matches!(
            DetectResponse::from_value(&json!([1, 2])),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(
            DetectResponse::from_value(&json!({"faces": [{"attributes": {}}]})),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(
            DetectResponse::from_value(&json!({"faces": [{"landmark": [1, 2]}]})),
            Err(Error::InvalidPayload(_))
        ));
    }

    #[test]
    fn skips_unusable_faces() {
        let response = DetectResponse::from_value(&json!({
            "faces": [
                {"face_rectangle": {"top": 0, "left": 0, "width": 500, "height": 500}, "landmark": [1, 2]},
                face(80.0, 7.0),
                {"attributes": {}},
            ]
        }))
        .unwrap();

        assert_eq!(response.faces.len(), 1);
        let face = response.into_face().unwrap();
        assert_eq!(face.landmarks.get("nose_tip"), Some(Point::new(7.0, 50.0)));
    }

    #[test]
    fn tolerates_malformed_attributes() {
        let observation = FaceObservation::from_value(&json!({
            "landmark": {"nose_tip": {"x": 1, "y": 1}},
            "attributes": "oops",
            "face_rectangle": {"top": "x"},
        }))
        .unwrap();
        assert_eq!(observation.attributes, FaceAttributes::default());
        assert_eq!(observation.face_rectangle, None);
    }
}
