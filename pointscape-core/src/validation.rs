//! Raw record decoding and validation
//!
//! Data sources deliver [`RawPoint`] records whose fields may be missing or
//! out of range. Validation turns them into [`DataPoint`]s, dropping the
//! malformed ones instead of failing the whole batch.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::point::{Category, DataPoint, Point3f, PointId, PointKind};
use crate::point_cloud::PointCloud;

/// Upper bound (exclusive) of the hue domain
pub const HUE_MAX: f32 = 360.0;

/// A point record as delivered by a data source, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    pub id: Option<PointId>,
    pub position: Option<Vec<f32>>,
    pub size: Option<f32>,
    pub color: Option<f32>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub height: Option<f32>,
    /// Set by the decoder when a field had the wrong type
    #[serde(skip)]
    pub decode_error: Option<ValidationError>,
}

impl RawPoint {
    /// A record the decoder could not read; it fails validation with `error`
    pub fn undecodable(id: Option<PointId>, error: ValidationError) -> Self {
        Self {
            id,
            decode_error: Some(error),
            ..Self::default()
        }
    }

    /// Validate this record into a [`DataPoint`]
    ///
    /// A sphere's `height` is ignored; a missing label becomes empty.
    pub fn validate(&self) -> Result<DataPoint, ValidationError> {
        if let Some(error) = &self.decode_error {
            return Err(error.clone());
        }

        let id = self.id.ok_or(ValidationError::Missing { field: "id" })?;

        let coords = self
            .position
            .as_deref()
            .ok_or(ValidationError::Missing { field: "position" })?;
        let position = match coords {
            [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => {
                Point3f::new(*x, *y, *z)
            }
            [_, _, _] => {
                return Err(ValidationError::invalid(
                    "position",
                    "coordinates must be finite",
                ))
            }
            other => {
                return Err(ValidationError::invalid(
                    "position",
                    format!("expected 3 coordinates, got {}", other.len()),
                ))
            }
        };

        let size = self.size.ok_or(ValidationError::Missing { field: "size" })?;
        if !(size.is_finite() && size > 0.0) {
            return Err(ValidationError::invalid(
                "size",
                format!("{size} is not a positive number"),
            ));
        }

        let color = self.color.ok_or(ValidationError::Missing { field: "color" })?;
        if !(color.is_finite() && (0.0..HUE_MAX).contains(&color)) {
            return Err(ValidationError::invalid(
                "color",
                format!("{color} is outside [0, {HUE_MAX})"),
            ));
        }

        let category = self
            .kind
            .as_deref()
            .ok_or(ValidationError::Missing { field: "type" })?
            .parse::<Category>()
            .map_err(|reason| ValidationError::invalid("type", reason))?;

        let kind = match category {
            Category::Sphere => PointKind::Sphere,
            Category::Bar => {
                let height = self.height.ok_or(ValidationError::Missing { field: "height" })?;
                if !(height.is_finite() && height > 0.0) {
                    return Err(ValidationError::invalid(
                        "height",
                        format!("{height} is not a positive number"),
                    ));
                }
                PointKind::Bar { height }
            }
        };

        Ok(DataPoint {
            id,
            position,
            size,
            color,
            label: self.label.clone().unwrap_or_default(),
            kind,
        })
    }
}

/// A record that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    /// Position of the record in the incoming batch
    pub index: usize,
    pub id: Option<PointId>,
    pub error: ValidationError,
}

/// Outcome of validating a batch of records
#[derive(Debug, Clone, Default)]
pub struct Validated {
    pub points: PointCloud<DataPoint>,
    pub rejected: Vec<Rejected>,
}

/// Validate a batch of records, keeping the well-formed ones in order
///
/// The first record with a given id wins; later records repeating it are
/// rejected with [`ValidationError::DuplicateId`].
pub fn validate_points(raws: &[RawPoint]) -> Validated {
    let mut seen = HashSet::with_capacity(raws.len());
    let mut validated = Validated {
        points: PointCloud::with_capacity(raws.len()),
        rejected: Vec::new(),
    };

    for (index, raw) in raws.iter().enumerate() {
        let result = raw.validate().and_then(|point| {
            if seen.insert(point.id) {
                Ok(point)
            } else {
                Err(ValidationError::DuplicateId(point.id))
            }
        });

        match result {
            Ok(point) => validated.points.push(point),
            Err(error) => {
                tracing::warn!(index, id = ?raw.id, field = error.field(), "dropping point: {}", error);
                validated.rejected.push(Rejected {
                    index,
                    id: raw.id,
                    error,
                });
            }
        }
    }

    validated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_bar(id: u64, height: Option<f32>) -> RawPoint {
        RawPoint {
            id: Some(PointId(id)),
            position: Some(vec![-2.0, 1.0, -1.0]),
            size: Some(0.6),
            color: Some(50.0),
            label: Some("Point B".to_string()),
            kind: Some("bar".to_string()),
            height,
            decode_error: None,
        }
    }

    fn raw_sphere(id: u64) -> RawPoint {
        RawPoint {
            id: Some(PointId(id)),
            position: Some(vec![1.0, 2.0, 3.0]),
            size: Some(0.4),
            color: Some(10.0),
            label: Some("Point A".to_string()),
            kind: Some("sphere".to_string()),
            height: None,
            decode_error: None,
        }
    }

    #[test]
    fn test_valid_sphere() {
        let point = raw_sphere(1).validate().unwrap();
        assert_eq!(point.id, PointId(1));
        assert_eq!(point.kind, PointKind::Sphere);
        assert_eq!(point.position, Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(point.label, "Point A");
    }

    #[test]
    fn test_sphere_height_is_ignored() {
        let mut raw = raw_sphere(1);
        raw.height = Some(-5.0);
        let point = raw.validate().unwrap();
        assert_eq!(point.kind.height(), None);
    }

    #[test]
    fn test_bar_requires_positive_height() {
        assert_eq!(
            raw_bar(2, None).validate(),
            Err(ValidationError::Missing { field: "height" })
        );

        let err = raw_bar(2, Some(0.0)).validate().unwrap_err();
        assert_eq!(err.field(), "height");

        let err = raw_bar(2, Some(-1.0)).validate().unwrap_err();
        assert_eq!(err.field(), "height");

        let point = raw_bar(2, Some(2.0)).validate().unwrap();
        assert_eq!(point.kind, PointKind::Bar { height: 2.0 });
    }

    #[test]
    fn test_rejects_bad_fields() {
        let mut raw = raw_sphere(1);
        raw.position = Some(vec![1.0, 2.0]);
        assert_eq!(raw.validate().unwrap_err().field(), "position");

        let mut raw = raw_sphere(1);
        raw.position = Some(vec![1.0, f32::NAN, 2.0]);
        assert_eq!(raw.validate().unwrap_err().field(), "position");

        let mut raw = raw_sphere(1);
        raw.size = Some(0.0);
        assert_eq!(raw.validate().unwrap_err().field(), "size");

        let mut raw = raw_sphere(1);
        raw.color = Some(360.0);
        assert_eq!(raw.validate().unwrap_err().field(), "color");

        let mut raw = raw_sphere(1);
        raw.color = Some(-10.0);
        assert_eq!(raw.validate().unwrap_err().field(), "color");

        let mut raw = raw_sphere(1);
        raw.kind = Some("cone".to_string());
        assert_eq!(raw.validate().unwrap_err().field(), "type");

        let mut raw = raw_sphere(1);
        raw.id = None;
        assert_eq!(raw.validate(), Err(ValidationError::Missing { field: "id" }));
    }

    #[test]
    fn test_missing_label_defaults_to_empty() {
        let mut raw = raw_sphere(1);
        raw.label = None;
        assert_eq!(raw.validate().unwrap().label, "");
    }

    #[test]
    fn test_validate_points_drops_malformed() {
        let raws = vec![raw_sphere(1), raw_bar(2, None), raw_bar(3, Some(3.0))];
        let validated = validate_points(&raws);

        let ids: Vec<_> = validated.points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PointId(1), PointId(3)]);
        assert_eq!(validated.rejected.len(), 1);
        assert_eq!(validated.rejected[0].index, 1);
        assert_eq!(validated.rejected[0].id, Some(PointId(2)));
    }

    #[test]
    fn test_validate_points_first_duplicate_wins() {
        let mut second = raw_sphere(1);
        second.label = Some("Impostor".to_string());
        let validated = validate_points(&[raw_sphere(1), second]);

        assert_eq!(validated.points.len(), 1);
        assert_eq!(validated.points[0].label, "Point A");
        assert_eq!(
            validated.rejected[0].error,
            ValidationError::DuplicateId(PointId(1))
        );
    }

    #[test]
    fn test_undecodable_record_is_rejected_in_place() {
        let error = ValidationError::InvalidValue {
            field: "size",
            reason: "expected a number".to_string(),
        };
        let raws = vec![
            raw_sphere(1),
            RawPoint::undecodable(Some(PointId(2)), error.clone()),
            raw_bar(3, Some(3.0)),
        ];
        let validated = validate_points(&raws);

        let ids: Vec<_> = validated.points.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PointId(1), PointId(3)]);
        assert_eq!(validated.rejected[0].index, 1);
        assert_eq!(validated.rejected[0].id, Some(PointId(2)));
        assert_eq!(validated.rejected[0].error, error);
    }

    #[test]
    fn test_decode_original_record_shape() {
        let json = r#"{"id": 2, "position": [-2, 1, -1], "size": 0.6, "color": 50,
                       "label": "Point B", "type": "bar", "height": 2}"#;
        let raw: RawPoint = serde_json::from_str(json).unwrap();
        let point = raw.validate().unwrap();
        assert_eq!(point.kind, PointKind::Bar { height: 2.0 });
        assert_eq!(point.position, Point3f::new(-2.0, 1.0, -1.0));
    }
}
