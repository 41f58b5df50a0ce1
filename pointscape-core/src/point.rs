//! Data point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Identifier of a data point, unique within the active point set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PointId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Geometry category of a point, without per-point data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sphere,
    Bar,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sphere => "sphere",
            Category::Bar => "bar",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(Category::Sphere),
            "bar" => Ok(Category::Bar),
            other => Err(format!("unknown point type `{other}`")),
        }
    }
}

/// Shape of a point. Only bars carry an extrusion height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointKind {
    Sphere,
    Bar { height: f32 },
}

impl PointKind {
    pub fn category(&self) -> Category {
        match self {
            PointKind::Sphere => Category::Sphere,
            PointKind::Bar { .. } => Category::Bar,
        }
    }

    /// Bar height, `None` for spheres
    pub fn height(&self) -> Option<f32> {
        match self {
            PointKind::Sphere => None,
            PointKind::Bar { height } => Some(*height),
        }
    }
}

/// A validated data point
///
/// Instances are produced by [`RawPoint::validate`](crate::RawPoint::validate)
/// or the `sphere`/`bar` constructors and are treated as immutable; transforms
/// produce new points rather than editing existing ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: PointId,
    pub position: Point3f,
    /// Scale factor for rendering, always positive
    pub size: f32,
    /// Hue in degrees, `0 <= color < 360`
    pub color: f32,
    pub label: String,
    #[serde(flatten)]
    pub kind: PointKind,
}

impl DataPoint {
    /// Create a sphere point
    pub fn sphere(
        id: impl Into<PointId>,
        position: Point3f,
        size: f32,
        color: f32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            size,
            color,
            label: label.into(),
            kind: PointKind::Sphere,
        }
    }

    /// Create a bar point extruded to `height`
    pub fn bar(
        id: impl Into<PointId>,
        position: Point3f,
        size: f32,
        color: f32,
        label: impl Into<String>,
        height: f32,
    ) -> Self {
        Self {
            id: id.into(),
            position,
            size,
            color,
            label: label.into(),
            kind: PointKind::Bar { height },
        }
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Copy of this point moved to `position`
    pub fn with_position(&self, position: Point3f) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_str() {
        assert_eq!("sphere".parse::<Category>(), Ok(Category::Sphere));
        assert_eq!(" BAR ".parse::<Category>(), Ok(Category::Bar));
        assert!("cone".parse::<Category>().is_err());
    }

    #[test]
    fn test_kind_height_only_on_bars() {
        let sphere = DataPoint::sphere(1, Point3f::new(1.0, 2.0, 3.0), 0.4, 10.0, "A");
        let bar = DataPoint::bar(2, Point3f::new(-2.0, 1.0, -1.0), 0.6, 50.0, "B", 2.0);

        assert_eq!(sphere.category(), Category::Sphere);
        assert_eq!(sphere.kind.height(), None);
        assert_eq!(bar.category(), Category::Bar);
        assert_eq!(bar.kind.height(), Some(2.0));
    }

    #[test]
    fn test_with_position_keeps_attributes() {
        let bar = DataPoint::bar(2, Point3f::new(-2.0, 1.0, -1.0), 0.6, 50.0, "B", 2.0);
        let moved = bar.with_position(Point3f::new(-3.0, 1.0, -1.0));

        assert_eq!(moved.id, bar.id);
        assert_eq!(moved.kind, bar.kind);
        assert_eq!(moved.position.x, -3.0);
    }

    #[test]
    fn test_serialize_uses_type_tag() {
        let bar = DataPoint::bar(4, Point3f::new(3.0, 0.0, -3.0), 0.8, 120.0, "Point D", 3.0);
        let json = serde_json::to_value(&bar).unwrap();

        assert_eq!(json["type"], "bar");
        assert_eq!(json["height"], 3.0);
        assert_eq!(json["id"], 4);
    }
}
