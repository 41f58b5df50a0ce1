//! Render projection: points to renderable primitives

use std::collections::HashSet;

use pointscape_core::{Category, DataPoint, Point3f, PointCloud, PointId, PointKind, Rgb, Vector3f};
use serde::{Deserialize, Serialize};

use crate::session::PointerEvent;

/// Tessellation used for sphere primitives
pub const SPHERE_SEGMENTS: u32 = 32;

/// Scale applied to a primitive while the pointer is over it
pub const HOVER_SCALE: f32 = 1.5;

/// Presentation knobs for projected primitives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimitiveStyle {
    pub highlight_color: Rgb,
    pub hover_scale: f32,
    pub sphere_segments: u32,
}

impl Default for PrimitiveStyle {
    fn default() -> Self {
        Self {
            highlight_color: Rgb::YELLOW,
            hover_scale: HOVER_SCALE,
            sphere_segments: SPHERE_SEGMENTS,
        }
    }
}

/// Geometry the host should build
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometryKind {
    Sphere { segments: u32 },
    Box,
}

impl GeometryKind {
    pub fn category(&self) -> Category {
        match self {
            GeometryKind::Sphere { .. } => Category::Sphere,
            GeometryKind::Box => Category::Bar,
        }
    }
}

/// A renderable shape derived from one point; rebuilt every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedPrimitive {
    pub id: PointId,
    pub geometry_kind: GeometryKind,
    /// Width, height, depth
    pub dimensions: Vector3f,
    pub color_value: Rgb,
    pub is_highlighted: bool,
    pub position: Point3f,
    pub scale: f32,
}

/// Ids the host currently reports under the pointer
///
/// Owned by the host side and handed to the session each frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverSet {
    hovered: HashSet<PointId>,
}

impl HoverSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track hover begin/end; clicks don't change hover state
    pub fn apply(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::HoverBegin(id) => {
                self.hovered.insert(id);
            }
            PointerEvent::HoverEnd(id) => {
                self.hovered.remove(&id);
            }
            PointerEvent::Click(_) => {}
        }
    }

    pub fn is_hovered(&self, id: PointId) -> bool {
        self.hovered.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.hovered.is_empty()
    }

    pub fn clear(&mut self) {
        self.hovered.clear();
    }

    /// Drop ids that are no longer drawn
    ///
    /// The host never reports the pointer leaving a primitive it unmounted,
    /// so a point filtered out and back in comes back unhovered.
    pub fn retain_visible(&mut self, visible: &PointCloud<DataPoint>) {
        self.hovered.retain(|id| visible.contains(*id));
    }
}

/// Project one point
pub fn project(point: &DataPoint, hovered: bool, style: &PrimitiveStyle) -> RenderedPrimitive {
    let (geometry_kind, dimensions) = match point.kind {
        PointKind::Sphere => (
            GeometryKind::Sphere {
                segments: style.sphere_segments,
            },
            Vector3f::new(point.size, point.size, point.size),
        ),
        PointKind::Bar { height } => (
            GeometryKind::Box,
            Vector3f::new(point.size, height, point.size),
        ),
    };

    RenderedPrimitive {
        id: point.id,
        geometry_kind,
        dimensions,
        color_value: if hovered {
            style.highlight_color
        } else {
            Rgb::from_hue(point.color)
        },
        is_highlighted: hovered,
        position: point.position,
        scale: if hovered { style.hover_scale } else { 1.0 },
    }
}

/// Project a whole point set, preserving order
pub fn project_all(
    cloud: &PointCloud<DataPoint>,
    hover: &HoverSet,
    style: &PrimitiveStyle,
) -> Vec<RenderedPrimitive> {
    cloud
        .iter()
        .map(|point| project(point, hover.is_hovered(point.id), style))
        .collect()
}
