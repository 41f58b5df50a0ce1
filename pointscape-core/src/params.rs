//! Filter parameters owned by a viewing session

use serde::{Deserialize, Serialize};

use crate::point::{Category, DataPoint};

/// Default lower bound of the size range
pub const DEFAULT_MIN_SIZE: f32 = 0.1;
/// Default upper bound of the size range
pub const DEFAULT_MAX_SIZE: f32 = 1.5;
/// Default lower bound of the hue range
pub const DEFAULT_MIN_COLOR: f32 = 0.0;
/// Default upper bound of the hue range
pub const DEFAULT_MAX_COLOR: f32 = 360.0;

/// Category, size and color predicates plus the clustering switch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParameters {
    /// `None` keeps every category
    pub category: Option<Category>,
    pub min_size: f32,
    pub max_size: f32,
    pub min_color: f32,
    pub max_color: f32,
    pub clustering_enabled: bool,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            category: None,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            min_color: DEFAULT_MIN_COLOR,
            max_color: DEFAULT_MAX_COLOR,
            clustering_enabled: false,
        }
    }
}

impl FilterParameters {
    /// Whether `point` passes all three predicates
    ///
    /// Bounds are inclusive on both ends. Nothing is assumed about the
    /// point's size or color being inside the UI ranges.
    pub fn accepts(&self, point: &DataPoint) -> bool {
        self.accepts_category(point)
            && self.min_size <= point.size
            && point.size <= self.max_size
            && self.min_color <= point.color
            && point.color <= self.max_color
    }

    fn accepts_category(&self, point: &DataPoint) -> bool {
        self.category.map_or(true, |category| point.category() == category)
    }
}
