//! Core data structures and traits for pointscape
//!
//! This crate provides the data model of the visualization pipeline:
//! data points and their validation, the ordered point container,
//! filter parameters, themes and colors.

pub mod point;
pub mod point_cloud;
pub mod validation;
pub mod params;
pub mod color;
pub mod theme;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use validation::*;
pub use params::*;
pub use color::*;
pub use theme::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
