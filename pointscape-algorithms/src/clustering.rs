//! Positional clustering transform
//!
//! This is not a spatial grouping algorithm. Every point is nudged along x
//! according to the parity of its index in the set: even indices move by
//! `+CLUSTER_SHIFT`, odd indices by `-CLUSTER_SHIFT`. The result depends on
//! iteration order, so re-applying it to a reordered set gives a different
//! layout.

use nalgebra::Vector3;
use pointscape_core::{DataPoint, PointCloud, Transform3D};
use rayon::prelude::*;

/// Distance along x that each point is shifted by
pub const CLUSTER_SHIFT: f32 = 1.0;

/// Translation applied to the point at `index`
pub fn cluster_offset(index: usize) -> Transform3D {
    let dx = if index % 2 == 0 { CLUSTER_SHIFT } else { -CLUSTER_SHIFT };
    Transform3D::translation(Vector3::new(dx, 0.0, 0.0))
}

/// Apply the index-parity shift to every point
///
/// y, z and all non-positional attributes are left untouched.
///
/// # Example
/// ```rust
/// use pointscape_core::{DataPoint, Point3f, PointCloud};
/// use pointscape_algorithms::cluster_points;
///
/// let cloud = PointCloud::from_points(vec![
///     DataPoint::sphere(1, Point3f::new(1.0, 2.0, 3.0), 0.4, 10.0, "Point A"),
///     DataPoint::bar(2, Point3f::new(-2.0, 1.0, -1.0), 0.6, 50.0, "Point B", 2.0),
/// ]);
///
/// let clustered = cluster_points(&cloud);
/// assert_eq!(clustered[0].position.x, 2.0);
/// assert_eq!(clustered[1].position.x, -3.0);
/// ```
pub fn cluster_points(cloud: &PointCloud<DataPoint>) -> PointCloud<DataPoint> {
    let shifted: Vec<DataPoint> = cloud
        .points
        .par_iter()
        .enumerate()
        .map(|(index, point)| cluster_offset(index).apply(point))
        .collect();

    PointCloud::from_points(shifted)
}
