//! Filtering algorithms

use pointscape_core::{DataPoint, FilterParameters, PointCloud};
use rayon::prelude::*;

/// Category, size and color range filter
///
/// Keeps every point for which [`FilterParameters::accepts`] holds: the
/// category matches (or no category is set), and size and color fall inside
/// their inclusive ranges. Input order is preserved. An empty result is a
/// valid outcome, not an error.
///
/// # Arguments
/// * `cloud` - Input points
/// * `params` - Active filter parameters
///
/// # Returns
/// * `PointCloud<DataPoint>` - The retained points, a subset of `cloud`
///
/// # Example
/// ```rust
/// use pointscape_core::{Category, DataPoint, FilterParameters, Point3f, PointCloud};
/// use pointscape_algorithms::filter_points;
///
/// let cloud = PointCloud::from_points(vec![
///     DataPoint::sphere(1, Point3f::new(1.0, 2.0, 3.0), 0.4, 10.0, "Point A"),
///     DataPoint::bar(2, Point3f::new(-2.0, 1.0, -1.0), 0.6, 50.0, "Point B", 2.0),
/// ]);
/// let params = FilterParameters {
///     category: Some(Category::Bar),
///     ..Default::default()
/// };
///
/// let filtered = filter_points(&cloud, &params);
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].label, "Point B");
/// ```
pub fn filter_points(cloud: &PointCloud<DataPoint>, params: &FilterParameters) -> PointCloud<DataPoint> {
    let retained: Vec<DataPoint> = cloud
        .points
        .par_iter()
        .filter(|point| params.accepts(point))
        .cloned()
        .collect();

    PointCloud::from_points(retained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointscape_core::{Category, Point3f, PointId};

    fn sample_points() -> PointCloud<DataPoint> {
        PointCloud::from_points(vec![
            DataPoint::sphere(1, Point3f::new(1.0, 2.0, 3.0), 0.4, 10.0, "Point A"),
            DataPoint::bar(2, Point3f::new(-2.0, 1.0, -1.0), 0.6, 50.0, "Point B", 2.0),
            DataPoint::sphere(3, Point3f::new(2.0, -1.0, -2.0), 0.3, 90.0, "Point C"),
            DataPoint::bar(4, Point3f::new(3.0, 0.0, -3.0), 0.8, 120.0, "Point D", 3.0),
        ])
    }

    fn ids(cloud: &PointCloud<DataPoint>) -> Vec<u64> {
        cloud.iter().map(|p| p.id.0).collect()
    }

    #[test]
    fn test_filter_empty_cloud() {
        let cloud = PointCloud::<DataPoint>::new();
        let filtered = filter_points(&cloud, &FilterParameters::default());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_default_parameters_keep_everything() {
        let cloud = sample_points();
        let filtered = filter_points(&cloud, &FilterParameters::default());
        assert_eq!(filtered, cloud);
    }

    #[test]
    fn test_filter_by_category() {
        let cloud = sample_points();

        let bars = filter_points(&cloud, &FilterParameters {
            category: Some(Category::Bar),
            ..Default::default()
        });
        assert_eq!(ids(&bars), vec![2, 4]);

        let spheres = filter_points(&cloud, &FilterParameters {
            category: Some(Category::Sphere),
            ..Default::default()
        });
        assert_eq!(ids(&spheres), vec![1, 3]);
    }

    #[test]
    fn test_min_size_excludes_small_points_regardless_of_category() {
        let cloud = sample_points();

        for category in [None, Some(Category::Sphere), Some(Category::Bar)] {
            let filtered = filter_points(&cloud, &FilterParameters {
                category,
                min_size: 0.5,
                ..Default::default()
            });
            assert!(!filtered.contains(PointId(1)));
            assert!(!filtered.contains(PointId(3)));
        }
    }

    #[test]
    fn test_size_bound_is_inclusive() {
        let cloud = sample_points();
        let filtered = filter_points(&cloud, &FilterParameters {
            max_size: 0.6,
            ..Default::default()
        });
        assert_eq!(ids(&filtered), vec![1, 2, 3]);
    }

    #[test]
    fn test_color_range() {
        let cloud = sample_points();
        let filtered = filter_points(&cloud, &FilterParameters {
            min_color: 50.0,
            max_color: 90.0,
            ..Default::default()
        });
        assert_eq!(ids(&filtered), vec![2, 3]);
    }

    #[test]
    fn test_inverted_range_keeps_nothing() {
        let cloud = sample_points();
        let filtered = filter_points(&cloud, &FilterParameters {
            min_size: 1.0,
            max_size: 0.2,
            ..Default::default()
        });
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_filter_is_subset_and_idempotent() {
        let cloud = sample_points();
        let params = FilterParameters {
            min_size: 0.3,
            max_size: 0.6,
            min_color: 0.0,
            max_color: 60.0,
            ..Default::default()
        };

        let once = filter_points(&cloud, &params);
        let twice = filter_points(&once, &params);

        assert_eq!(once, twice);
        for point in once.iter() {
            assert!(cloud.points.contains(point));
            assert!(params.accepts(point));
        }
    }
}
