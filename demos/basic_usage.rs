//! Basic usage example for pointscape
//!
//! This example runs the pipeline by hand, without a session:
//! - Validating raw records
//! - Clustering and filtering
//! - Projecting to primitives

use pointscape_algorithms::{cluster_points, filter_points};
use pointscape_core::{validate_points, Category, Drawable, FilterParameters};
use pointscape_visualization::{project_all, sample_records, HoverSet, PrimitiveStyle};

fn main() -> anyhow::Result<()> {
    println!("pointscape Basic Usage");
    println!("======================");

    let validated = validate_points(&sample_records());
    let cloud = validated.points;
    println!("Validated {} points ({} rejected)", cloud.len(), validated.rejected.len());

    let (min, max) = cloud.bounding_box();
    println!("Bounds: {:?} .. {:?}", min.coords.as_slice(), max.coords.as_slice());
    println!("Center: {:?}", cloud.center().coords.as_slice());

    let params = FilterParameters {
        category: Some(Category::Bar),
        ..Default::default()
    };

    println!("\nBars only:");
    for point in filter_points(&cloud, &params).iter() {
        println!("- {} at x = {}", point.label, point.position.x);
    }

    println!("\nBars only, clustered:");
    let clustered = cluster_points(&cloud);
    for point in filter_points(&clustered, &params).iter() {
        println!("- {} at x = {}", point.label, point.position.x);
    }

    println!("\nPrimitives:");
    let primitives = project_all(&cloud, &HoverSet::new(), &PrimitiveStyle::default());
    for primitive in &primitives {
        println!(
            "- #{} {:?} dims={:?} color={}",
            primitive.id,
            primitive.geometry_kind,
            primitive.dimensions.as_slice(),
            primitive.color_value.to_hex()
        );
    }

    println!("\nExample completed successfully!");
    Ok(())
}
