//! Point File Generator
//!
//! Writes a JSON array of random point records that `scripted_session
//! --data` can load. Values follow the control panel's slider grid so every
//! point can be isolated with the size and color filters.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use pointscape_core::{PointId, RawPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "generate_points", about = "Generate random pointscape records")]
struct Args {
    /// Number of points
    #[arg(long, default_value_t = 100)]
    count: usize,

    /// RNG seed, for reproducible files
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Half-width of the cube positions are drawn from
    #[arg(long, default_value_t = 5.0)]
    extent: f32,

    /// Output file; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

fn random_record(rng: &mut StdRng, id: u64, extent: f32) -> RawPoint {
    let is_bar = rng.gen_bool(0.5);
    let size = rng.gen_range(1..=15) as f32 / 10.0;
    let color = (rng.gen_range(0..36) * 10) as f32;

    RawPoint {
        id: Some(PointId(id)),
        position: Some(
            (0..3)
                .map(|_| rng.gen_range(-extent..=extent))
                .collect(),
        ),
        size: Some(size),
        color: Some(color),
        label: Some(format!("Point {id}")),
        kind: Some(if is_bar { "bar" } else { "sphere" }.to_string()),
        height: is_bar.then(|| rng.gen_range(0.5..4.0)),
        decode_error: None,
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = StdRng::seed_from_u64(args.seed);

    let records: Vec<RawPoint> = (1..=args.count as u64)
        .map(|id| random_record(&mut rng, id, args.extent))
        .collect();
    let json = serde_json::to_string_pretty(&records)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(count = records.len(), path = %path.display(), "points written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
