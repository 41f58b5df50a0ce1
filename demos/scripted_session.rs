//! Scripted Session Example
//!
//! Drives a viewer against a headless host from the command line. Each
//! positional argument is either a control-panel command (`category=bar`,
//! `min-size=0.5`, `cluster`, `select=2`, `theme=space`, `reset`), a
//! pointer event (`hover=3`, `unhover=3`, `click=3`) or a camera gesture
//! handled by the host (`orbit=30,10` in degrees, `pan=1,0`, `zoom=0.5`).
//! The frame presented after each step is printed with screen positions.
//!
//! ```text
//! cargo run --bin scripted_session -- --delay-ms 0 category=bar cluster click=4
//! ```

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use pointscape_core::{Background, PointId};
use pointscape_visualization::{
    CameraGesture, Command, HeadlessHost, JsonFileSource, MockSource, OrbitCamera, PointerEvent,
    SceneFrame, Viewer, ViewerConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scripted_session", about = "Run pointscape commands against a headless scene")]
struct Args {
    /// JSON array of point records; the built-in sample is used when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// JSON viewer configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Latency of the built-in sample source, overriding the config
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Commands, pointer events and camera gestures, applied in order
    steps: Vec<String>,
}

enum Step {
    Command(Command),
    Pointer(PointerEvent),
    Gesture(CameraGesture),
}

fn parse_pair(text: &str, value: &str) -> anyhow::Result<(f32, f32)> {
    let Some((a, b)) = value.split_once(',') else {
        bail!("expected two comma-separated numbers in `{text}`");
    };
    Ok((a.trim().parse()?, b.trim().parse()?))
}

fn parse_step(text: &str) -> anyhow::Result<Step> {
    let pointer = |id: &str| -> anyhow::Result<PointId> {
        Ok(PointId(id.trim().parse().with_context(|| format!("bad point id in `{text}`"))?))
    };

    match text.split_once('=') {
        Some(("hover", id)) => Ok(Step::Pointer(PointerEvent::HoverBegin(pointer(id)?))),
        Some(("unhover", id)) => Ok(Step::Pointer(PointerEvent::HoverEnd(pointer(id)?))),
        Some(("click", id)) => Ok(Step::Pointer(PointerEvent::Click(pointer(id)?))),
        Some(("orbit", value)) => {
            let (yaw, pitch) = parse_pair(text, value)?;
            Ok(Step::Gesture(CameraGesture::Orbit {
                yaw: yaw.to_radians(),
                pitch: pitch.to_radians(),
            }))
        }
        Some(("pan", value)) => {
            let (dx, dy) = parse_pair(text, value)?;
            Ok(Step::Gesture(CameraGesture::Pan { dx, dy }))
        }
        Some(("zoom", value)) => Ok(Step::Gesture(CameraGesture::Zoom(
            value.trim().parse().with_context(|| format!("bad zoom factor in `{text}`"))?,
        ))),
        _ => Ok(Step::Command(text.parse()?)),
    }
}

fn print_frame(frame: &SceneFrame, camera: Option<&OrbitCamera>) {
    match frame.background {
        Background::Sky { sun_position } => println!("  background: sky, sun at {:?}", sun_position.coords.as_slice()),
        Background::Solid(color) => println!("  background: {}", color.to_hex()),
    }

    if frame.primitives.is_empty() {
        println!("  (nothing to draw)");
    }
    for primitive in &frame.primitives {
        let screen = match camera.and_then(|c| c.project_point(&primitive.position)) {
            Some(ndc) => format!("({:.2}, {:.2})", ndc.x, ndc.y),
            None => "off-screen".to_string(),
        };
        println!(
            "  #{:<3} {:<6} at {:?} screen {} dims {:?} color {}{}",
            primitive.id.to_string(),
            primitive.geometry_kind.category().as_str(),
            primitive.position.coords.as_slice(),
            screen,
            primitive.dimensions.as_slice(),
            primitive.color_value.to_hex(),
            if primitive.is_highlighted { " (hover)" } else { "" }
        );
    }

    if let Some(tooltip) = &frame.tooltip {
        println!("  selected: {}", tooltip.lines().join(" | "));
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ViewerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    let steps = args
        .steps
        .iter()
        .map(|text| parse_step(text))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let host = HeadlessHost::with_camera(OrbitCamera::new(config.camera, config.aspect_ratio));
    let mut viewer = Viewer::with_config(host, &config);

    let loaded = match &args.data {
        Some(path) => viewer.load(&JsonFileSource::new(path)).await,
        None => {
            let delay = args.delay_ms.map(Duration::from_millis).unwrap_or(config.mock_delay());
            viewer.load(&MockSource::new().with_delay(delay)).await
        }
    };
    let accepted = match loaded {
        Ok(accepted) => accepted,
        Err(e) => bail!("no data to show: {e}"),
    };

    println!("Loaded {} points", accepted);
    for rejected in viewer.session().rejected() {
        println!("  dropped record #{}: {}", rejected.index, rejected.error);
    }
    if let Some(frame) = viewer.host().last_frame() {
        print_frame(frame, viewer.host().orbit_camera());
    }

    for (text, step) in args.steps.iter().zip(steps) {
        println!("\n> {}", text);
        match step {
            Step::Command(command) => viewer.command(command),
            Step::Pointer(event) => viewer.pointer(event),
            Step::Gesture(gesture) => {
                if !viewer.host_mut().gesture(gesture) {
                    println!("  (no camera mounted)");
                }
            }
        }
        if let Some(frame) = viewer.host().last_frame() {
            print_frame(frame, viewer.host().orbit_camera());
        }
    }

    if let Some(camera) = viewer.host().orbit_camera() {
        println!(
            "\nCamera: eye {:?} looking at {:?}",
            camera.position.coords.as_slice(),
            camera.target.coords.as_slice()
        );
    }

    Ok(())
}
