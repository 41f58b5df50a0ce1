//! Scene host capability surface
//!
//! The renderer that draws primitives and owns the camera lives outside this
//! crate. [`SceneHost`] is everything the core needs from it.

use pointscape_core::{Background, Point3f};
use serde::{Deserialize, Serialize};

use crate::camera::{CameraControls, CameraGesture, OrbitCamera};
use crate::session::SceneFrame;

/// Renderer/scene host consumed by the core
pub trait SceneHost {
    /// The active camera, or `None` while the scene is not mounted
    fn camera(&mut self) -> Option<&mut dyn CameraControls>;

    /// Fill the background slot
    fn set_background(&mut self, background: Background);

    /// Draw a recomputed frame
    fn present(&mut self, frame: &SceneFrame);
}

/// Fixed scene lighting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient_intensity: f32,
    pub directional_position: Point3f,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            directional_position: Point3f::new(5.0, 5.0, 5.0),
        }
    }
}

/// Number of recent frames a [`HeadlessHost`] keeps
pub const FRAME_HISTORY: usize = 16;

/// A host with no window that keeps what it was asked to draw
///
/// Used by the demos and tests in place of a real renderer. Only the last
/// [`FRAME_HISTORY`] frames are kept.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    camera: Option<OrbitCamera>,
    background: Option<Background>,
    frames: Vec<SceneFrame>,
    presented: usize,
}

impl HeadlessHost {
    /// A host whose scene is not mounted yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(camera: OrbitCamera) -> Self {
        Self {
            camera: Some(camera),
            ..Self::default()
        }
    }

    /// Mount a camera after construction
    pub fn mount(&mut self, camera: OrbitCamera) {
        self.camera = Some(camera);
    }

    pub fn orbit_camera(&self) -> Option<&OrbitCamera> {
        self.camera.as_ref()
    }

    /// Feed a user gesture to the mounted camera; `false` if none is mounted
    pub fn gesture(&mut self, gesture: CameraGesture) -> bool {
        match self.camera.as_mut() {
            Some(camera) => {
                camera.apply_gesture(gesture);
                true
            }
            None => {
                tracing::debug!(?gesture, "camera gesture without a mounted scene");
                false
            }
        }
    }

    pub fn background(&self) -> Option<Background> {
        self.background
    }

    /// The most recent frames, oldest first
    pub fn frames(&self) -> &[SceneFrame] {
        &self.frames
    }

    /// Frames presented since construction, including discarded ones
    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn last_frame(&self) -> Option<&SceneFrame> {
        self.frames.last()
    }
}

impl SceneHost for HeadlessHost {
    fn camera(&mut self) -> Option<&mut dyn CameraControls> {
        self.camera.as_mut().map(|c| c as &mut dyn CameraControls)
    }

    fn set_background(&mut self, background: Background) {
        self.background = Some(background);
    }

    fn present(&mut self, frame: &SceneFrame) {
        tracing::trace!(primitives = frame.primitives.len(), "frame presented");
        if self.frames.len() == FRAME_HISTORY {
            self.frames.remove(0);
        }
        self.frames.push(frame.clone());
        self.presented += 1;
    }
}
