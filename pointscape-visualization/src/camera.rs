//! Camera utilities for 3D visualization

use nalgebra::{Matrix4, Perspective3, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Camera capability a scene host exposes to the core
///
/// Mirrors orbit-style controls: the target can be moved, and `update`
/// recomputes the view afterwards.
pub trait CameraControls {
    /// Return to the initial pose
    fn reset(&mut self);

    /// Set the orbit target
    fn set_target(&mut self, target: Point3<f32>);

    /// Recompute the view after the target changed
    fn update(&mut self);
}

/// Initial eye and target of a camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
        }
    }
}

/// Direct manipulation handled by the host's own orbit controls
///
/// Gestures move the camera without going through a session; they never
/// change what is drawn, only where it appears on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraGesture {
    /// Radians around `up` and towards the poles
    Orbit { yaw: f32, pitch: f32 },
    /// World units along the view plane
    Pan { dx: f32, dy: f32 },
    /// Distance factor; below 1 moves closer
    Zoom(f32),
}

/// A 3D orbit camera with pan and zoom
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    home: CameraPose,
    view: Matrix4<f32>,
}

impl OrbitCamera {
    /// Create a new camera looking from `pose.position` at `pose.target`
    pub fn new(pose: CameraPose, aspect_ratio: f32) -> Self {
        let up = Vector3::new(0.0, 1.0, 0.0);
        Self {
            position: pose.position,
            target: pose.target,
            up,
            fov: std::f32::consts::FRAC_PI_4,
            aspect_ratio,
            near: 0.1,
            far: 1000.0,
            enable_pan: true,
            enable_zoom: true,
            home: pose,
            view: Matrix4::look_at_rh(&pose.position, &pose.target, &up),
        }
    }

    /// View matrix as of the last `update`/`reset`
    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov, self.near, self.far);
        perspective.into_inner()
    }

    /// Normalized device coordinates of `point`, `None` when it is behind the eye
    pub fn project_point(&self, point: &Point3<f32>) -> Option<Point3<f32>> {
        let clip = self.projection_matrix() * self.view * point.to_homogeneous();
        if clip.w <= 0.0 {
            return None;
        }
        Point3::from_homogeneous(clip)
    }

    /// Distance from the eye to the target
    pub fn distance(&self) -> f32 {
        (self.position - self.target).norm()
    }

    /// Rotate the eye around the target by yaw (about `up`) and pitch
    pub fn orbit(&mut self, yaw: f32, pitch: f32) {
        let offset = self.position - self.target;
        let radius = offset.norm();
        if radius <= f32::EPSILON {
            return;
        }

        let theta = offset.x.atan2(offset.z) + yaw;
        let max_phi = std::f32::consts::PI - 1e-3;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + pitch).clamp(1e-3, max_phi);

        self.position = self.target
            + Vector3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
        self.update();
    }

    /// Move eye and target together in the view plane
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.enable_pan {
            return;
        }
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);
        let delta = right * dx + up * dy;

        self.position += delta;
        self.target += delta;
        self.update();
    }

    /// Scale the eye-to-target distance; factors below 1 move closer
    pub fn zoom(&mut self, factor: f32) {
        if !self.enable_zoom || factor <= 0.0 {
            return;
        }
        let offset = (self.position - self.target) * factor;
        if offset.norm() < self.near {
            return;
        }
        self.position = self.target + offset;
        self.update();
    }

    pub fn apply_gesture(&mut self, gesture: CameraGesture) {
        match gesture {
            CameraGesture::Orbit { yaw, pitch } => self.orbit(yaw, pitch),
            CameraGesture::Pan { dx, dy } => self.pan(dx, dy),
            CameraGesture::Zoom(factor) => self.zoom(factor),
        }
    }
}

impl CameraControls for OrbitCamera {
    fn reset(&mut self) {
        self.position = self.home.position;
        self.target = self.home.target;
        self.update();
    }

    fn set_target(&mut self, target: Point3<f32>) {
        self.target = target;
    }

    fn update(&mut self) {
        self.view = Matrix4::look_at_rh(&self.position, &self.target, &self.up);
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraPose::default(), 16.0 / 9.0)
    }
}
