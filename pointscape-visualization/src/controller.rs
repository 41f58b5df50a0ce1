//! Camera controller adapter
//!
//! Translates the session's one-shot camera intents into calls on the host's
//! camera capability.

use pointscape_core::Point3f;

use crate::host::SceneHost;

/// One-shot camera request emitted by the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraIntent {
    /// Return the camera to its initial pose
    ResetView,
    /// Orbit around the given position
    FocusCamera(Point3f),
}

/// Apply `intent` to the host's camera
///
/// Fire-and-forget. A host without a mounted camera ignores the intent.
pub fn apply_intent<H: SceneHost + ?Sized>(host: &mut H, intent: CameraIntent) {
    let Some(camera) = host.camera() else {
        tracing::debug!(?intent, "no camera mounted, dropping intent");
        return;
    };

    match intent {
        CameraIntent::ResetView => camera.reset(),
        CameraIntent::FocusCamera(position) => {
            camera.set_target(position);
            camera.update();
        }
    }
    tracing::debug!(?intent, "camera intent applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraPose, OrbitCamera};
    use crate::host::HeadlessHost;
    use approx::assert_relative_eq;

    #[test]
    fn test_focus_moves_target() {
        let mut host = HeadlessHost::with_camera(OrbitCamera::default());
        apply_intent(&mut host, CameraIntent::FocusCamera(Point3f::new(-3.0, 1.0, -1.0)));

        let camera = host.orbit_camera().unwrap();
        assert_relative_eq!(camera.target, Point3f::new(-3.0, 1.0, -1.0));
    }

    #[test]
    fn test_reset_returns_home() {
        let mut host = HeadlessHost::with_camera(OrbitCamera::default());
        apply_intent(&mut host, CameraIntent::FocusCamera(Point3f::new(1.0, 2.0, 3.0)));
        apply_intent(&mut host, CameraIntent::ResetView);

        let camera = host.orbit_camera().unwrap();
        assert_relative_eq!(camera.target, CameraPose::default().target);
    }

    #[test]
    fn test_without_camera_is_noop() {
        let mut host = HeadlessHost::new();
        apply_intent(&mut host, CameraIntent::ResetView);
        apply_intent(&mut host, CameraIntent::FocusCamera(Point3f::origin()));
        assert!(host.orbit_camera().is_none());
    }
}
