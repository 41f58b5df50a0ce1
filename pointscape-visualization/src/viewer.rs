//! Viewer: wires a session to a scene host

use pointscape_core::Result;

use crate::command::{Command, ControlRanges};
use crate::config::ViewerConfig;
use crate::controller::apply_intent;
use crate::host::SceneHost;
use crate::primitive::HoverSet;
use crate::session::{PointerEvent, Session};
use crate::source::DataSource;

/// Drives one session against one host
///
/// Commands and pointer events are handled in arrival order, each to
/// completion: the session updates, any camera intent goes to the host, and
/// a fresh frame is presented.
pub struct Viewer<H: SceneHost> {
    session: Session,
    host: H,
    hover: HoverSet,
    controls: ControlRanges,
}

impl<H: SceneHost> Viewer<H> {
    /// Create a viewer with default configuration
    pub fn new(host: H) -> Self {
        Self::with_config(host, &ViewerConfig::default())
    }

    pub fn with_config(host: H, config: &ViewerConfig) -> Self {
        Self {
            session: Session::with_config(config),
            host,
            hover: HoverSet::new(),
            controls: config.controls,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn hover(&self) -> &HoverSet {
        &self.hover
    }

    /// Load the initial points and draw the first frame
    ///
    /// If the source fails the scene stays empty and the session keeps
    /// waiting; the error is returned for the caller to report.
    pub async fn load<S: DataSource>(&mut self, source: &S) -> Result<usize> {
        let result = self.session.load(source).await;
        self.redraw();
        result
    }

    /// Handle a control-panel command
    ///
    /// Slider values are snapped to the panel's ranges first. Points the
    /// command hides lose their hover.
    pub fn command(&mut self, command: Command) {
        let command = self.controls.clamp_command(command);
        if let Some(intent) = self.session.dispatch(command) {
            apply_intent(&mut self.host, intent);
        }
        self.hover.retain_visible(self.session.visible());
        self.redraw();
    }

    /// Handle pointer activity reported by the host
    pub fn pointer(&mut self, event: PointerEvent) {
        self.hover.apply(&event);
        if let Some(intent) = self.session.route_pointer(event) {
            apply_intent(&mut self.host, intent);
        }
        self.redraw();
    }

    /// Recompute the projection and present it
    pub fn redraw(&mut self) {
        let frame = self.session.frame(&self.hover);
        self.host.set_background(frame.background);
        self.host.present(&frame);
    }

    /// Tear down, handing back the host
    pub fn into_host(self) -> H {
        self.host
    }
}
