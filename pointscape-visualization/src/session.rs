//! Interaction state machine
//!
//! A [`Session`] owns the active point set, the filter parameters and the
//! selection. It is the only place those change: the control panel and the
//! host talk to it through [`Session::dispatch`] and
//! [`Session::route_pointer`]. Derived sets (clustered, filtered, projected)
//! are rebuilt from scratch whenever their inputs change.

use itertools::Itertools;
use pointscape_algorithms::{cluster_points, filter_points};
use pointscape_core::{
    validate_points, Background, DataPoint, Error, FilterParameters, Point3f, PointCloud, PointId,
    RawPoint, Rejected, Result, SourceError, Theme,
};

use crate::command::Command;
use crate::config::ViewerConfig;
use crate::controller::CameraIntent;
use crate::host::Lighting;
use crate::primitive::{project_all, HoverSet, PrimitiveStyle, RenderedPrimitive};
use crate::source::DataSource;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing requested yet
    Idle,
    /// Waiting on the data source; also where a failed load stays
    Loading,
    /// Points loaded, commands drive the scene
    Ready,
}

/// The inspected point (by id) and the active theme
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionState {
    pub point: Option<PointId>,
    pub theme: Theme,
}

/// Pointer activity reported by the host, per primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    HoverBegin(PointId),
    HoverEnd(PointId),
    Click(PointId),
}

/// Attributes of the selected point, for the info panel
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub id: PointId,
    pub label: String,
    pub size: f32,
    pub color: f32,
    pub position: Point3f,
}

impl Tooltip {
    fn from_point(point: &DataPoint) -> Self {
        Self {
            id: point.id,
            label: point.label.clone(),
            size: point.size,
            color: point.color,
            position: point.position,
        }
    }

    /// Coordinates as `x, y, z`
    pub fn position_text(&self) -> String {
        self.position.iter().join(", ")
    }

    /// The lines shown in the info panel
    pub fn lines(&self) -> Vec<String> {
        vec![
            self.label.clone(),
            format!("Size: {}", self.size),
            format!("Color: {}", self.color),
            format!("Position: {}", self.position_text()),
        ]
    }
}

/// Everything a host needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub background: Background,
    pub lighting: Lighting,
    pub primitives: Vec<RenderedPrimitive>,
    pub tooltip: Option<Tooltip>,
}

/// A single viewing session
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    params: FilterParameters,
    selection: SelectionState,
    style: PrimitiveStyle,
    lighting: Lighting,
    points: PointCloud<DataPoint>,
    rejected: Vec<Rejected>,
    arranged: PointCloud<DataPoint>,
    visible: PointCloud<DataPoint>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an idle session with default parameters
    pub fn new() -> Self {
        Self::with_config(&ViewerConfig::default())
    }

    /// Create an idle session seeded from `config`
    pub fn with_config(config: &ViewerConfig) -> Self {
        Self {
            state: SessionState::Idle,
            params: config.filter,
            selection: SelectionState {
                point: None,
                theme: config.theme,
            },
            style: config.style,
            lighting: Lighting::default(),
            points: PointCloud::new(),
            rejected: Vec::new(),
            arranged: PointCloud::new(),
            visible: PointCloud::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn params(&self) -> &FilterParameters {
        &self.params
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The validated point set, in delivery order
    pub fn points(&self) -> &PointCloud<DataPoint> {
        &self.points
    }

    /// Records dropped during the last load
    pub fn rejected(&self) -> &[Rejected] {
        &self.rejected
    }

    /// Points after the cluster transform (or unchanged when disabled)
    pub fn arranged(&self) -> &PointCloud<DataPoint> {
        &self.arranged
    }

    /// Points after clustering and filtering
    pub fn visible(&self) -> &PointCloud<DataPoint> {
        &self.visible
    }

    pub fn background(&self) -> Background {
        self.selection.theme.background()
    }

    /// Move from `Idle` to `Loading`
    ///
    /// Only one request is ever outstanding: a session that is already
    /// loading, or has loaded, refuses.
    pub fn begin_loading(&mut self) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(Error::InvalidState(format!(
                "cannot start loading from {:?}",
                self.state
            )));
        }
        self.state = SessionState::Loading;
        tracing::info!("loading initial points");
        Ok(())
    }

    /// Consume the data source's answer
    ///
    /// On success, validates the records, stores the survivors and becomes
    /// `Ready`; returns the number of accepted points. On failure the session
    /// stays `Loading` and the failure is handed back.
    pub fn finish_loading(
        &mut self,
        result: std::result::Result<Vec<RawPoint>, SourceError>,
    ) -> Result<usize> {
        if self.state != SessionState::Loading {
            return Err(Error::InvalidState(format!(
                "no load in progress ({:?})",
                self.state
            )));
        }

        let raws = match result {
            Ok(raws) => raws,
            Err(e) => {
                tracing::error!("data source failed, scene stays empty: {}", e);
                return Err(e.into());
            }
        };

        let validated = validate_points(&raws);
        self.points = validated.points;
        self.rejected = validated.rejected;
        self.state = SessionState::Ready;
        self.recompute();

        tracing::info!(
            accepted = self.points.len(),
            rejected = self.rejected.len(),
            "initial points loaded"
        );
        Ok(self.points.len())
    }

    /// Fetch from `source` and finish loading with its answer
    pub async fn load<S: DataSource>(&mut self, source: &S) -> Result<usize> {
        self.begin_loading()?;
        let result = source.fetch_initial_points().await;
        self.finish_loading(result)
    }

    /// Apply one command
    ///
    /// Never fails. Returns the camera intent the command produced, if any:
    /// `SelectPoint` of a known id yields `FocusCamera` at the point's
    /// post-cluster position, `ResetCamera` yields `ResetView`.
    pub fn dispatch(&mut self, command: Command) -> Option<CameraIntent> {
        tracing::debug!(%command, state = ?self.state, "dispatch");

        match command {
            Command::SetCategoryFilter(category) => {
                self.params.category = category;
                self.recompute();
                None
            }
            Command::SetMinSize(v) => {
                self.params.min_size = v;
                self.recompute();
                None
            }
            Command::SetMaxSize(v) => {
                self.params.max_size = v;
                self.recompute();
                None
            }
            Command::SetMinColor(v) => {
                self.params.min_color = v;
                self.recompute();
                None
            }
            Command::SetMaxColor(v) => {
                self.params.max_color = v;
                self.recompute();
                None
            }
            Command::ToggleClustering => {
                self.params.clustering_enabled = !self.params.clustering_enabled;
                self.recompute();
                None
            }
            Command::SelectPoint(id) => {
                let Some(point) = self.arranged.get(id) else {
                    tracing::debug!(%id, "select ignored, no such point");
                    return None;
                };
                let position = point.position;
                self.selection.point = Some(id);
                Some(CameraIntent::FocusCamera(position))
            }
            Command::SetTheme(theme) => {
                self.selection.theme = theme;
                None
            }
            Command::ResetCamera => Some(CameraIntent::ResetView),
        }
    }

    /// Route a pointer event from the host
    ///
    /// Clicks select; hover is tracked by the host's [`HoverSet`], not here.
    pub fn route_pointer(&mut self, event: PointerEvent) -> Option<CameraIntent> {
        match event {
            PointerEvent::Click(id) => self.dispatch(Command::SelectPoint(id)),
            PointerEvent::HoverBegin(_) | PointerEvent::HoverEnd(_) => None,
        }
    }

    /// The selected point's attributes at its current position
    pub fn tooltip(&self) -> Option<Tooltip> {
        let id = self.selection.point?;
        self.arranged.get(id).map(Tooltip::from_point)
    }

    /// Project the visible set for one frame
    pub fn frame(&self, hover: &HoverSet) -> SceneFrame {
        SceneFrame {
            background: self.background(),
            lighting: self.lighting,
            primitives: project_all(&self.visible, hover, &self.style),
            tooltip: self.tooltip(),
        }
    }

    fn recompute(&mut self) {
        self.arranged = if self.params.clustering_enabled {
            cluster_points(&self.points)
        } else {
            self.points.clone()
        };
        self.visible = filter_points(&self.arranged, &self.params);
    }
}
