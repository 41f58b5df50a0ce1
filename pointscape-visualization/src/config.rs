//! Viewer configuration

use std::path::Path;
use std::time::Duration;

use pointscape_core::{Error, FilterParameters, Result, Theme};
use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;
use crate::command::ControlRanges;
use crate::primitive::PrimitiveStyle;
use crate::source::DEFAULT_MOCK_DELAY;

/// Startup configuration of a viewer
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Filter parameters at session start
    pub filter: FilterParameters,
    pub theme: Theme,
    pub controls: ControlRanges,
    pub style: PrimitiveStyle,
    pub camera: CameraPose,
    pub aspect_ratio: f32,
    /// Latency of the built-in mock source, in milliseconds
    pub mock_delay_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            filter: FilterParameters::default(),
            theme: Theme::Default,
            controls: ControlRanges::default(),
            style: PrimitiveStyle::default(),
            camera: CameraPose::default(),
            aspect_ratio: 16.0 / 9.0,
            mock_delay_ms: DEFAULT_MOCK_DELAY.as_millis() as u64,
        }
    }
}

impl ViewerConfig {
    /// Parse a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidData(format!("viewer config: {e}")))
    }

    /// Read a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointscape_core::{Category, Point3f};

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.filter, FilterParameters::default());
        assert_eq!(config.theme, Theme::Default);
        assert_eq!(config.mock_delay(), Duration::from_millis(1000));
        assert_eq!(config.style.hover_scale, 1.5);
    }

    #[test]
    fn test_partial_json() {
        let config = ViewerConfig::from_json_str(
            r#"{
                "theme": "nature",
                "filter": { "category": "bar", "max_color": 200 },
                "camera": { "position": [5, 5, 5], "target": [0, 0, 0] },
                "mock_delay_ms": 0
            }"#,
        )
        .unwrap();

        assert_eq!(config.theme, Theme::Nature);
        assert_eq!(config.filter.category, Some(Category::Bar));
        assert_eq!(config.filter.max_color, 200.0);
        assert_eq!(config.filter.min_size, 0.1);
        assert_eq!(config.camera.position, Point3f::new(5.0, 5.0, 5.0));
        assert!(config.mock_delay().is_zero());
        assert_eq!(config.controls, ControlRanges::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{"theme": "neon"}"#),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ViewerConfig::from_json_file("/nonexistent/pointscape.json"),
            Err(Error::Io(_))
        ));
    }
}
