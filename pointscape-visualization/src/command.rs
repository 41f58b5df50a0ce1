//! Commands issued by the control panel

use std::fmt;
use std::str::FromStr;

use pointscape_core::{Category, PointId, Theme};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the control panel (and pointer clicks) can ask of a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `None` shows every category
    SetCategoryFilter(Option<Category>),
    SetMinSize(f32),
    SetMaxSize(f32),
    SetMinColor(f32),
    SetMaxColor(f32),
    ToggleClustering,
    SelectPoint(PointId),
    SetTheme(Theme),
    ResetCamera,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot parse command `{input}`: {reason}")]
pub struct ParseCommandError {
    pub input: String,
    pub reason: String,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Parse the text form, e.g. `category=bar`, `min-size=0.5`, `cluster`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let fail = |reason: String| ParseCommandError {
            input: input.to_string(),
            reason,
        };
        let number = |value: Option<&str>| -> Result<f32, ParseCommandError> {
            let value = value.ok_or_else(|| fail("expected a value".to_string()))?;
            value
                .trim()
                .parse::<f32>()
                .map_err(|e| fail(format!("`{value}`: {e}")))
        };

        let (key, value) = match input.split_once('=') {
            Some((key, value)) => (key.trim(), Some(value.trim())),
            None => (input, None),
        };

        match key.to_ascii_lowercase().as_str() {
            "category" | "filter" => {
                let value = value.ok_or_else(|| fail("expected sphere, bar or all".to_string()))?;
                match value.to_ascii_lowercase().as_str() {
                    "all" | "none" => Ok(Command::SetCategoryFilter(None)),
                    other => other
                        .parse::<Category>()
                        .map(|c| Command::SetCategoryFilter(Some(c)))
                        .map_err(fail),
                }
            }
            "min-size" => number(value).map(Command::SetMinSize),
            "max-size" => number(value).map(Command::SetMaxSize),
            "min-color" => number(value).map(Command::SetMinColor),
            "max-color" => number(value).map(Command::SetMaxColor),
            "cluster" | "toggle-clustering" => Ok(Command::ToggleClustering),
            "select" => {
                let value = value.ok_or_else(|| fail("expected a point id".to_string()))?;
                value
                    .parse::<u64>()
                    .map(|id| Command::SelectPoint(PointId(id)))
                    .map_err(|e| fail(format!("`{value}`: {e}")))
            }
            "theme" => {
                let value = value.ok_or_else(|| fail("expected a theme name".to_string()))?;
                value.parse::<Theme>().map(Command::SetTheme).map_err(fail)
            }
            "reset" | "reset-camera" => Ok(Command::ResetCamera),
            other => Err(fail(format!("unknown command `{other}`"))),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetCategoryFilter(None) => write!(f, "category=all"),
            Command::SetCategoryFilter(Some(c)) => write!(f, "category={c}"),
            Command::SetMinSize(v) => write!(f, "min-size={v}"),
            Command::SetMaxSize(v) => write!(f, "max-size={v}"),
            Command::SetMinColor(v) => write!(f, "min-color={v}"),
            Command::SetMaxColor(v) => write!(f, "max-color={v}"),
            Command::ToggleClustering => write!(f, "cluster"),
            Command::SelectPoint(id) => write!(f, "select={id}"),
            Command::SetTheme(theme) => write!(f, "theme={theme}"),
            Command::ResetCamera => write!(f, "reset"),
        }
    }
}

/// Range of one control-panel slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl SliderRange {
    /// Snap `value` to the slider's step grid and bound it to `[min, max]`
    pub fn clamp(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.min;
        }
        // grid points must round to their nearest f32 (6 * 0.1 -> 0.6)
        let (min, step) = (self.min as f64, self.step as f64);
        let steps = ((value as f64 - min) / step).round();
        ((min + steps * step) as f32).clamp(self.min, self.max)
    }
}

/// Slider ranges of the control panel
///
/// The panel clamps values before they become commands; sessions trust
/// that and never re-clamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlRanges {
    pub size: SliderRange,
    pub color: SliderRange,
}

impl Default for ControlRanges {
    fn default() -> Self {
        Self {
            size: SliderRange {
                min: 0.1,
                max: 1.5,
                step: 0.1,
            },
            color: SliderRange {
                min: 0.0,
                max: 360.0,
                step: 10.0,
            },
        }
    }
}

impl ControlRanges {
    /// Clamp the value carried by a slider command; other commands pass through
    pub fn clamp_command(&self, command: Command) -> Command {
        match command {
            Command::SetMinSize(v) => Command::SetMinSize(self.size.clamp(v)),
            Command::SetMaxSize(v) => Command::SetMaxSize(self.size.clamp(v)),
            Command::SetMinColor(v) => Command::SetMinColor(self.color.clamp(v)),
            Command::SetMaxColor(v) => Command::SetMaxColor(self.color.clamp(v)),
            other => other,
        }
    }
}
