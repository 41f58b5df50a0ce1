//! Scene themes and their backgrounds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;
use crate::point::Point3f;

/// Named background scheme, independent of the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Space,
    Nature,
}

/// What the host paints behind the primitives
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Background {
    /// Procedural sky lit by a sun at the given position
    Sky { sun_position: Point3f },
    Solid(Rgb),
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Default, Theme::Dark, Theme::Space, Theme::Nature];

    pub fn background(&self) -> Background {
        match self {
            Theme::Default => Background::Sky {
                sun_position: Point3f::new(100.0, 20.0, 100.0),
            },
            Theme::Dark => Background::Solid(Rgb::BLACK),
            Theme::Space => Background::Solid(Rgb::from_u8(0x00, 0x00, 0x44)),
            Theme::Nature => Background::Solid(Rgb::from_u8(0x88, 0xcc, 0x88)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
            Theme::Space => "space",
            Theme::Nature => "nature",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == name)
            .ok_or_else(|| format!("unknown theme `{name}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backgrounds() {
        assert!(matches!(Theme::Default.background(), Background::Sky { .. }));
        assert_eq!(Theme::Dark.background(), Background::Solid(Rgb::BLACK));

        let Background::Solid(space) = Theme::Space.background() else {
            panic!("space theme should be a solid color");
        };
        assert_eq!(space.to_hex(), "#000044");

        let Background::Solid(nature) = Theme::Nature.background() else {
            panic!("nature theme should be a solid color");
        };
        assert_eq!(nature.to_hex(), "#88cc88");
    }

    #[test]
    fn test_parse() {
        assert_eq!("Space".parse::<Theme>(), Ok(Theme::Space));
        assert!("neon".parse::<Theme>().is_err());
        assert_eq!(Theme::default(), Theme::Default);
    }
}
