//! Encoding-level enumerations shared across the engine.

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Horizontal alignment declared on a styled text run (`@halign`).
///
/// A run without the attribute has no alignment; callers represent that as
/// `Option::<HorizontalAlignment>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    Justify,
}

impl fmt::Display for HorizontalAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        };
        f.write_str(name)
    }
}

impl FromStr for HorizontalAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            "justify" => Ok(Self::Justify),
            other => Err(format!("Invalid horizontal alignment: {other}")),
        }
    }
}

/// Document-wide rendering mode.
///
/// In [`RenderMode::Facsimile`], elements that reference a facsimile zone are
/// drawn at the zone's coordinates instead of their computed layout position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Positions come from the engine's layout passes.
    #[default]
    Layout,
    /// Positions come from facsimile zones when an element has one.
    Facsimile,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout => f.write_str("layout"),
            Self::Facsimile => f.write_str("facsimile"),
        }
    }
}
