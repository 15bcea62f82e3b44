//! Configuration types for Cadenza layout.
//!
//! All types implement [`serde::Deserialize`] and are usually loaded from a
//! TOML file with [`load_config`]. Every section and field is optional.
//!
//! ```toml
//! [layout]
//! render_mode = "facsimile"
//! overflow_tolerance = 2.5
//! ```
//!
//! # Example
//!
//! ```
//! # use cadenza::config::AppConfig;
//! # use cadenza::data::RenderMode;
//! let config = AppConfig::from_toml_str("[layout]\nrender_mode = \"facsimile\"").unwrap();
//! assert_eq!(config.layout().render_mode(), RenderMode::Facsimile);
//! assert_eq!(config.layout().overflow_tolerance(), 0.0);
//! ```

use std::{fs, path::Path};

use log::info;
use serde::Deserialize;

use cadenza_core::data::RenderMode;

use crate::error::CadenzaError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Parse a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CadenzaError::Config`] if the text is not valid TOML, does not
    /// match the configuration layout, or holds an invalid value.
    pub fn from_toml_str(content: &str) -> Result<Self, CadenzaError> {
        let config: Self = toml::from_str(content)
            .map_err(|err| CadenzaError::Config(format!("Failed to parse TOML: {err}")))?;
        config.layout.validate()?;
        Ok(config)
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Settings of the layout passes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutConfig {
    /// Where drawing positions come from.
    #[serde(default)]
    render_mode: RenderMode,

    /// Slack past the system width before content counts as overflowing.
    #[serde(default)]
    overflow_tolerance: f32,
}

impl LayoutConfig {
    pub fn new(render_mode: RenderMode, overflow_tolerance: f32) -> Self {
        Self {
            render_mode,
            overflow_tolerance,
        }
    }

    /// Render mode applied to new documents.
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Overflow tolerance in layout units.
    pub fn overflow_tolerance(&self) -> f32 {
        self.overflow_tolerance
    }

    fn validate(&self) -> Result<(), CadenzaError> {
        if !self.overflow_tolerance.is_finite() || self.overflow_tolerance < 0.0 {
            return Err(CadenzaError::Config(format!(
                "overflow_tolerance must be a non-negative number, got {}",
                self.overflow_tolerance
            )));
        }
        Ok(())
    }
}

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns [`CadenzaError::Config`] if the file does not exist or its content
/// is invalid, and [`CadenzaError::Io`] if it cannot be read.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, CadenzaError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading configuration");

    if !path.exists() {
        return Err(CadenzaError::Config(format!(
            "Missing configuration file: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    AppConfig::from_toml_str(&content)
}
