//! Configuration types for diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so configuration can be
//! loaded from external sources (the CLI reads a TOML file). Every field
//! has a default, so an empty configuration is valid.

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Visual styling options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Stroke color for outlines and connection lines.
    stroke_color: String,

    /// Fill color for shape interiors.
    fill_color: String,

    /// Optional document background color; transparent when unset.
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the stroke color.
    pub fn stroke_color(&self) -> &str {
        &self.stroke_color
    }

    /// Returns the fill color.
    pub fn fill_color(&self) -> &str {
        &self.fill_color
    }

    /// Returns the background color, if configured.
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            stroke_color: "black".to_string(),
            fill_color: "white".to_string(),
            background_color: None,
        }
    }
}
