//! Configuration types for the Arguendo workspace.
//!
//! This module provides configuration structures controlling viewport
//! behavior, visual styling, and the grid layout. All types implement
//! [`serde::Deserialize`] for flexible loading from external sources.
//!
//! # Example
//!
//! ```
//! # use arguendo::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use arguendo_core::{
    color::Color,
    viewport::{DEFAULT_ZOOM_INTENSITY, ScaleLimits},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Viewport configuration section.
    #[serde(default)]
    viewport: ViewportConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Grid layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(viewport: ViewportConfig, style: StyleConfig, layout: LayoutConfig) -> Self {
        Self {
            viewport,
            style,
            layout,
        }
    }

    /// Returns the viewport configuration.
    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

/// Viewport behavior: zoom step size and the optional scale clamp policy.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    /// Multiplier applied per wheel step.
    #[serde(default = "default_zoom_intensity")]
    zoom_intensity: f32,

    /// Optional scale bounds; a zoom step that would leave the range is
    /// skipped entirely. `None` leaves the scale unbounded.
    #[serde(default)]
    scale_limits: Option<ScaleLimits>,
}

fn default_zoom_intensity() -> f32 {
    DEFAULT_ZOOM_INTENSITY
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            zoom_intensity: DEFAULT_ZOOM_INTENSITY,
            scale_limits: None,
        }
    }
}

impl ViewportConfig {
    /// Returns the zoom step multiplier.
    pub fn zoom_intensity(&self) -> f32 {
        self.zoom_intensity
    }

    /// Returns the scale clamp policy, if configured.
    pub fn scale_limits(&self) -> Option<ScaleLimits> {
        self.scale_limits
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Default background [`Color`] for snapshots, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

/// Grid layout spacing.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_x_spacing")]
    x_spacing: f32,

    #[serde(default = "default_y_spacing")]
    y_spacing: f32,
}

fn default_x_spacing() -> f32 {
    250.0
}

fn default_y_spacing() -> f32 {
    150.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            x_spacing: default_x_spacing(),
            y_spacing: default_y_spacing(),
        }
    }
}

impl LayoutConfig {
    /// Returns the horizontal spacing between grid columns.
    pub fn x_spacing(&self) -> f32 {
        self.x_spacing
    }

    /// Returns the vertical spacing between grid rows.
    pub fn y_spacing(&self) -> f32 {
        self.y_spacing
    }
}
