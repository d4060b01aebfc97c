use serde::{Deserialize, Serialize};

use crate::core::plot::{GRID_TARGET_SPACING_PX, POINT_RADIUS_PX};
use crate::core::polar::DEFAULT_RING_COUNT;
use crate::core::viewport::DEFAULT_ZOOM_FACTOR;
use crate::core::{PlotMode, Viewport};
use crate::error::{DiagramError, DiagramResult};

/// Canvas size used by the command-line export.
pub const EXPORT_VIEWPORT: Viewport = Viewport {
    width: 1500,
    height: 1000,
};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load diagram
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramEngineConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default)]
    pub plot_mode: PlotMode,
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f64,
    #[serde(default = "default_grid_spacing_px")]
    pub grid_spacing_px: f64,
    #[serde(default = "default_marker_radius_px")]
    pub marker_radius_px: f64,
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_thin_font_size_px")]
    pub thin_font_size_px: f64,
    #[serde(default = "default_polar_ring_count")]
    pub polar_ring_count: usize,
}

impl Default for DiagramEngineConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl DiagramEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            plot_mode: PlotMode::default(),
            zoom_factor: default_zoom_factor(),
            grid_spacing_px: default_grid_spacing_px(),
            marker_radius_px: default_marker_radius_px(),
            font_size_px: default_font_size_px(),
            thin_font_size_px: default_thin_font_size_px(),
            polar_ring_count: default_polar_ring_count(),
        }
    }

    #[must_use]
    pub fn with_plot_mode(mut self, mode: PlotMode) -> Self {
        self.plot_mode = mode;
        self
    }

    /// Sets the per-step zoom factor; must lie in `(0, 1)`.
    #[must_use]
    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self
    }

    #[must_use]
    pub fn with_grid_spacing_px(mut self, spacing: f64) -> Self {
        self.grid_spacing_px = spacing;
        self
    }

    #[must_use]
    pub fn with_marker_radius_px(mut self, radius: f64) -> Self {
        self.marker_radius_px = radius;
        self
    }

    #[must_use]
    pub fn with_font_sizes(mut self, font_size_px: f64, thin_font_size_px: f64) -> Self {
        self.font_size_px = font_size_px;
        self.thin_font_size_px = thin_font_size_px;
        self
    }

    #[must_use]
    pub fn with_polar_ring_count(mut self, ring_count: usize) -> Self {
        self.polar_ring_count = ring_count;
        self
    }

    pub fn validate(&self) -> DiagramResult<()> {
        if !self.viewport.is_valid() {
            return Err(DiagramError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 0.0 || self.zoom_factor >= 1.0 {
            return Err(DiagramError::InvalidData(
                "zoom factor must be finite and in (0, 1)".to_owned(),
            ));
        }
        for (name, value) in [
            ("grid spacing", self.grid_spacing_px),
            ("marker radius", self.marker_radius_px),
            ("font size", self.font_size_px),
            ("thin font size", self.thin_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(DiagramError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.polar_ring_count == 0 {
            return Err(DiagramError::InvalidData(
                "polar ring count must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> DiagramResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| DiagramError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON and validates it.
    pub fn from_json_str(input: &str) -> DiagramResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DiagramError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_viewport() -> Viewport {
    EXPORT_VIEWPORT
}

fn default_zoom_factor() -> f64 {
    DEFAULT_ZOOM_FACTOR
}

fn default_grid_spacing_px() -> f64 {
    GRID_TARGET_SPACING_PX
}

fn default_marker_radius_px() -> f64 {
    POINT_RADIUS_PX
}

fn default_font_size_px() -> f64 {
    15.0
}

fn default_thin_font_size_px() -> f64 {
    12.0
}

fn default_polar_ring_count() -> usize {
    DEFAULT_RING_COUNT
}
