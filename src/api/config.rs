use serde::{Deserialize, Serialize};

use crate::core::{
    BarSeriesMargin, BarSpecs, CameraRotation, ChartKind, FontSpec, Rect, SelectionMode, Theme,
};
use crate::error::{ChartError, ChartResult};
use crate::render::ShadowQuality;

/// Zoom level bounds in percent.
pub const MIN_ZOOM_LEVEL: f32 = 10.0;
pub const MAX_ZOOM_LEVEL: f32 = 500.0;

/// Serializable chart setup, also the controller's live property state.
///
/// Hosts can persist and restore a chart without inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    #[serde(default)]
    pub bounding_rect: Rect,
    #[serde(default = "default_zoom_level")]
    pub zoom_level: f32,
    #[serde(default)]
    pub camera: CameraRotation,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub font: FontSpec,
    #[serde(default)]
    pub shadow_quality: ShadowQuality,
    #[serde(default)]
    pub selection_mode: SelectionMode,
    #[serde(default = "default_true")]
    pub grid_enabled: bool,
    #[serde(default = "default_true")]
    pub background_enabled: bool,
    /// Background margin around the plot; negative means none.
    #[serde(default = "default_margin")]
    pub margin: f32,
    #[serde(default)]
    pub bar_specs: BarSpecs,
    #[serde(default)]
    pub floor_level: f32,
    #[serde(default)]
    pub bar_series_margin: BarSeriesMargin,
}

impl ChartConfig {
    #[must_use]
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            bounding_rect: Rect::default(),
            zoom_level: default_zoom_level(),
            camera: CameraRotation::default(),
            theme: Theme::default(),
            font: FontSpec::default(),
            shadow_quality: ShadowQuality::default(),
            selection_mode: SelectionMode::default(),
            grid_enabled: true,
            background_enabled: true,
            margin: default_margin(),
            bar_specs: BarSpecs::default(),
            floor_level: 0.0,
            bar_series_margin: BarSeriesMargin::default(),
        }
    }

    #[must_use]
    pub fn bars() -> Self {
        Self::new(ChartKind::Bars)
    }

    #[must_use]
    pub fn scatter() -> Self {
        Self::new(ChartKind::Scatter)
    }

    #[must_use]
    pub fn surface() -> Self {
        Self::new(ChartKind::Surface)
    }

    #[must_use]
    pub fn with_bounding_rect(mut self, rect: Rect) -> Self {
        self.bounding_rect = rect;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_shadow_quality(mut self, quality: ShadowQuality) -> Self {
        self.shadow_quality = quality;
        self
    }

    #[must_use]
    pub fn with_bar_specs(mut self, specs: BarSpecs) -> Self {
        self.bar_specs = specs;
        self
    }

    #[must_use]
    pub fn with_floor_level(mut self, level: f32) -> Self {
        self.floor_level = level;
        self
    }

    #[must_use]
    pub fn with_bar_series_margin(mut self, margin: BarSeriesMargin) -> Self {
        self.bar_series_margin = margin;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.bounding_rect.validate()?;
        self.theme.validate()?;
        self.bar_specs.validate()?;
        self.bar_series_margin.validate()?;
        if !self.zoom_level.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom level must be finite".to_owned(),
            ));
        }
        if !self.floor_level.is_finite() {
            return Err(ChartError::InvalidData(
                "floor level must be finite".to_owned(),
            ));
        }
        if !self.margin.is_finite() {
            return Err(ChartError::InvalidData("margin must be finite".to_owned()));
        }
        self.font.validate()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::bars()
    }
}

fn default_zoom_level() -> f32 {
    100.0
}

fn default_margin() -> f32 {
    -1.0
}

fn default_true() -> bool {
    true
}
