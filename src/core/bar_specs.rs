use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Bar thickness and spacing as configured on a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarSpecs {
    /// Width to depth ratio of a single bar.
    pub thickness_ratio: f32,
    /// Gap between bars along X (columns) and Z (rows).
    pub spacing: Vec2,
    /// Whether `spacing` is a fraction of bar thickness or an absolute distance.
    pub relative_spacing: bool,
}

impl Default for BarSpecs {
    fn default() -> Self {
        Self {
            thickness_ratio: 1.0,
            spacing: Vec2::ONE,
            relative_spacing: true,
        }
    }
}

impl BarSpecs {
    #[must_use]
    pub fn new(thickness_ratio: f32, spacing: Vec2, relative_spacing: bool) -> Self {
        Self {
            thickness_ratio,
            spacing,
            relative_spacing,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.thickness_ratio.is_finite() || self.thickness_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar thickness ratio must be finite and > 0".to_owned(),
            ));
        }
        if !self.spacing.is_finite() || self.spacing.min_element() < 0.0 {
            return Err(ChartError::InvalidData(
                "bar spacing must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Half-extents of one bar and the distance between neighbouring bar centers.
    #[must_use]
    pub fn dimensions(self) -> BarDimensions {
        let thickness = Vec2::new(1.0, 1.0 / self.thickness_ratio);
        let spacing = if self.relative_spacing {
            2.0 * thickness * (self.spacing + Vec2::ONE)
        } else {
            2.0 * thickness + 2.0 * self.spacing
        };
        BarDimensions { thickness, spacing }
    }
}

/// Thickness and spacing derived from [`BarSpecs`], in scene units before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarDimensions {
    pub thickness: Vec2,
    pub spacing: Vec2,
}

impl Default for BarDimensions {
    fn default() -> Self {
        BarSpecs::default().dimensions()
    }
}

/// Fraction of each series slot left empty between bar series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BarSeriesMargin {
    pub margin: Vec2,
    /// Shrink bars along Z as well as X so multi-series bars keep their footprint ratio.
    #[serde(default)]
    pub keep_series_uniform: bool,
}

impl BarSeriesMargin {
    #[must_use]
    pub const fn new(margin: Vec2) -> Self {
        Self {
            margin,
            keep_series_uniform: false,
        }
    }

    #[must_use]
    pub const fn with_keep_series_uniform(mut self, keep: bool) -> Self {
        self.keep_series_uniform = keep;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        let in_range = |value: f32| value.is_finite() && (0.0..1.0).contains(&value);
        if !in_range(self.margin.x) || !in_range(self.margin.y) {
            return Err(ChartError::InvalidData(
                "bar series margin must be finite and in [0, 1)".to_owned(),
            ));
        }
        Ok(())
    }
}
