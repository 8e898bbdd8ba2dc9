use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::axis_helper::MIN_NORMALIZER;
use crate::core::bar_specs::BarDimensions;

/// Scene extent used when there are no rows or columns to fit.
pub const DEFAULT_MAX_SCENE_SIZE: f32 = 40.0;

/// Inputs of the bar scene scaling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingInputs {
    pub row_count: usize,
    pub column_count: usize,
    pub dimensions: BarDimensions,
    pub series_margin: Vec2,
    /// Requested background margin; negative values mean none.
    pub requested_margin: f32,
}

/// Everything the bar layout needs to fit rows and columns into the scene.
///
/// Always computed from scratch by [`SceneScaling::compute`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneScaling {
    pub row_count: usize,
    pub column_count: usize,
    pub max_scene_size: f32,
    pub row_width: f32,
    pub column_depth: f32,
    pub max_dimension: f32,
    pub scale_factor: f32,
    /// Per-bar footprint scale along X and Z.
    pub bar_scale: Vec2,
    /// Whole-graph half extents along X and Z.
    pub graph_scale: Vec2,
    /// Horizontal and vertical background margin.
    pub background_margin: Vec2,
    pub background_scale: Vec3,
}

impl Default for SceneScaling {
    fn default() -> Self {
        Self::compute(ScalingInputs {
            row_count: 0,
            column_count: 0,
            dimensions: BarDimensions::default(),
            series_margin: Vec2::ZERO,
            requested_margin: -1.0,
        })
    }
}

impl SceneScaling {
    #[must_use]
    pub fn compute(inputs: ScalingInputs) -> Self {
        let rows = inputs.row_count as f32;
        let columns = inputs.column_count as f32;
        let spacing = inputs.dimensions.spacing;
        let thickness = inputs.dimensions.thickness;

        let max_scene_size = max_scene_size(inputs.row_count, inputs.column_count);
        let row_width = columns * spacing.x / 2.0;
        let column_depth = rows * spacing.y / 2.0;
        let max_dimension = row_width.max(column_depth);

        let raw_scale_factor = (columns * max_dimension / max_scene_size)
            .min(rows * max_dimension / max_scene_size);
        let scale_factor = if raw_scale_factor.is_finite() && raw_scale_factor > MIN_NORMALIZER {
            raw_scale_factor
        } else {
            debug!(
                rows = inputs.row_count,
                columns = inputs.column_count,
                raw_scale_factor,
                "degenerate bar scale factor, clamping"
            );
            MIN_NORMALIZER
        };

        let bar_scale = Vec2::new(
            thickness.x / scale_factor,
            thickness.y / scale_factor,
        ) * (Vec2::ONE - inputs.series_margin);

        let background_margin = if inputs.requested_margin < 0.0 {
            Vec2::ZERO
        } else {
            Vec2::splat(inputs.requested_margin)
        };
        let graph_scale = Vec2::new(row_width / scale_factor, column_depth / scale_factor);
        let background_scale = Vec3::new(
            graph_scale.x + background_margin.x,
            1.0 + background_margin.y,
            graph_scale.y + background_margin.x,
        );

        Self {
            row_count: inputs.row_count,
            column_count: inputs.column_count,
            max_scene_size,
            row_width,
            column_depth,
            max_dimension,
            scale_factor,
            bar_scale,
            graph_scale,
            background_margin,
            background_scale,
        }
    }
}

/// Scene extent that keeps the bar grid's area roughly constant.
#[must_use]
pub fn max_scene_size(row_count: usize, column_count: usize) -> f32 {
    if row_count == 0 || column_count == 0 {
        return DEFAULT_MAX_SCENE_SIZE;
    }
    let rows = row_count as f32;
    let columns = column_count as f32;
    let scene_ratio = (columns / rows).min(rows / columns);
    2.0 * (scene_ratio * rows * columns).sqrt()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;

    use super::{DEFAULT_MAX_SCENE_SIZE, ScalingInputs, SceneScaling, max_scene_size};
    use crate::core::bar_specs::BarSpecs;

    fn inputs(rows: usize, columns: usize) -> ScalingInputs {
        ScalingInputs {
            row_count: rows,
            column_count: columns,
            dimensions: BarSpecs::new(1.0, Vec2::ZERO, true).dimensions(),
            series_margin: Vec2::ZERO,
            requested_margin: -1.0,
        }
    }

    #[test]
    fn five_by_three_grid_fits_scene_of_six() {
        let scaling = SceneScaling::compute(inputs(5, 3));
        assert_relative_eq!(scaling.max_scene_size, 6.0, epsilon = 1e-5);
        assert_relative_eq!(scaling.row_width, 3.0);
        assert_relative_eq!(scaling.column_depth, 5.0);
        assert_relative_eq!(scaling.scale_factor, 2.5, epsilon = 1e-5);
        assert_relative_eq!(scaling.bar_scale.x, 0.4, epsilon = 1e-5);
        assert_relative_eq!(scaling.graph_scale.y, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn empty_grid_uses_default_scene_size_and_finite_scale() {
        let scaling = SceneScaling::compute(inputs(0, 0));
        assert_eq!(scaling.max_scene_size, DEFAULT_MAX_SCENE_SIZE);
        assert!(scaling.scale_factor > 0.0);
        assert!(scaling.bar_scale.is_finite());
        assert!(scaling.background_scale.is_finite());
    }

    #[test]
    fn series_margin_shrinks_bar_footprint() {
        let mut with_margin = inputs(2, 2);
        with_margin.series_margin = Vec2::new(0.5, 0.25);
        let plain = SceneScaling::compute(inputs(2, 2));
        let shrunk = SceneScaling::compute(with_margin);
        assert_relative_eq!(shrunk.bar_scale.x, plain.bar_scale.x * 0.5);
        assert_relative_eq!(shrunk.bar_scale.y, plain.bar_scale.y * 0.75);
    }

    #[test]
    fn requested_margin_grows_background() {
        let mut margin = inputs(4, 4);
        margin.requested_margin = 0.5;
        let scaling = SceneScaling::compute(margin);
        assert_relative_eq!(scaling.background_scale.y, 1.5);
        assert_relative_eq!(
            scaling.background_scale.x,
            scaling.graph_scale.x + 0.5
        );
    }

    #[test]
    fn square_grid_scene_size_is_twice_side() {
        assert_relative_eq!(max_scene_size(4, 4), 8.0);
    }

    #[test]
    fn recompute_is_idempotent() {
        assert_eq!(
            SceneScaling::compute(inputs(7, 3)),
            SceneScaling::compute(inputs(7, 3))
        );
    }
}
