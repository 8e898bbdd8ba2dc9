use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};
#[cfg(feature = "parallel-layout")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::bar_specs::BarSeriesMargin;
use crate::core::data::{BarDataSource, BarItem};
use crate::core::floor_normalization::FloorNormalization;
use crate::core::geometry::ItemTransform;
use crate::core::scene_scaling::SceneScaling;

/// Horizontal placement of one series inside each bar slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesOffset {
    /// Offset within a column slot, in column units.
    pub position: f32,
    /// Footprint multiplier along X and Z.
    pub scale: Vec2,
}

/// Snapshot of everything bar placement depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    pub scaling: SceneScaling,
    pub floor: FloorNormalization,
    pub spacing: Vec2,
    pub series_margin: BarSeriesMargin,
    /// First data row/column shown, taken from the category axis ranges.
    pub first_row: usize,
    pub first_column: usize,
}

impl BarLayout {
    /// Offset of the series at `visual_index` among `visible_count` visible ones.
    ///
    /// Returns `None` when nothing is visible.
    #[must_use]
    pub fn series_offset(&self, visual_index: usize, visible_count: usize) -> Option<SeriesOffset> {
        if visible_count == 0 {
            return None;
        }
        let visible = visible_count as f32;
        let index = visual_index as f32;
        let margin = self.series_margin.margin.x;

        let step = 1.0 / visible;
        let start = -((visible - 1.0) / 2.0) * (step - step * margin);
        let position = start + step * (index - index * margin) + 0.5;

        let scale_x = 1.0 / visible;
        let scale_z = if self.series_margin.keep_series_uniform {
            scale_x
        } else {
            1.0
        };

        Some(SeriesOffset {
            position,
            scale: Vec2::new(scale_x, scale_z),
        })
    }

    /// Transform of one bar at a window-relative row and column.
    #[must_use]
    pub fn item_transform(
        &self,
        row: usize,
        column: usize,
        item: BarItem,
        offset: SeriesOffset,
    ) -> ItemTransform {
        let scaling = &self.scaling;
        let height = self.floor.bar_height(item.value);

        let column_position = (column as f32 + offset.position) * self.spacing.x;
        let x = (column_position - scaling.row_width) / scaling.scale_factor;
        let row_position = (row as f32 + 0.5) * self.spacing.y;
        let z = (scaling.column_depth - row_position) / scaling.scale_factor;

        let mut rotation = if item.rotation != 0.0 {
            Quat::from_rotation_y(item.rotation.to_radians())
        } else {
            Quat::IDENTITY
        };
        if height < 0.0 {
            rotation *= Quat::from_rotation_x(-PI);
        }

        ItemTransform {
            position: Vec3::new(x, height - self.floor.background_adjustment, z),
            scale: Vec3::new(
                scaling.bar_scale.x * offset.scale.x,
                height.abs(),
                scaling.bar_scale.y * offset.scale.y,
            ),
            rotation,
            visible: true,
            row: row + self.first_row,
            column: column + self.first_column,
        }
    }

    /// Lays out the shown window of `source` for one series.
    ///
    /// Items are ordered row-major. An empty vector is returned when no series
    /// is visible.
    pub fn layout_series<S>(
        &self,
        source: &S,
        visual_index: usize,
        visible_count: usize,
    ) -> Vec<ItemTransform>
    where
        S: BarDataSource + Sync + ?Sized,
    {
        let Some(offset) = self.series_offset(visual_index, visible_count) else {
            return Vec::new();
        };

        let row_end = source
            .row_count()
            .min(self.first_row.saturating_add(self.scaling.row_count));
        let column_end = source
            .column_count()
            .min(self.first_column.saturating_add(self.scaling.column_count));
        if self.first_row >= row_end || self.first_column >= column_end {
            return Vec::new();
        }

        let layout_row = |row: usize| -> Vec<ItemTransform> {
            (self.first_column..column_end)
                .filter_map(|column| {
                    source.item(row, column).map(|item| {
                        self.item_transform(
                            row - self.first_row,
                            column - self.first_column,
                            item,
                            offset,
                        )
                    })
                })
                .collect()
        };

        #[cfg(feature = "parallel-layout")]
        {
            (self.first_row..row_end)
                .into_par_iter()
                .flat_map_iter(layout_row)
                .collect()
        }

        #[cfg(not(feature = "parallel-layout"))]
        {
            (self.first_row..row_end).flat_map(layout_row).collect()
        }
    }

    /// X coordinate of the label for column `index`.
    #[must_use]
    pub fn column_label_position(&self, index: usize) -> f32 {
        let x = (index as f32 + 0.5) * self.spacing.x;
        (x - self.scaling.row_width) / self.scaling.scale_factor
    }

    /// Z coordinate of the label for row `index`.
    #[must_use]
    pub fn row_label_position(&self, index: usize) -> f32 {
        let z = (index as f32 + 0.5) * self.spacing.y;
        (self.scaling.column_depth - z) / self.scaling.scale_factor
    }

    /// X coordinate of the grid line left of column `index`.
    #[must_use]
    pub fn column_grid_line_position(&self, index: usize) -> f32 {
        index as f32 * (self.spacing.x / self.scaling.scale_factor) - self.scaling.graph_scale.x
    }

    /// Z coordinate of the grid line in front of row `index`.
    #[must_use]
    pub fn row_grid_line_position(&self, index: usize) -> f32 {
        index as f32 * -(self.spacing.y / self.scaling.scale_factor) + self.scaling.graph_scale.y
    }

    /// Height of the floor grid.
    #[must_use]
    pub fn floor_grid_position(&self) -> f32 {
        -self.floor.background_adjustment
    }
}
