use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One bar: its value plus an optional rotation about the up axis in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarItem {
    pub value: f32,
    #[serde(default)]
    pub rotation: f32,
}

impl BarItem {
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Self {
            value,
            rotation: 0.0,
        }
    }

    #[must_use]
    pub const fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    fn validate(self) -> ChartResult<()> {
        if !self.value.is_finite() || !self.rotation.is_finite() {
            return Err(ChartError::InvalidData(
                "bar value and rotation must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Row/column indexed read access to bar values.
///
/// The layout engine only reads through this trait, so hosts can lay out
/// their own storage without copying it into a [`BarDataArray`].
pub trait BarDataSource {
    fn row_count(&self) -> usize;

    fn column_count(&self) -> usize;

    fn item(&self, row: usize, column: usize) -> Option<BarItem>;

    /// Smallest and largest value, `None` when there are no items.
    fn value_limits(&self) -> Option<(f32, f32)> {
        let mut limits: Option<(f32, f32)> = None;
        for row in 0..self.row_count() {
            for column in 0..self.column_count() {
                if let Some(item) = self.item(row, column) {
                    limits = Some(match limits {
                        Some((min, max)) => (min.min(item.value), max.max(item.value)),
                        None => (item.value, item.value),
                    });
                }
            }
        }
        limits
    }
}

/// Rectangular bar storage: every row has the same column count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarDataArray {
    rows: Vec<Vec<BarItem>>,
    column_count: usize,
}

impl BarDataArray {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(rows: Vec<Vec<f32>>) -> ChartResult<Self> {
        Self::from_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(BarItem::new).collect())
                .collect(),
        )
    }

    pub fn from_rows(rows: Vec<Vec<BarItem>>) -> ChartResult<Self> {
        let mut array = Self::new();
        for row in rows {
            array.push_row(row)?;
        }
        Ok(array)
    }

    /// Appends a row. The first row fixes the column count.
    pub fn push_row(&mut self, row: Vec<BarItem>) -> ChartResult<()> {
        if !self.rows.is_empty() && row.len() != self.column_count {
            return Err(ChartError::InvalidData(format!(
                "bar row has {} columns, expected {}",
                row.len(),
                self.column_count
            )));
        }
        for item in &row {
            item.validate()?;
        }
        if self.rows.is_empty() {
            self.column_count = row.len();
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn set_item(&mut self, row: usize, column: usize, item: BarItem) -> ChartResult<()> {
        item.validate()?;
        let slot = self
            .rows
            .get_mut(row)
            .and_then(|cells| cells.get_mut(column))
            .ok_or_else(|| {
                ChartError::InvalidData(format!("bar position ({row}, {column}) is out of range"))
            })?;
        *slot = item;
        Ok(())
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<BarItem>] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count == 0
    }
}

impl BarDataSource for BarDataArray {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn item(&self, row: usize, column: usize) -> Option<BarItem> {
        self.rows.get(row)?.get(column).copied()
    }
}

/// One scatter point in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterItem {
    pub position: Vec3,
    #[serde(default = "default_rotation")]
    pub rotation: Quat,
}

fn default_rotation() -> Quat {
    Quat::IDENTITY
}

impl ScatterItem {
    #[must_use]
    pub const fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    #[must_use]
    pub const fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Row-major grid of surface vertices in data coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceDataArray {
    rows: Vec<Vec<Vec3>>,
    column_count: usize,
}

impl SurfaceDataArray {
    pub fn from_rows(rows: Vec<Vec<Vec3>>) -> ChartResult<Self> {
        let column_count = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != column_count) {
            return Err(ChartError::InvalidData(
                "surface rows must all have the same column count".to_owned(),
            ));
        }
        if rows.iter().flatten().any(|point| !point.is_finite()) {
            return Err(ChartError::InvalidData(
                "surface vertices must be finite".to_owned(),
            ));
        }
        Ok(Self { rows, column_count })
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.column_count
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Vec3>] {
        &self.rows
    }

    #[must_use]
    pub fn point(&self, row: usize, column: usize) -> Option<Vec3> {
        self.rows.get(row)?.get(column).copied()
    }
}

/// Per-component extent of a point cloud, `None` for an empty one.
#[must_use]
pub fn point_extent<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<(Vec3, Vec3)> {
    points.into_iter().fold(None, |extent, point| match extent {
        Some((min, max)) => Some((min.min(*point), max.max(*point))),
        None => Some((*point, *point)),
    })
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::{BarDataArray, BarDataSource, BarItem, SurfaceDataArray, point_extent};

    #[test]
    fn bar_rows_must_share_column_count() {
        let err = BarDataArray::from_values(vec![vec![1.0, 2.0], vec![3.0]])
            .expect_err("ragged rows");
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn non_finite_bar_values_are_rejected() {
        assert!(BarDataArray::from_values(vec![vec![f32::NAN]]).is_err());
    }

    #[test]
    fn value_limits_cover_all_items() {
        let data = BarDataArray::from_values(vec![vec![-2.0, 4.0], vec![1.0, 8.5]])
            .expect("valid data");
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.column_count(), 2);
        assert_eq!(data.value_limits(), Some((-2.0, 8.5)));
        assert_eq!(BarDataArray::new().value_limits(), None);
    }

    #[test]
    fn set_item_checks_bounds() {
        let mut data = BarDataArray::from_values(vec![vec![1.0]]).expect("valid data");
        data.set_item(0, 0, BarItem::new(2.0).with_rotation(45.0))
            .expect("in range");
        assert_eq!(data.item(0, 0), Some(BarItem::new(2.0).with_rotation(45.0)));
        assert!(data.set_item(1, 0, BarItem::new(2.0)).is_err());
    }

    #[test]
    fn surface_requires_rectangular_grid() {
        assert!(SurfaceDataArray::from_rows(vec![vec![Vec3::ZERO], vec![]]).is_err());
        let grid = SurfaceDataArray::from_rows(vec![vec![Vec3::ZERO, Vec3::ONE]])
            .expect("valid grid");
        assert_eq!(grid.column_count(), 2);
    }

    #[test]
    fn point_extent_tracks_each_component() {
        let points = [Vec3::new(1.0, -2.0, 3.0), Vec3::new(-1.0, 5.0, 0.0)];
        assert_eq!(
            point_extent(points.iter()),
            Some((Vec3::new(-1.0, -2.0, 0.0), Vec3::new(1.0, 5.0, 3.0)))
        );
    }
}
