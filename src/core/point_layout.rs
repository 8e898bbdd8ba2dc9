use glam::{Quat, Vec3};

use crate::core::axis_helper::AxisHelper;
use crate::core::data::{ScatterItem, SurfaceDataArray};
use crate::core::geometry::ItemTransform;

/// Largest and smallest automatic scatter item scale.
const MAX_POINT_SCALE: f32 = 0.1;
const MIN_POINT_SCALE: f32 = 0.01;

/// Maps data-space points into the `[-1, 1]` scene cube of scatter and surface charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLayout {
    pub x: AxisHelper,
    pub y: AxisHelper,
    pub z: AxisHelper,
    /// Half extents of the scene cube.
    pub graph_scale: Vec3,
}

impl PointLayout {
    #[must_use]
    pub fn scene_position(&self, point: Vec3) -> Vec3 {
        let normalized = Vec3::new(
            self.x.item_position_at(point.x),
            self.y.item_position_at(point.y),
            self.z.item_position_at(point.z),
        );
        (normalized * 2.0 - Vec3::ONE) * self.graph_scale
    }

    /// Whether `point` lies inside all three axis ranges.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        [(self.x, point.x), (self.y, point.y), (self.z, point.z)]
            .iter()
            .all(|(helper, value)| {
                let (min, max) = helper.range();
                (min..=max).contains(value)
            })
    }

    /// Scatter points, one transform per item in input order.
    #[must_use]
    pub fn layout_scatter(&self, items: &[ScatterItem]) -> Vec<ItemTransform> {
        let scale = Vec3::splat(auto_point_scale(items.len()));
        items
            .iter()
            .enumerate()
            .map(|(index, item)| ItemTransform {
                position: self.scene_position(item.position),
                scale,
                rotation: item.rotation,
                visible: self.contains(item.position),
                row: index,
                column: 0,
            })
            .collect()
    }

    /// Surface vertices in row-major order.
    #[must_use]
    pub fn layout_surface(&self, data: &SurfaceDataArray) -> Vec<ItemTransform> {
        data.rows()
            .iter()
            .enumerate()
            .flat_map(|(row, points)| {
                points
                    .iter()
                    .enumerate()
                    .map(move |(column, point)| ItemTransform {
                        position: self.scene_position(*point),
                        scale: Vec3::ONE,
                        rotation: Quat::IDENTITY,
                        visible: self.contains(*point),
                        row,
                        column,
                    })
            })
            .collect()
    }
}

/// Item scale shrinking with point count so dense clouds stay readable.
#[must_use]
pub fn auto_point_scale(count: usize) -> f32 {
    if count == 0 {
        return MAX_POINT_SCALE;
    }
    (1.0 / (count as f32).sqrt()).clamp(MIN_POINT_SCALE, MAX_POINT_SCALE)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::{PointLayout, auto_point_scale};
    use crate::core::axis_helper::AxisHelper;
    use crate::core::data::{ScatterItem, SurfaceDataArray};

    fn unit_layout(reversed_y: bool) -> PointLayout {
        PointLayout {
            x: AxisHelper::new(0.0, 10.0, false),
            y: AxisHelper::new(0.0, 10.0, reversed_y),
            z: AxisHelper::new(0.0, 10.0, false),
            graph_scale: Vec3::ONE,
        }
    }

    #[test]
    fn range_extremes_map_to_cube_faces() {
        let layout = unit_layout(false);
        assert_eq!(layout.scene_position(Vec3::ZERO), Vec3::splat(-1.0));
        assert_eq!(layout.scene_position(Vec3::splat(10.0)), Vec3::ONE);
        assert_eq!(layout.scene_position(Vec3::splat(5.0)), Vec3::ZERO);
    }

    #[test]
    fn reversed_axis_flips_its_component() {
        let layout = unit_layout(true);
        let position = layout.scene_position(Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(position, Vec3::new(-1.0, 1.0, -1.0));
    }

    #[test]
    fn points_outside_ranges_are_hidden() {
        let layout = unit_layout(false);
        let items = layout.layout_scatter(&[
            ScatterItem::new(Vec3::splat(1.0)),
            ScatterItem::new(Vec3::new(11.0, 1.0, 1.0)),
        ]);
        assert!(items[0].visible);
        assert!(!items[1].visible);
        assert_eq!(items[1].row, 1);
    }

    #[test]
    fn surface_layout_is_row_major() {
        let grid = SurfaceDataArray::from_rows(vec![
            vec![Vec3::new(0.0, 1.0, 0.0), Vec3::new(10.0, 1.0, 0.0)],
            vec![Vec3::new(0.0, 2.0, 10.0), Vec3::new(10.0, 2.0, 10.0)],
        ])
        .expect("valid grid");
        let items = unit_layout(false).layout_surface(&grid);
        assert_eq!(items.len(), 4);
        assert_eq!((items[2].row, items[2].column), (1, 0));
    }

    #[test]
    fn point_scale_shrinks_with_count() {
        assert_eq!(auto_point_scale(0), 0.1);
        assert!(auto_point_scale(10_000) < auto_point_scale(200));
        assert_eq!(auto_point_scale(1_000_000), 0.01);
    }
}
