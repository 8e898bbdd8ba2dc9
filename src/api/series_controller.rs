use glam::Vec3;
use tracing::debug;

use crate::core::data::point_extent;
use crate::core::{
    AxisOrientation, BarDataSource, BarSelection, ChartKind, MeshShape, Series, SeriesData,
    SeriesDataKind, SeriesId,
};
use crate::error::{ChartError, ChartResult};
use crate::render::ChartRenderer;

use super::ChartController;
use super::change_tracker::ChangeTopic;

impl<R: ChartRenderer> ChartController<R> {
    /// Adds a series at the end of the draw order.
    pub fn add_series(&mut self, series: Series) -> ChartResult<SeriesId> {
        self.ensure_kind(series.data().kind())?;
        let id = series.id();
        debug!(series = id.raw(), items = series.data().item_count(), "adding series");
        self.series.push(series);
        self.series_structure_changed();
        Ok(id)
    }

    pub fn remove_series(&mut self, id: SeriesId) -> ChartResult<Series> {
        let position = self.series_position(id)?;
        let removed = self.series.remove(position);
        self.series_structure_changed();
        Ok(removed)
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn series_by_id(&self, id: SeriesId) -> Option<&Series> {
        self.series.iter().find(|series| series.id() == id)
    }

    /// Replaces the data of a series. The data kind must match the chart.
    pub fn set_series_data(&mut self, id: SeriesId, data: SeriesData) -> ChartResult<()> {
        self.ensure_kind(data.kind())?;
        let position = self.series_position(id)?;
        self.series[position].replace_data(data);
        self.changes.mark(ChangeTopic::Data);
        self.adjust_axis_ranges();
        self.revalidate_selection();
        Ok(())
    }

    pub fn set_series_visible(&mut self, id: SeriesId, visible: bool) -> ChartResult<()> {
        let position = self.series_position(id)?;
        if self.series[position].is_visible() == visible {
            return Ok(());
        }
        self.series[position].set_visible(visible);
        self.series_structure_changed();
        Ok(())
    }

    pub fn set_series_mesh(
        &mut self,
        id: SeriesId,
        mesh: MeshShape,
        smooth: bool,
    ) -> ChartResult<()> {
        let position = self.series_position(id)?;
        let series = &mut self.series[position];
        if series.mesh() != mesh || series.is_mesh_smooth() != smooth {
            series.set_mesh(mesh, smooth);
            self.changes.mark(ChangeTopic::SeriesVisuals);
        }
        Ok(())
    }

    /// Recomputes the range of every auto-adjusting active axis from visible data.
    pub fn adjust_axis_ranges(&mut self) {
        let ranges = match self.config.kind {
            ChartKind::Bars => self.bar_axis_ranges(),
            ChartKind::Scatter | ChartKind::Surface => self.point_axis_ranges(),
        };
        for orientation in AxisOrientation::ALL {
            let Some((min, max)) = ranges[orientation.index()] else {
                continue;
            };
            let axis = self.axes.active_mut(orientation);
            if !axis.auto_adjust_range() {
                continue;
            }
            axis.set_auto_range(min, max);
            let changes = axis.take_changes();
            self.changes.mark_axis(orientation, changes);
        }
    }

    pub(super) fn is_valid_selection(&self, selection: BarSelection) -> bool {
        let Some(series) = self.series_by_id(selection.series) else {
            return false;
        };
        match series.data() {
            SeriesData::Bars(data) => {
                selection.row < data.row_count() && selection.column < data.column_count()
            }
            SeriesData::Scatter(_) | SeriesData::Surface(_) => false,
        }
    }

    fn ensure_kind(&self, data: SeriesDataKind) -> ChartResult<()> {
        if self.config.kind.accepts(data) {
            return Ok(());
        }
        Err(ChartError::SeriesKindMismatch {
            chart: self.config.kind,
            data,
        })
    }

    fn series_position(&self, id: SeriesId) -> ChartResult<usize> {
        self.series
            .iter()
            .position(|series| series.id() == id)
            .ok_or(ChartError::UnknownSeries { series: id })
    }

    fn series_structure_changed(&mut self) {
        self.changes.mark(ChangeTopic::SeriesVisuals);
        self.changes.mark(ChangeTopic::Data);
        self.adjust_axis_ranges();
        self.revalidate_selection();
    }

    fn revalidate_selection(&mut self) {
        if let Some(selection) = self.selected_bar {
            if !self.is_valid_selection(selection) {
                self.selected_bar = None;
                self.changes.mark(ChangeTopic::SelectedBar);
            }
        }
    }

    /// Category axes span `0..=count-1`; the value axis always includes zero.
    fn bar_axis_ranges(&self) -> [Option<(f32, f32)>; 3] {
        let mut rows = 0_usize;
        let mut columns = 0_usize;
        let mut limits: Option<(f32, f32)> = None;
        for series in self.series.iter().filter(|series| series.is_visible()) {
            let SeriesData::Bars(data) = series.data() else {
                continue;
            };
            rows = rows.max(data.row_count());
            columns = columns.max(data.column_count());
            if let Some((min, max)) = data.value_limits() {
                limits = Some(match limits {
                    Some((low, high)) => (low.min(min), high.max(max)),
                    None => (min, max),
                });
            }
        }

        let category_range = |count: usize| (0.0, count.saturating_sub(1) as f32);
        let value_range = limits.map(|(min, max)| {
            if min < 0.0 {
                (min, max)
            } else if max == 0.0 {
                (0.0, 1.0)
            } else {
                (0.0, max)
            }
        });
        [
            Some(category_range(columns)),
            value_range,
            Some(category_range(rows)),
        ]
    }

    /// Data extent per dimension; zero-width extents are widened by one each side.
    fn point_axis_ranges(&self) -> [Option<(f32, f32)>; 3] {
        let mut extent: Option<(Vec3, Vec3)> = None;
        for series in self.series.iter().filter(|series| series.is_visible()) {
            let series_extent = match series.data() {
                SeriesData::Scatter(items) => point_extent(items.iter().map(|item| &item.position)),
                SeriesData::Surface(data) => point_extent(data.rows().iter().flatten()),
                SeriesData::Bars(_) => None,
            };
            if let Some((low, high)) = series_extent {
                extent = Some(match extent {
                    Some((min, max)) => (min.min(low), max.max(high)),
                    None => (low, high),
                });
            }
        }
        let Some((min, max)) = extent else {
            return [None; 3];
        };

        let widen = |low: f32, high: f32| {
            if low == high {
                (low - 1.0, high + 1.0)
            } else {
                (low, high)
            }
        };
        [
            Some(widen(min.x, max.x)),
            Some(widen(min.y, max.y)),
            Some(widen(min.z, max.z)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::api::{ChangeTopic, ChartConfig, ChartController};
    use crate::core::{
        Axis, AxisOrientation, BarDataArray, BarSelection, ScatterItem, Series, SeriesData,
    };
    use crate::error::ChartError;
    use crate::render::NullRenderer;

    fn bars(values: Vec<Vec<f32>>) -> Series {
        Series::bars("series", BarDataArray::from_values(values).expect("rectangular"))
    }

    #[test]
    fn wrong_series_kind_is_rejected() {
        let mut chart =
            ChartController::<NullRenderer>::new(ChartConfig::bars()).expect("valid config");
        let err = chart
            .add_series(Series::scatter("points", Vec::new()))
            .expect_err("scatter data on a bar chart");
        assert!(matches!(err, ChartError::SeriesKindMismatch { .. }));
    }

    #[test]
    fn bar_axes_follow_data() {
        let mut chart =
            ChartController::<NullRenderer>::new(ChartConfig::bars()).expect("valid config");
        chart
            .add_series(bars(vec![vec![1.0, 4.0, 2.0], vec![3.0, 0.5, 1.0]]))
            .expect("bar series");
        assert_eq!(chart.axis(AxisOrientation::X).range(), (0.0, 2.0));
        assert_eq!(chart.axis(AxisOrientation::Z).range(), (0.0, 1.0));
        assert_eq!(chart.axis(AxisOrientation::Y).range(), (0.0, 4.0));
    }

    #[test]
    fn negative_and_all_zero_bar_values() {
        let mut chart =
            ChartController::<NullRenderer>::new(ChartConfig::bars()).expect("valid config");
        let id = chart
            .add_series(bars(vec![vec![-2.0, 3.0]]))
            .expect("bar series");
        assert_eq!(chart.axis(AxisOrientation::Y).range(), (-2.0, 3.0));

        let zeros = BarDataArray::from_values(vec![vec![0.0, 0.0]]).expect("rectangular");
        chart
            .set_series_data(id, SeriesData::Bars(zeros))
            .expect("same kind");
        assert_eq!(chart.axis(AxisOrientation::Y).range(), (0.0, 1.0));
    }

    #[test]
    fn explicit_axis_range_is_not_overridden() {
        let mut chart =
            ChartController::<NullRenderer>::new(ChartConfig::bars()).expect("valid config");
        let axis = Axis::value().with_range(-100.0, 100.0).expect("valid range");
        chart.set_axis(AxisOrientation::Y, Some(axis));
        chart
            .add_series(bars(vec![vec![1.0, 2.0]]))
            .expect("bar series");
        assert_eq!(chart.axis(AxisOrientation::Y).range(), (-100.0, 100.0));
    }

    #[test]
    fn scatter_axes_widen_flat_extents() {
        let mut chart =
            ChartController::<NullRenderer>::new(ChartConfig::scatter()).expect("valid config");
        chart
            .add_series(Series::scatter(
                "points",
                vec![
                    ScatterItem::new(Vec3::new(1.0, 5.0, -2.0)),
                    ScatterItem::new(Vec3::new(3.0, 5.0, 2.0)),
                ],
            ))
            .expect("scatter series");
        assert_eq!(chart.axis(AxisOrientation::X).range(), (1.0, 3.0));
        assert_eq!(chart.axis(AxisOrientation::Y).range(), (4.0, 6.0));
        assert_eq!(chart.axis(AxisOrientation::Z).range(), (-2.0, 2.0));
    }

    #[test]
    fn removing_selected_series_clears_selection() {
        let mut chart =
            ChartController::<NullRenderer>::new(ChartConfig::bars()).expect("valid config");
        let id = chart
            .add_series(bars(vec![vec![1.0, 2.0]]))
            .expect("bar series");
        let selection = BarSelection {
            series: id,
            row: 0,
            column: 1,
        };
        chart.set_selected_bar(Some(selection));
        assert_eq!(chart.selected_bar(), Some(selection));

        chart.remove_series(id).expect("attached series");
        assert_eq!(chart.selected_bar(), None);
        assert!(chart.pending_changes().is_marked(ChangeTopic::SelectedBar));
    }

    #[test]
    fn out_of_range_selection_is_ignored() {
        let mut chart =
            ChartController::<NullRenderer>::new(ChartConfig::bars()).expect("valid config");
        let id = chart
            .add_series(bars(vec![vec![1.0]]))
            .expect("bar series");
        chart.set_selected_bar(Some(BarSelection {
            series: id,
            row: 3,
            column: 0,
        }));
        assert_eq!(chart.selected_bar(), None);
    }

    #[test]
    fn unknown_series_is_an_error() {
        let mut chart =
            ChartController::<NullRenderer>::new(ChartConfig::bars()).expect("valid config");
        let detached = bars(vec![vec![1.0]]);
        let err = chart
            .set_series_visible(detached.id(), false)
            .expect_err("not attached");
        assert!(matches!(err, ChartError::UnknownSeries { .. }));
    }
}
