use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{AxisKind, AxisOrientation, AxisProperty};
use crate::render::ChartRenderer;

use super::ChartController;
use super::change_tracker::ChangeTopic;

/// Topics pushed by one synchronization pass, in push order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub pushed: SmallVec<[ChangeTopic; 16]>,
}

impl SyncOutcome {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pushed.is_empty()
    }

    #[must_use]
    pub fn contains(&self, topic: ChangeTopic) -> bool {
        self.pushed.contains(&topic)
    }
}

impl<R: ChartRenderer> ChartController<R> {
    /// Pushes every marked topic to the renderer in declared order and clears it.
    ///
    /// Without a renderer this does nothing and the marks stay for the next
    /// attached one. Pushes that imply a relayout mark `Data`, which is
    /// declared later and therefore consumed by the same pass.
    pub fn synchronize(&mut self) -> SyncOutcome {
        let Some(mut renderer) = self.renderer.take() else {
            trace!("no renderer attached, keeping change marks");
            return SyncOutcome::default();
        };

        let mut outcome = SyncOutcome::default();
        for topic in ChangeTopic::sync_order() {
            if !self.changes.is_marked(topic) {
                continue;
            }
            self.changes.clear(topic);
            if self.push(&mut renderer, topic) {
                trace!(?topic, "pushed");
                outcome.pushed.push(topic);
            }
        }
        renderer.prepare_frame();
        self.renderer = Some(renderer);

        debug!(pushed = outcome.pushed.len(), "synchronized chart");
        outcome
    }

    /// Returns `false` when the topic does not apply and nothing was pushed.
    fn push(&mut self, renderer: &mut R, topic: ChangeTopic) -> bool {
        match topic {
            ChangeTopic::BoundingRect => renderer.update_bounding_rect(self.config.bounding_rect),
            ChangeTopic::Position => renderer.update_position(self.config.bounding_rect),
            ChangeTopic::ZoomLevel => renderer.update_zoom_level(self.config.zoom_level),
            ChangeTopic::CameraRotation => renderer.update_camera_rotation(self.config.camera),
            ChangeTopic::Theme => renderer.update_theme(&self.config.theme),
            ChangeTopic::Font => renderer.update_font(&self.config.font),
            ChangeTopic::ShadowQuality => {
                let requested = self.config.shadow_quality;
                let effective = renderer.update_shadow_quality(requested);
                if effective != requested {
                    warn!(?requested, ?effective, "renderer downgraded shadow quality");
                    self.config.shadow_quality = effective;
                }
            }
            ChangeTopic::SelectionMode => renderer.update_selection_mode(self.config.selection_mode),
            ChangeTopic::GridEnabled => renderer.update_grid_enabled(self.config.grid_enabled),
            ChangeTopic::BackgroundEnabled => {
                renderer.update_background_enabled(self.config.background_enabled);
            }
            ChangeTopic::Margin => renderer.update_margin(self.config.margin),
            ChangeTopic::BarSpecs => renderer.update_bar_specs(self.config.bar_specs),
            ChangeTopic::FloorLevel => {
                renderer.update_floor_level(self.config.floor_level);
                self.changes.mark(ChangeTopic::Data);
            }
            ChangeTopic::BarSeriesMargin => {
                renderer.update_bar_series_margin(self.config.bar_series_margin);
            }
            ChangeTopic::Axis(orientation, property) => {
                return self.push_axis(renderer, orientation, property);
            }
            ChangeTopic::SeriesVisuals => renderer.update_series_visuals(&self.series),
            ChangeTopic::Data => renderer.update_data(&self.series),
            ChangeTopic::SelectedBar => renderer.update_selected_bar(self.selected_bar),
        }
        true
    }

    fn push_axis(
        &mut self,
        renderer: &mut R,
        orientation: AxisOrientation,
        property: AxisProperty,
    ) -> bool {
        let axis = self.axes.active(orientation);
        let is_value_axis = axis.kind() == AxisKind::Value;
        match property {
            AxisProperty::Type => renderer.update_axis_type(orientation, axis.kind()),
            AxisProperty::Title => renderer.update_axis_title(orientation, axis.title()),
            AxisProperty::Labels => renderer.update_axis_labels(orientation, axis.labels()),
            // Category ranges carry the bar row and column counts.
            AxisProperty::Range => {
                renderer.update_axis_range(orientation, axis.min(), axis.max());
                self.changes.mark(ChangeTopic::Data);
            }
            AxisProperty::SegmentCount if is_value_axis => {
                renderer.update_axis_segment_count(orientation, axis.segment_count());
            }
            AxisProperty::SubSegmentCount if is_value_axis => {
                renderer.update_axis_sub_segment_count(orientation, axis.sub_segment_count());
            }
            AxisProperty::LabelFormat if is_value_axis => {
                renderer.update_axis_label_format(orientation, axis.label_format());
                self.changes.mark(ChangeTopic::Data);
            }
            AxisProperty::SegmentCount | AxisProperty::SubSegmentCount | AxisProperty::LabelFormat => {
                return false;
            }
            AxisProperty::Reversed => renderer.update_axis_reversed(orientation, axis.is_reversed()),
        }
        true
    }
}
