use tracing::{debug, warn};

use crate::core::{
    BarSelection, BarSeriesMargin, BarSpecs, CameraRotation, ChartKind, FontSpec, Rect,
    SelectionMode, Series, Theme,
};
use crate::error::ChartResult;
use crate::render::{ChartRenderer, ShadowQuality};

use super::axis_lifecycle::AxisSlots;
use super::change_tracker::{ChangeRecord, ChangeTopic};
use super::config::{ChartConfig, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};

/// Source of truth for one chart.
///
/// Mutators update state and mark change topics; nothing reaches the renderer
/// until [`ChartController::synchronize`] drains the marks. Axis and series
/// operations live in `axis_lifecycle.rs` and `series_controller.rs`.
#[derive(Debug)]
pub struct ChartController<R: ChartRenderer> {
    pub(super) config: ChartConfig,
    pub(super) axes: AxisSlots,
    pub(super) series: Vec<Series>,
    pub(super) selected_bar: Option<BarSelection>,
    pub(super) changes: ChangeRecord,
    pub(super) renderer: Option<R>,
}

impl<R: ChartRenderer> ChartController<R> {
    /// Creates a controller with default axes and every change topic marked.
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let mut config = config;
        config.zoom_level = clamp_zoom_level(config.zoom_level);
        config.camera = CameraRotation::clamped(config.camera.horizontal, config.camera.vertical);

        debug!(kind = ?config.kind, "chart controller created");
        Ok(Self {
            axes: AxisSlots::new(config.kind),
            config,
            series: Vec::new(),
            selected_bar: None,
            changes: ChangeRecord::all(),
            renderer: None,
        })
    }

    /// Attaches a renderer and returns the previous one.
    ///
    /// A newly attached renderer knows nothing, so every topic is marked again.
    pub fn attach_renderer(&mut self, renderer: R) -> Option<R> {
        self.changes = ChangeRecord::all();
        self.renderer.replace(renderer)
    }

    pub fn detach_renderer(&mut self) -> Option<R> {
        self.renderer.take()
    }

    #[must_use]
    pub fn renderer(&self) -> Option<&R> {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.renderer.as_mut()
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        self.config.kind
    }

    /// Topics marked since the last synchronization.
    #[must_use]
    pub const fn pending_changes(&self) -> ChangeRecord {
        self.changes
    }

    /// Marks `topic` without changing state, e.g. after a host-side data edit.
    pub fn mark_dirty(&mut self, topic: ChangeTopic) {
        self.changes.mark(topic);
    }

    #[must_use]
    pub const fn bounding_rect(&self) -> Rect {
        self.config.bounding_rect
    }

    pub fn set_bounding_rect(&mut self, rect: Rect) -> ChartResult<()> {
        rect.validate()?;
        let previous = self.config.bounding_rect;
        if previous == rect {
            return Ok(());
        }
        self.config.bounding_rect = rect;
        self.changes.mark(ChangeTopic::BoundingRect);
        if previous.x != rect.x || previous.y != rect.y {
            self.changes.mark(ChangeTopic::Position);
        }
        Ok(())
    }

    /// Moves the chart without resizing it.
    pub fn set_position(&mut self, x: f32, y: f32) -> ChartResult<()> {
        let rect = self.config.bounding_rect;
        let moved = Rect::new(x, y, rect.width, rect.height);
        moved.validate()?;
        if moved != rect {
            self.config.bounding_rect = moved;
            self.changes.mark(ChangeTopic::Position);
        }
        Ok(())
    }

    #[must_use]
    pub const fn zoom_level(&self) -> f32 {
        self.config.zoom_level
    }

    /// Zoom level in percent, clamped to `[10, 500]`.
    pub fn set_zoom_level(&mut self, zoom_level: f32) {
        let zoom_level = clamp_zoom_level(zoom_level);
        if self.config.zoom_level != zoom_level {
            self.config.zoom_level = zoom_level;
            self.changes.mark(ChangeTopic::ZoomLevel);
        }
    }

    #[must_use]
    pub const fn camera_rotation(&self) -> CameraRotation {
        self.config.camera
    }

    pub fn set_camera_rotation(&mut self, horizontal: f32, vertical: f32) {
        let rotation = CameraRotation::clamped(horizontal, vertical);
        if self.config.camera != rotation {
            self.config.camera = rotation;
            self.changes.mark(ChangeTopic::CameraRotation);
        }
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> ChartResult<()> {
        theme.validate()?;
        if self.config.theme != theme {
            self.config.theme = theme;
            self.changes.mark(ChangeTopic::Theme);
        }
        Ok(())
    }

    #[must_use]
    pub fn font(&self) -> &FontSpec {
        &self.config.font
    }

    pub fn set_font(&mut self, font: FontSpec) -> ChartResult<()> {
        font.validate()?;
        if self.config.font != font {
            self.config.font = font;
            self.changes.mark(ChangeTopic::Font);
        }
        Ok(())
    }

    /// Requested quality, or the effective one once a renderer downgraded it.
    #[must_use]
    pub const fn shadow_quality(&self) -> ShadowQuality {
        self.config.shadow_quality
    }

    pub fn set_shadow_quality(&mut self, quality: ShadowQuality) {
        if self.config.shadow_quality != quality {
            self.config.shadow_quality = quality;
            self.changes.mark(ChangeTopic::ShadowQuality);
        }
    }

    #[must_use]
    pub const fn selection_mode(&self) -> SelectionMode {
        self.config.selection_mode
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if self.config.selection_mode != mode {
            self.config.selection_mode = mode;
            self.changes.mark(ChangeTopic::SelectionMode);
        }
    }

    #[must_use]
    pub const fn grid_enabled(&self) -> bool {
        self.config.grid_enabled
    }

    pub fn set_grid_enabled(&mut self, enabled: bool) {
        if self.config.grid_enabled != enabled {
            self.config.grid_enabled = enabled;
            self.changes.mark(ChangeTopic::GridEnabled);
        }
    }

    #[must_use]
    pub const fn background_enabled(&self) -> bool {
        self.config.background_enabled
    }

    /// Mesh variants depend on the background, so series visuals are marked too.
    pub fn set_background_enabled(&mut self, enabled: bool) {
        if self.config.background_enabled != enabled {
            self.config.background_enabled = enabled;
            self.changes.mark(ChangeTopic::BackgroundEnabled);
            self.changes.mark(ChangeTopic::SeriesVisuals);
        }
    }

    #[must_use]
    pub const fn margin(&self) -> f32 {
        self.config.margin
    }

    /// Background margin; negative values mean no margin.
    pub fn set_margin(&mut self, margin: f32) {
        if !margin.is_finite() {
            warn!(margin, "ignoring non-finite background margin");
            return;
        }
        if self.config.margin != margin {
            self.config.margin = margin;
            self.changes.mark(ChangeTopic::Margin);
        }
    }

    #[must_use]
    pub const fn bar_specs(&self) -> BarSpecs {
        self.config.bar_specs
    }

    pub fn set_bar_specs(&mut self, specs: BarSpecs) -> ChartResult<()> {
        specs.validate()?;
        if self.config.bar_specs != specs {
            self.config.bar_specs = specs;
            self.changes.mark(ChangeTopic::BarSpecs);
        }
        Ok(())
    }

    #[must_use]
    pub const fn floor_level(&self) -> f32 {
        self.config.floor_level
    }

    pub fn set_floor_level(&mut self, level: f32) {
        if !level.is_finite() {
            warn!(level, "ignoring non-finite floor level");
            return;
        }
        if self.config.floor_level != level {
            self.config.floor_level = level;
            self.changes.mark(ChangeTopic::FloorLevel);
        }
    }

    #[must_use]
    pub const fn bar_series_margin(&self) -> BarSeriesMargin {
        self.config.bar_series_margin
    }

    pub fn set_bar_series_margin(&mut self, margin: BarSeriesMargin) -> ChartResult<()> {
        margin.validate()?;
        if self.config.bar_series_margin != margin {
            self.config.bar_series_margin = margin;
            self.changes.mark(ChangeTopic::BarSeriesMargin);
        }
        Ok(())
    }

    #[must_use]
    pub const fn selected_bar(&self) -> Option<BarSelection> {
        self.selected_bar
    }

    /// Selects a bar. Selections that point at no existing bar clear the selection.
    pub fn set_selected_bar(&mut self, selection: Option<BarSelection>) {
        let selection = selection.filter(|candidate| {
            let valid = self.is_valid_selection(*candidate);
            if !valid {
                debug!(?candidate, "bar selection out of range, clearing");
            }
            valid
        });
        if self.selected_bar != selection {
            self.selected_bar = selection;
            self.changes.mark(ChangeTopic::SelectedBar);
        }
    }
}

fn clamp_zoom_level(zoom_level: f32) -> f32 {
    if !zoom_level.is_finite() {
        return 100.0;
    }
    zoom_level.clamp(MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL)
}
