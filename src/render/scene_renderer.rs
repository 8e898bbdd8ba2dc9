use glam::Vec3;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AxisKind, AxisOrientation, BarDimensions, BarLayout, BarSelection, BarSeriesMargin, BarSpecs,
    CameraRotation, ChartKind, FloorNormalization, FontSpec, PointLayout, Rect, ScalingInputs,
    SceneScaling, SelectionMode, Series, SeriesData, SeriesGeometry, SeriesId, Theme,
};
use crate::render::{
    AxisRenderCache, ChartRenderer, RendererCapabilities, ShadowQuality, resolve_shadow_quality,
};

/// Number of derived recomputations performed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RenderStats {
    pub frames: u64,
    pub scaling_passes: u64,
    pub floor_passes: u64,
    pub layout_passes: u64,
    pub tick_passes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PendingWork {
    scaling: bool,
    floor: bool,
    layout: bool,
}

impl PendingWork {
    const ALL: Self = Self {
        scaling: true,
        floor: true,
        layout: true,
    };
}

/// Toolkit-independent renderer that turns pushed chart state into item transforms.
///
/// Pushes only record what changed. [`ChartRenderer::prepare_frame`] then
/// rebuilds scaling, floor normalization and series geometry, each only when
/// one of its inputs was pushed since the previous frame.
#[derive(Debug)]
pub struct SceneRenderer {
    kind: ChartKind,
    capabilities: RendererCapabilities,
    bounding_rect: Rect,
    zoom_level: f32,
    camera: CameraRotation,
    theme: Theme,
    font: FontSpec,
    shadow_quality: ShadowQuality,
    selection_mode: SelectionMode,
    grid_enabled: bool,
    background_enabled: bool,
    requested_margin: f32,
    dimensions: BarDimensions,
    floor_level: f32,
    series_margin: BarSeriesMargin,
    axes: [AxisRenderCache; 3],
    series: Vec<Series>,
    selected_bar: Option<BarSelection>,
    scaling: SceneScaling,
    floor: FloorNormalization,
    window: (usize, usize),
    geometry: IndexMap<SeriesId, SeriesGeometry>,
    pending: PendingWork,
    stats: RenderStats,
}

impl SceneRenderer {
    #[must_use]
    pub fn new(kind: ChartKind, capabilities: RendererCapabilities) -> Self {
        Self {
            kind,
            capabilities,
            bounding_rect: Rect::default(),
            zoom_level: 100.0,
            camera: CameraRotation::default(),
            theme: Theme::default(),
            font: FontSpec::default(),
            shadow_quality: ShadowQuality::None,
            selection_mode: SelectionMode::default(),
            grid_enabled: true,
            background_enabled: true,
            requested_margin: -1.0,
            dimensions: BarDimensions::default(),
            floor_level: 0.0,
            series_margin: BarSeriesMargin::default(),
            axes: Default::default(),
            series: Vec::new(),
            selected_bar: None,
            scaling: SceneScaling::default(),
            floor: FloorNormalization::default(),
            window: (0, 0),
            geometry: IndexMap::new(),
            // The first frame derives everything, whatever was pushed.
            pending: PendingWork::ALL,
            stats: RenderStats::default(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub const fn capabilities(&self) -> RendererCapabilities {
        self.capabilities
    }

    #[must_use]
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    #[must_use]
    pub const fn bounding_rect(&self) -> Rect {
        self.bounding_rect
    }

    #[must_use]
    pub const fn zoom_level(&self) -> f32 {
        self.zoom_level
    }

    #[must_use]
    pub const fn camera_rotation(&self) -> CameraRotation {
        self.camera
    }

    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    #[must_use]
    pub const fn shadow_quality(&self) -> ShadowQuality {
        self.shadow_quality
    }

    #[must_use]
    pub const fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    #[must_use]
    pub const fn is_grid_enabled(&self) -> bool {
        self.grid_enabled
    }

    #[must_use]
    pub const fn is_background_enabled(&self) -> bool {
        self.background_enabled
    }

    #[must_use]
    pub const fn selected_bar(&self) -> Option<BarSelection> {
        self.selected_bar
    }

    #[must_use]
    pub const fn floor_level(&self) -> f32 {
        self.floor_level
    }

    #[must_use]
    pub const fn scaling(&self) -> &SceneScaling {
        &self.scaling
    }

    #[must_use]
    pub const fn floor_normalization(&self) -> &FloorNormalization {
        &self.floor
    }

    #[must_use]
    pub fn axis_cache(&self, orientation: AxisOrientation) -> &AxisRenderCache {
        &self.axes[orientation.index()]
    }

    #[must_use]
    pub fn geometry(&self, series: SeriesId) -> Option<&SeriesGeometry> {
        self.geometry.get(&series)
    }

    /// Geometry of visible series in visual order.
    pub fn geometries(&self) -> impl Iterator<Item = &SeriesGeometry> {
        self.geometry.values()
    }

    #[must_use]
    pub fn mesh_file_name(&self, series: SeriesId) -> Option<String> {
        self.series
            .iter()
            .find(|candidate| candidate.id() == series)
            .map(|candidate| candidate.mesh_file_name(self.background_enabled))
    }

    /// Camera pitch limits keeping the floor side of bars in view.
    #[must_use]
    pub fn vertical_rotation_limits(&self) -> (f32, f32) {
        match self.kind {
            ChartKind::Bars => self.floor.vertical_rotation_limits(),
            ChartKind::Scatter | ChartKind::Surface => (-90.0, 90.0),
        }
    }

    /// Scene scale of the background box.
    #[must_use]
    pub fn background_scale(&self) -> Vec3 {
        match self.kind {
            ChartKind::Bars => self.scaling.background_scale,
            ChartKind::Scatter | ChartKind::Surface => {
                Vec3::ONE + Vec3::splat(self.requested_margin.max(0.0))
            }
        }
    }

    /// Bar placement parameters as of the last prepared frame.
    #[must_use]
    pub fn bar_layout(&self) -> BarLayout {
        BarLayout {
            scaling: self.scaling,
            floor: self.floor,
            spacing: self.dimensions.spacing,
            series_margin: self.series_margin,
            first_row: self.window.0,
            first_column: self.window.1,
        }
    }

    #[must_use]
    pub fn point_layout(&self) -> PointLayout {
        PointLayout {
            x: self.axes[AxisOrientation::X.index()].helper(),
            y: self.axes[AxisOrientation::Y.index()].helper(),
            z: self.axes[AxisOrientation::Z.index()].helper(),
            graph_scale: Vec3::ONE,
        }
    }

    /// Scene coordinate of the label for category `index` along a bar chart axis.
    #[must_use]
    pub fn category_label_position(&self, orientation: AxisOrientation, index: usize) -> f32 {
        let layout = self.bar_layout();
        match orientation {
            AxisOrientation::X => layout.column_label_position(index),
            AxisOrientation::Z => layout.row_label_position(index),
            AxisOrientation::Y => layout.floor_grid_position(),
        }
    }

    /// Scene coordinate of grid line `index` along a bar chart axis.
    #[must_use]
    pub fn category_grid_line_position(&self, orientation: AxisOrientation, index: usize) -> f32 {
        let layout = self.bar_layout();
        match orientation {
            AxisOrientation::X => layout.column_grid_line_position(index),
            AxisOrientation::Z => layout.row_grid_line_position(index),
            AxisOrientation::Y => layout.floor_grid_position(),
        }
    }

    fn recompute_scaling(&mut self) {
        let (first_column, column_count) = self.axes[AxisOrientation::X.index()].category_window();
        let (first_row, row_count) = self.axes[AxisOrientation::Z.index()].category_window();
        self.window = (first_row, first_column);
        self.scaling = SceneScaling::compute(ScalingInputs {
            row_count,
            column_count,
            dimensions: self.dimensions,
            series_margin: self.series_margin.margin,
            requested_margin: self.requested_margin,
        });
        self.stats.scaling_passes += 1;
        debug!(
            row_count,
            column_count,
            scale_factor = self.scaling.scale_factor,
            "recomputed bar scene scaling"
        );
    }

    fn recompute_floor(&mut self) {
        let axis = &self.axes[AxisOrientation::Y.index()];
        let (min, max) = axis.range();
        self.floor
            .recompute(min, max, self.floor_level, axis.is_reversed());
        self.stats.floor_passes += 1;
    }

    fn relayout(&mut self) {
        let visible: Vec<&Series> = self.series.iter().filter(|s| s.is_visible()).collect();
        let visible_count = visible.len();
        let bar_layout = self.bar_layout();
        let point_layout = self.point_layout();

        let mut geometry = IndexMap::with_capacity(visible_count);
        for (visual_index, series) in visible.into_iter().enumerate() {
            let items = match (self.kind, series.data()) {
                (ChartKind::Bars, SeriesData::Bars(data)) => {
                    bar_layout.layout_series(data, visual_index, visible_count)
                }
                (ChartKind::Scatter, SeriesData::Scatter(items)) => {
                    point_layout.layout_scatter(items)
                }
                (ChartKind::Surface, SeriesData::Surface(data)) => {
                    point_layout.layout_surface(data)
                }
                _ => {
                    trace!(series = series.id().raw(), "skipping series of foreign kind");
                    continue;
                }
            };
            geometry.insert(
                series.id(),
                SeriesGeometry {
                    series: series.id(),
                    visual_index,
                    items,
                },
            );
        }

        self.geometry = geometry;
        self.stats.layout_passes += 1;
        debug!(
            visible_series = visible_count,
            items = self.geometry.values().map(SeriesGeometry::len).sum::<usize>(),
            "laid out series geometry"
        );
    }

    fn on_axis_geometry_change(&mut self, orientation: AxisOrientation) {
        match (self.kind, orientation) {
            (ChartKind::Bars, AxisOrientation::Y) => self.pending.floor = true,
            (ChartKind::Bars, AxisOrientation::X | AxisOrientation::Z) => {
                self.pending.scaling = true;
            }
            (ChartKind::Scatter | ChartKind::Surface, _) => self.pending.layout = true,
        }
    }
}

impl ChartRenderer for SceneRenderer {
    fn update_bounding_rect(&mut self, rect: Rect) {
        self.bounding_rect = rect;
    }

    fn update_position(&mut self, rect: Rect) {
        self.bounding_rect.x = rect.x;
        self.bounding_rect.y = rect.y;
    }

    fn update_zoom_level(&mut self, zoom_level: f32) {
        self.zoom_level = zoom_level;
    }

    fn update_camera_rotation(&mut self, rotation: CameraRotation) {
        self.camera = rotation;
    }

    fn update_theme(&mut self, theme: &Theme) {
        self.theme = theme.clone();
    }

    fn update_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn update_shadow_quality(&mut self, requested: ShadowQuality) -> ShadowQuality {
        self.shadow_quality = resolve_shadow_quality(requested, self.capabilities);
        self.shadow_quality
    }

    fn update_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
    }

    fn update_grid_enabled(&mut self, enabled: bool) {
        self.grid_enabled = enabled;
    }

    fn update_background_enabled(&mut self, enabled: bool) {
        self.background_enabled = enabled;
    }

    fn update_margin(&mut self, margin: f32) {
        if self.requested_margin != margin {
            self.requested_margin = margin;
            self.pending.scaling = true;
        }
    }

    fn update_bar_specs(&mut self, specs: BarSpecs) {
        let dimensions = specs.dimensions();
        if self.dimensions != dimensions {
            self.dimensions = dimensions;
            self.pending.scaling = true;
        }
    }

    fn update_floor_level(&mut self, level: f32) {
        if self.floor_level != level {
            self.floor_level = level;
            self.pending.floor = true;
        }
    }

    fn update_bar_series_margin(&mut self, margin: BarSeriesMargin) {
        if self.series_margin != margin {
            self.series_margin = margin;
            self.pending.scaling = true;
        }
    }

    fn update_axis_type(&mut self, orientation: AxisOrientation, kind: AxisKind) {
        self.axes[orientation.index()].set_kind(kind);
    }

    fn update_axis_title(&mut self, orientation: AxisOrientation, title: &str) {
        self.axes[orientation.index()].set_title(title);
    }

    fn update_axis_labels(&mut self, orientation: AxisOrientation, labels: &[String]) {
        self.axes[orientation.index()].set_labels(labels);
    }

    fn update_axis_range(&mut self, orientation: AxisOrientation, min: f32, max: f32) {
        if self.axes[orientation.index()].set_range(min, max) {
            self.on_axis_geometry_change(orientation);
        }
    }

    fn update_axis_segment_count(&mut self, orientation: AxisOrientation, count: u32) {
        self.axes[orientation.index()].set_segment_count(count);
    }

    fn update_axis_sub_segment_count(&mut self, orientation: AxisOrientation, count: u32) {
        self.axes[orientation.index()].set_sub_segment_count(count);
    }

    fn update_axis_label_format(&mut self, orientation: AxisOrientation, format: &str) {
        self.axes[orientation.index()].set_label_format(format);
    }

    fn update_axis_reversed(&mut self, orientation: AxisOrientation, reversed: bool) {
        if self.axes[orientation.index()].set_reversed(reversed) {
            match (self.kind, orientation) {
                (ChartKind::Bars, AxisOrientation::Y) => self.pending.floor = true,
                (ChartKind::Bars, _) => {}
                (ChartKind::Scatter | ChartKind::Surface, _) => self.pending.layout = true,
            }
        }
    }

    fn update_series_visuals(&mut self, series: &[Series]) {
        self.series = series.to_vec();
        self.pending.layout = true;
    }

    fn update_data(&mut self, series: &[Series]) {
        self.series = series.to_vec();
        self.pending.layout = true;
    }

    fn update_selected_bar(&mut self, selection: Option<BarSelection>) {
        self.selected_bar = selection;
    }

    fn prepare_frame(&mut self) {
        self.stats.frames += 1;
        let pending = std::mem::take(&mut self.pending);
        let mut relayout = pending.layout;

        if self.kind == ChartKind::Bars {
            if pending.scaling {
                self.recompute_scaling();
                relayout = true;
            }
            if pending.floor {
                self.recompute_floor();
                relayout = true;
            }
        }
        if relayout {
            self.relayout();
        }
        for axis in &mut self.axes {
            if axis.refresh_ticks() {
                self.stats.tick_passes += 1;
            }
        }
    }
}
