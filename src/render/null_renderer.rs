use crate::core::{
    AxisKind, AxisOrientation, BarSelection, BarSeriesMargin, BarSpecs, CameraRotation, FontSpec,
    Rect, SelectionMode, Series, Theme,
};
use crate::render::{ChartRenderer, RendererCapabilities, ShadowQuality, resolve_shadow_quality};

/// Renderer that only counts pushes, for tests and headless controller usage.
///
/// It still applies the shadow capability fallback so controllers observe the
/// same effective quality a real backend would report.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub capabilities: RendererCapabilities,
    pub push_count: usize,
    pub frame_count: usize,
    pub last_shadow_quality: Option<ShadowQuality>,
    pub last_series_count: usize,
}

impl NullRenderer {
    #[must_use]
    pub fn with_capabilities(capabilities: RendererCapabilities) -> Self {
        Self {
            capabilities,
            ..Self::default()
        }
    }

    fn record(&mut self) {
        self.push_count += 1;
    }
}

impl ChartRenderer for NullRenderer {
    fn update_bounding_rect(&mut self, _rect: Rect) {
        self.record();
    }

    fn update_position(&mut self, _rect: Rect) {
        self.record();
    }

    fn update_zoom_level(&mut self, _zoom_level: f32) {
        self.record();
    }

    fn update_camera_rotation(&mut self, _rotation: CameraRotation) {
        self.record();
    }

    fn update_theme(&mut self, _theme: &Theme) {
        self.record();
    }

    fn update_font(&mut self, _font: &FontSpec) {
        self.record();
    }

    fn update_shadow_quality(&mut self, requested: ShadowQuality) -> ShadowQuality {
        self.record();
        let effective = resolve_shadow_quality(requested, self.capabilities);
        self.last_shadow_quality = Some(effective);
        effective
    }

    fn update_selection_mode(&mut self, _mode: SelectionMode) {
        self.record();
    }

    fn update_grid_enabled(&mut self, _enabled: bool) {
        self.record();
    }

    fn update_background_enabled(&mut self, _enabled: bool) {
        self.record();
    }

    fn update_margin(&mut self, _margin: f32) {
        self.record();
    }

    fn update_bar_specs(&mut self, _specs: BarSpecs) {
        self.record();
    }

    fn update_floor_level(&mut self, _level: f32) {
        self.record();
    }

    fn update_bar_series_margin(&mut self, _margin: BarSeriesMargin) {
        self.record();
    }

    fn update_axis_type(&mut self, _orientation: AxisOrientation, _kind: AxisKind) {
        self.record();
    }

    fn update_axis_title(&mut self, _orientation: AxisOrientation, _title: &str) {
        self.record();
    }

    fn update_axis_labels(&mut self, _orientation: AxisOrientation, _labels: &[String]) {
        self.record();
    }

    fn update_axis_range(&mut self, _orientation: AxisOrientation, _min: f32, _max: f32) {
        self.record();
    }

    fn update_axis_segment_count(&mut self, _orientation: AxisOrientation, _count: u32) {
        self.record();
    }

    fn update_axis_sub_segment_count(&mut self, _orientation: AxisOrientation, _count: u32) {
        self.record();
    }

    fn update_axis_label_format(&mut self, _orientation: AxisOrientation, _format: &str) {
        self.record();
    }

    fn update_axis_reversed(&mut self, _orientation: AxisOrientation, _reversed: bool) {
        self.record();
    }

    fn update_series_visuals(&mut self, series: &[Series]) {
        self.record();
        self.last_series_count = series.len();
    }

    fn update_data(&mut self, series: &[Series]) {
        self.record();
        self.last_series_count = series.len();
    }

    fn update_selected_bar(&mut self, _selection: Option<BarSelection>) {
        self.record();
    }

    fn prepare_frame(&mut self) {
        self.frame_count += 1;
    }
}
