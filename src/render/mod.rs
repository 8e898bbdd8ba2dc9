mod axis_cache;
mod null_renderer;
mod scene_renderer;
mod shadow;

pub use axis_cache::{AxisRenderCache, AxisTicks};
pub use null_renderer::NullRenderer;
pub use scene_renderer::{RenderStats, SceneRenderer};
pub use shadow::{RendererCapabilities, ShadowQuality, resolve_shadow_quality};

use crate::core::{
    AxisKind, AxisOrientation, BarSelection, BarSeriesMargin, BarSpecs, CameraRotation, FontSpec,
    Rect, SelectionMode, Series, Theme,
};

/// Receiving end of controller synchronization.
///
/// Each method is one push of a dirty property. The controller calls them in a
/// fixed order, at most once per property per pass, and only while it holds the
/// change record, so implementations never see partially applied state.
/// Expensive derived work belongs in [`ChartRenderer::prepare_frame`].
pub trait ChartRenderer {
    fn update_bounding_rect(&mut self, rect: Rect);

    fn update_position(&mut self, rect: Rect);

    fn update_zoom_level(&mut self, zoom_level: f32);

    fn update_camera_rotation(&mut self, rotation: CameraRotation);

    fn update_theme(&mut self, theme: &Theme);

    fn update_font(&mut self, font: &FontSpec);

    /// Applies the best supported quality at or below `requested` and returns it.
    fn update_shadow_quality(&mut self, requested: ShadowQuality) -> ShadowQuality;

    fn update_selection_mode(&mut self, mode: SelectionMode);

    fn update_grid_enabled(&mut self, enabled: bool);

    fn update_background_enabled(&mut self, enabled: bool);

    fn update_margin(&mut self, margin: f32);

    fn update_bar_specs(&mut self, specs: BarSpecs);

    fn update_floor_level(&mut self, level: f32);

    fn update_bar_series_margin(&mut self, margin: BarSeriesMargin);

    fn update_axis_type(&mut self, orientation: AxisOrientation, kind: AxisKind);

    fn update_axis_title(&mut self, orientation: AxisOrientation, title: &str);

    fn update_axis_labels(&mut self, orientation: AxisOrientation, labels: &[String]);

    fn update_axis_range(&mut self, orientation: AxisOrientation, min: f32, max: f32);

    fn update_axis_segment_count(&mut self, orientation: AxisOrientation, count: u32);

    fn update_axis_sub_segment_count(&mut self, orientation: AxisOrientation, count: u32);

    fn update_axis_label_format(&mut self, orientation: AxisOrientation, format: &str);

    fn update_axis_reversed(&mut self, orientation: AxisOrientation, reversed: bool);

    /// Series list snapshot after visibility, mesh or ordering changes.
    fn update_series_visuals(&mut self, series: &[Series]);

    /// Series list snapshot after data changes.
    fn update_data(&mut self, series: &[Series]);

    fn update_selected_bar(&mut self, selection: Option<BarSelection>);

    /// Called once at the end of every synchronization pass.
    fn prepare_frame(&mut self) {}
}
