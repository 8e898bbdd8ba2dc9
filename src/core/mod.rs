pub mod axis;
pub mod axis_helper;
pub mod bar_layout;
pub mod bar_specs;
pub mod chart_kind;
pub mod data;
pub mod floor_normalization;
pub mod geometry;
pub mod label_format;
pub mod point_layout;
pub mod scene_scaling;
pub mod series;
pub mod types;

pub use axis::{Axis, AxisChanges, AxisId, AxisKind, AxisOrientation, AxisProperty};
pub use axis_helper::AxisHelper;
pub use bar_layout::{BarLayout, SeriesOffset};
pub use bar_specs::{BarDimensions, BarSeriesMargin, BarSpecs};
pub use chart_kind::ChartKind;
pub use data::{BarDataArray, BarDataSource, BarItem, ScatterItem, SurfaceDataArray};
pub use floor_normalization::FloorNormalization;
pub use geometry::{ItemTransform, SeriesGeometry};
pub use label_format::format_axis_label;
pub use point_layout::PointLayout;
pub use scene_scaling::{ScalingInputs, SceneScaling};
pub use series::{
    BarSelection, MeshShape, Series, SeriesData, SeriesDataKind, SeriesId, mesh_file_name,
};
pub use types::{CameraRotation, Color, FontSpec, Rect, SelectionMode, Theme};
