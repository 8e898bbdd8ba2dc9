//! chart3d-rs: toolkit-independent core of a 3D bar, scatter and surface chart.
//!
//! A [`ChartController`] owns chart state and records which properties
//! changed. Once per frame, [`ChartController::synchronize`] pushes those
//! changes in a fixed order to a [`render::ChartRenderer`], which rebuilds
//! scene scaling, floor normalization and per-item transforms on demand.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChangeTopic, ChartConfig, ChartController, SharedChart, SyncOutcome};
pub use error::{ChartError, ChartResult};
