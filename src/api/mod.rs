mod axis_lifecycle;
mod change_tracker;
mod config;
mod controller;
mod series_controller;
mod shared;
mod synchronizer;

pub use change_tracker::{ChangeRecord, ChangeTopic};
pub use config::{ChartConfig, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};
pub use controller::ChartController;
pub use shared::SharedChart;
pub use synchronizer::SyncOutcome;
