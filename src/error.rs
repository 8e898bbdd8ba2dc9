use thiserror::Error;

use crate::core::{AxisId, AxisOrientation, ChartKind, SeriesDataKind, SeriesId};

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("axis {axis:?} is not owned by this chart")]
    AxisNotOwned { axis: AxisId },

    #[error("axis {axis:?} is active on {active:?} and cannot be attached to {requested:?}")]
    AxisOrientationMismatch {
        axis: AxisId,
        active: AxisOrientation,
        requested: AxisOrientation,
    },

    #[error("series {series:?} is not attached to this chart")]
    UnknownSeries { series: SeriesId },

    #[error("{chart:?} chart cannot hold {data:?} series data")]
    SeriesKindMismatch {
        chart: ChartKind,
        data: SeriesDataKind,
    },
}
