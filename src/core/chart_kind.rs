use serde::{Deserialize, Serialize};

use crate::core::axis::{AxisKind, AxisOrientation};
use crate::core::series::SeriesDataKind;

/// Chart family. Selects default axes, accepted series and the layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChartKind {
    #[default]
    Bars,
    Scatter,
    Surface,
}

impl ChartKind {
    /// Kind of the axis substituted when `orientation` has none.
    ///
    /// Bar charts index columns along X and rows along Z, so those default to
    /// category axes; everything else is a value axis.
    #[must_use]
    pub const fn default_axis_kind(self, orientation: AxisOrientation) -> AxisKind {
        match (self, orientation) {
            (Self::Bars, AxisOrientation::X | AxisOrientation::Z) => AxisKind::Category,
            _ => AxisKind::Value,
        }
    }

    #[must_use]
    pub const fn accepts(self, data: SeriesDataKind) -> bool {
        matches!(
            (self, data),
            (Self::Bars, SeriesDataKind::Bars)
                | (Self::Scatter, SeriesDataKind::Scatter)
                | (Self::Surface, SeriesDataKind::Surface)
        )
    }
}
