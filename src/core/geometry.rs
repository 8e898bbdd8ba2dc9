use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::series::SeriesId;

/// World transform of one laid-out data item plus its source position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: Quat,
    pub visible: bool,
    /// Row of the source item (point index for scatter data).
    pub row: usize,
    pub column: usize,
}

/// Laid-out items of one visible series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesGeometry {
    pub series: SeriesId,
    pub visual_index: usize,
    pub items: Vec<ItemTransform>,
}

impl SeriesGeometry {
    #[must_use]
    pub fn item_at(&self, row: usize, column: usize) -> Option<&ItemTransform> {
        self.items
            .iter()
            .find(|item| item.row == row && item.column == column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
