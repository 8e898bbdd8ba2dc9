use serde::{Deserialize, Serialize};

use crate::core::{AxisChanges, AxisOrientation, AxisProperty};

/// Observable chart property whose change must be pushed to the renderer.
///
/// Variant order is the push order of a synchronization pass. Axis topics are
/// ordered property first, then X/Y/Z. `Data` comes after every topic whose
/// push can mark it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeTopic {
    BoundingRect,
    Position,
    ZoomLevel,
    CameraRotation,
    Theme,
    Font,
    ShadowQuality,
    SelectionMode,
    GridEnabled,
    BackgroundEnabled,
    Margin,
    BarSpecs,
    FloorLevel,
    BarSeriesMargin,
    Axis(AxisOrientation, AxisProperty),
    SeriesVisuals,
    Data,
    SelectedBar,
}

const GENERAL_TOPICS: [ChangeTopic; 14] = [
    ChangeTopic::BoundingRect,
    ChangeTopic::Position,
    ChangeTopic::ZoomLevel,
    ChangeTopic::CameraRotation,
    ChangeTopic::Theme,
    ChangeTopic::Font,
    ChangeTopic::ShadowQuality,
    ChangeTopic::SelectionMode,
    ChangeTopic::GridEnabled,
    ChangeTopic::BackgroundEnabled,
    ChangeTopic::Margin,
    ChangeTopic::BarSpecs,
    ChangeTopic::FloorLevel,
    ChangeTopic::BarSeriesMargin,
];

const AXIS_TOPIC_START: usize = GENERAL_TOPICS.len();
const AXIS_TOPIC_COUNT: usize = AxisProperty::ALL.len() * AxisOrientation::ALL.len();
const SERIES_TOPIC_START: usize = AXIS_TOPIC_START + AXIS_TOPIC_COUNT;

impl ChangeTopic {
    /// Number of distinct topics.
    pub const COUNT: usize = SERIES_TOPIC_START + 3;

    /// Position of this topic in the push order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::BoundingRect => 0,
            Self::Position => 1,
            Self::ZoomLevel => 2,
            Self::CameraRotation => 3,
            Self::Theme => 4,
            Self::Font => 5,
            Self::ShadowQuality => 6,
            Self::SelectionMode => 7,
            Self::GridEnabled => 8,
            Self::BackgroundEnabled => 9,
            Self::Margin => 10,
            Self::BarSpecs => 11,
            Self::FloorLevel => 12,
            Self::BarSeriesMargin => 13,
            Self::Axis(orientation, property) => {
                AXIS_TOPIC_START
                    + property.index() * AxisOrientation::ALL.len()
                    + orientation.index()
            }
            Self::SeriesVisuals => SERIES_TOPIC_START,
            Self::Data => SERIES_TOPIC_START + 1,
            Self::SelectedBar => SERIES_TOPIC_START + 2,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < AXIS_TOPIC_START {
            return GENERAL_TOPICS.get(index).copied();
        }
        if index < SERIES_TOPIC_START {
            let axis_index = index - AXIS_TOPIC_START;
            let orientations = AxisOrientation::ALL.len();
            return Some(Self::Axis(
                AxisOrientation::ALL[axis_index % orientations],
                AxisProperty::ALL[axis_index / orientations],
            ));
        }
        match index - SERIES_TOPIC_START {
            0 => Some(Self::SeriesVisuals),
            1 => Some(Self::Data),
            2 => Some(Self::SelectedBar),
            _ => None,
        }
    }

    /// Every topic in push order.
    pub fn sync_order() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).filter_map(Self::from_index)
    }

    const fn bit(self) -> u64 {
        1 << self.index()
    }
}

/// Dirty flags, one per [`ChangeTopic`].
///
/// Marking is idempotent and never touches the renderer; only a
/// synchronization pass clears flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    bits: u64,
}

impl Default for ChangeRecord {
    /// A new record has every flag set so the first renderer gets the full state.
    fn default() -> Self {
        Self::all()
    }
}

impl ChangeRecord {
    const ALL_BITS: u64 = if ChangeTopic::COUNT >= 64 {
        u64::MAX
    } else {
        (1 << ChangeTopic::COUNT) - 1
    };

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    pub fn mark(&mut self, topic: ChangeTopic) {
        self.bits |= topic.bit();
    }

    /// Marks the axis topics recorded in `changes` for `orientation`.
    pub fn mark_axis(&mut self, orientation: AxisOrientation, changes: AxisChanges) {
        for property in changes.properties() {
            self.mark(ChangeTopic::Axis(orientation, property));
        }
    }

    /// Marks every property of `orientation`, used when the axis in that slot is replaced.
    pub fn mark_axis_replaced(&mut self, orientation: AxisOrientation) {
        self.mark_axis(orientation, AxisChanges::all());
    }

    #[must_use]
    pub const fn is_marked(self, topic: ChangeTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    pub fn clear(&mut self, topic: ChangeTopic) {
        self.bits &= !topic.bit();
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Marked topics in push order.
    pub fn marked(self) -> impl Iterator<Item = ChangeTopic> {
        ChangeTopic::sync_order().filter(move |topic| self.is_marked(*topic))
    }
}

#[cfg(test)]
mod tests {
    use super::{ChangeRecord, ChangeTopic};
    use crate::core::{AxisOrientation, AxisProperty};

    #[test]
    fn topic_indices_round_trip_in_push_order() {
        let order: Vec<ChangeTopic> = ChangeTopic::sync_order().collect();
        assert_eq!(order.len(), ChangeTopic::COUNT);
        for (index, topic) in order.iter().enumerate() {
            assert_eq!(topic.index(), index);
        }
        assert!(ChangeTopic::COUNT <= 64);
    }

    #[test]
    fn axis_topics_are_grouped_by_property() {
        let type_z = ChangeTopic::Axis(AxisOrientation::Z, AxisProperty::Type);
        let title_x = ChangeTopic::Axis(AxisOrientation::X, AxisProperty::Title);
        assert_eq!(title_x.index(), type_z.index() + 1);
    }

    #[test]
    fn data_follows_topics_that_imply_it() {
        let data = ChangeTopic::Data.index();
        assert!(ChangeTopic::FloorLevel.index() < data);
        for orientation in AxisOrientation::ALL {
            assert!(ChangeTopic::Axis(orientation, AxisProperty::Range).index() < data);
            assert!(ChangeTopic::Axis(orientation, AxisProperty::LabelFormat).index() < data);
        }
        assert!(ChangeTopic::SelectedBar.index() > data);
    }

    #[test]
    fn new_record_has_every_flag_set() {
        let record = ChangeRecord::default();
        assert_eq!(record.marked().count(), ChangeTopic::COUNT);
    }

    #[test]
    fn marking_is_idempotent_and_clear_is_per_topic() {
        let mut record = ChangeRecord::none();
        record.mark(ChangeTopic::Theme);
        record.mark(ChangeTopic::Theme);
        record.mark(ChangeTopic::Data);
        assert_eq!(record.marked().count(), 2);
        record.clear(ChangeTopic::Theme);
        assert!(!record.is_marked(ChangeTopic::Theme));
        assert!(record.is_marked(ChangeTopic::Data));
    }

    #[test]
    fn replaced_axis_marks_all_its_properties_only() {
        let mut record = ChangeRecord::none();
        record.mark_axis_replaced(AxisOrientation::Y);
        assert_eq!(record.marked().count(), AxisProperty::ALL.len());
        assert!(record.marked().all(|topic| matches!(
            topic,
            ChangeTopic::Axis(AxisOrientation::Y, _)
        )));
    }
}
