use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};

/// Scene direction an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxisOrientation {
    X,
    Y,
    Z,
}

impl AxisOrientation {
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AxisKind {
    #[default]
    Value,
    Category,
}

/// Process-unique axis identity. Survives moves between chart slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AxisId(u64);

impl AxisId {
    fn next() -> Self {
        static NEXT_AXIS_ID: AtomicU64 = AtomicU64::new(1);
        Self(NEXT_AXIS_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Axis property whose change has to reach the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AxisProperty {
    Type,
    Title,
    Labels,
    Range,
    SegmentCount,
    SubSegmentCount,
    LabelFormat,
    Reversed,
}

impl AxisProperty {
    pub const ALL: [Self; 8] = [
        Self::Type,
        Self::Title,
        Self::Labels,
        Self::Range,
        Self::SegmentCount,
        Self::SubSegmentCount,
        Self::LabelFormat,
        Self::Reversed,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Type => 0,
            Self::Title => 1,
            Self::Labels => 2,
            Self::Range => 3,
            Self::SegmentCount => 4,
            Self::SubSegmentCount => 5,
            Self::LabelFormat => 6,
            Self::Reversed => 7,
        }
    }

    const fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// Properties mutated on an axis since the owning chart last drained them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AxisChanges {
    bits: u8,
    auto_adjust_enabled: bool,
}

impl AxisChanges {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            bits: 0,
            auto_adjust_enabled: false,
        }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: u8::MAX,
            auto_adjust_enabled: false,
        }
    }

    #[must_use]
    pub const fn with_property(self, property: AxisProperty) -> Self {
        Self {
            bits: self.bits | property.bit(),
            auto_adjust_enabled: self.auto_adjust_enabled,
        }
    }

    #[must_use]
    pub const fn contains(self, property: AxisProperty) -> bool {
        (self.bits & property.bit()) != 0
    }

    /// Whether range auto-adjustment was switched on and ranges must follow data again.
    #[must_use]
    pub const fn auto_adjust_enabled(self) -> bool {
        self.auto_adjust_enabled
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0 && !self.auto_adjust_enabled
    }

    pub fn properties(self) -> impl Iterator<Item = AxisProperty> {
        AxisProperty::ALL
            .into_iter()
            .filter(move |property| self.contains(*property))
    }
}

/// One chart axis: presentation properties plus ownership bookkeeping.
///
/// Axes are created detached. A chart adopts them through `set_axis` or
/// `add_axis`; mutations made while the axis is active are reported back to
/// the chart through [`Axis::take_changes`].
#[derive(Debug)]
pub struct Axis {
    id: AxisId,
    kind: AxisKind,
    title: String,
    labels: Vec<String>,
    min: f32,
    max: f32,
    segment_count: u32,
    sub_segment_count: u32,
    label_format: String,
    auto_adjust_range: bool,
    reversed: bool,
    orientation: Option<AxisOrientation>,
    is_default: bool,
    pending: AxisChanges,
}

impl Axis {
    fn with_kind(kind: AxisKind) -> Self {
        Self {
            id: AxisId::next(),
            kind,
            title: String::new(),
            labels: Vec::new(),
            min: 0.0,
            max: 0.0,
            segment_count: 1,
            sub_segment_count: 1,
            label_format: String::new(),
            auto_adjust_range: true,
            reversed: false,
            orientation: None,
            is_default: false,
            pending: AxisChanges::none(),
        }
    }

    /// Value axis with range `[0, 10]`, five segments and `%.2f` labels.
    #[must_use]
    pub fn value() -> Self {
        let mut axis = Self::with_kind(AxisKind::Value);
        axis.max = 10.0;
        axis.segment_count = 5;
        axis.label_format = "%.2f".to_owned();
        axis
    }

    /// Category axis; its range spans category indices.
    #[must_use]
    pub fn category() -> Self {
        Self::with_kind(AxisKind::Category)
    }

    /// Chart-owned axis substituted when an orientation would otherwise be empty.
    #[must_use]
    pub(crate) fn default_for(kind: AxisKind) -> Self {
        let mut axis = Self::with_kind(kind);
        axis.is_default = true;
        axis
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_range(mut self, min: f32, max: f32) -> ChartResult<Self> {
        self.set_range(min, max)?;
        self.pending = AxisChanges::none();
        Ok(self)
    }

    #[must_use]
    pub fn with_label_format(mut self, format: impl Into<String>) -> Self {
        self.label_format = format.into();
        self
    }

    #[must_use]
    pub fn with_reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    #[must_use]
    pub const fn id(&self) -> AxisId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> AxisKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub const fn min(&self) -> f32 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    #[must_use]
    pub const fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    #[must_use]
    pub const fn segment_count(&self) -> u32 {
        self.segment_count
    }

    #[must_use]
    pub const fn sub_segment_count(&self) -> u32 {
        self.sub_segment_count
    }

    #[must_use]
    pub fn label_format(&self) -> &str {
        &self.label_format
    }

    #[must_use]
    pub const fn auto_adjust_range(&self) -> bool {
        self.auto_adjust_range
    }

    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Orientation this axis is currently active on, `None` when detached.
    #[must_use]
    pub const fn orientation(&self) -> Option<AxisOrientation> {
        self.orientation
    }

    /// Whether the chart created this axis and manages its lifetime.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.is_default
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        if self.title != title {
            self.title = title;
            self.record(AxisProperty::Title);
        }
    }

    pub fn set_labels(&mut self, labels: Vec<String>) {
        if self.labels != labels {
            self.labels = labels;
            self.record(AxisProperty::Labels);
        }
    }

    /// Sets an explicit range and turns range auto-adjustment off.
    pub fn set_range(&mut self, min: f32, max: f32) -> ChartResult<()> {
        validate_range(min, max)?;
        self.auto_adjust_range = false;
        self.apply_range(min, max);
        Ok(())
    }

    /// Moves the lower bound, dragging the upper bound along when it would invert the range.
    pub fn set_min(&mut self, min: f32) -> ChartResult<()> {
        let max = if min > self.max { min } else { self.max };
        self.set_range(min, max)
    }

    /// Moves the upper bound, dragging the lower bound along when it would invert the range.
    pub fn set_max(&mut self, max: f32) -> ChartResult<()> {
        let min = if max < self.min { max } else { self.min };
        self.set_range(min, max)
    }

    /// Segment counts below one are raised to one.
    pub fn set_segment_count(&mut self, count: u32) {
        let count = clamp_segment_count(count, "segment");
        if self.segment_count != count {
            self.segment_count = count;
            self.record(AxisProperty::SegmentCount);
        }
    }

    /// Sub-segment counts below one are raised to one.
    pub fn set_sub_segment_count(&mut self, count: u32) {
        let count = clamp_segment_count(count, "sub-segment");
        if self.sub_segment_count != count {
            self.sub_segment_count = count;
            self.record(AxisProperty::SubSegmentCount);
        }
    }

    pub fn set_label_format(&mut self, format: impl Into<String>) {
        let format = format.into();
        if self.label_format != format {
            self.label_format = format;
            self.record(AxisProperty::LabelFormat);
        }
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        if self.reversed != reversed {
            self.reversed = reversed;
            self.record(AxisProperty::Reversed);
        }
    }

    pub fn set_auto_adjust_range(&mut self, auto_adjust: bool) {
        if self.auto_adjust_range == auto_adjust {
            return;
        }
        self.auto_adjust_range = auto_adjust;
        if auto_adjust {
            self.pending.auto_adjust_enabled = true;
        }
    }

    /// Drains the properties changed since the previous call.
    pub fn take_changes(&mut self) -> AxisChanges {
        std::mem::take(&mut self.pending)
    }

    /// Range update computed from data; keeps auto-adjustment enabled.
    pub(crate) fn set_auto_range(&mut self, min: f32, max: f32) {
        if validate_range(min, max).is_ok() {
            self.apply_range(min, max);
        }
    }

    pub(crate) fn attach(&mut self, orientation: AxisOrientation) {
        self.orientation = Some(orientation);
        self.pending = AxisChanges::none();
    }

    pub(crate) fn detach(&mut self) {
        self.orientation = None;
        self.pending = AxisChanges::none();
    }

    pub(crate) fn release_ownership(&mut self) {
        self.detach();
        self.is_default = false;
    }

    fn apply_range(&mut self, min: f32, max: f32) {
        if self.min != min || self.max != max {
            self.min = min;
            self.max = max;
            self.record(AxisProperty::Range);
        }
    }

    fn record(&mut self, property: AxisProperty) {
        trace!(axis = self.id.raw(), ?property, "axis property changed");
        self.pending = self.pending.with_property(property);
    }
}

fn validate_range(min: f32, max: f32) -> ChartResult<()> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ChartError::InvalidData(
            "axis range must be finite".to_owned(),
        ));
    }
    if min > max {
        return Err(ChartError::InvalidData(
            "axis range min must be <= max".to_owned(),
        ));
    }
    Ok(())
}

fn clamp_segment_count(count: u32, what: &str) -> u32 {
    if count == 0 {
        warn!(count_kind = what, "axis count must be at least 1, using 1");
        return 1;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisChanges, AxisKind, AxisProperty};

    #[test]
    fn new_axes_get_distinct_ids_and_are_detached() {
        let first = Axis::value();
        let second = Axis::value();
        assert_ne!(first.id(), second.id());
        assert!(first.orientation().is_none());
        assert!(!first.is_default());
    }

    #[test]
    fn default_axis_uses_single_segment_and_auto_range() {
        let axis = Axis::default_for(AxisKind::Value);
        assert!(axis.is_default());
        assert_eq!(axis.segment_count(), 1);
        assert_eq!(axis.sub_segment_count(), 1);
        assert!(axis.auto_adjust_range());
        assert!(axis.label_format().is_empty());
    }

    #[test]
    fn explicit_range_disables_auto_adjust_and_records_change() {
        let mut axis = Axis::value();
        axis.set_range(-5.0, 5.0).expect("valid range");
        assert!(!axis.auto_adjust_range());
        let changes = axis.take_changes();
        assert!(changes.contains(AxisProperty::Range));
        assert!(axis.take_changes().is_none());
    }

    #[test]
    fn inverted_or_non_finite_range_is_rejected() {
        let mut axis = Axis::value();
        assert!(axis.set_range(2.0, 1.0).is_err());
        assert!(axis.set_range(f32::NAN, 1.0).is_err());
        assert_eq!(axis.range(), (0.0, 10.0));
    }

    #[test]
    fn set_min_above_max_drags_max_along() {
        let mut axis = Axis::value();
        axis.set_min(20.0).expect("finite min");
        assert_eq!(axis.range(), (20.0, 20.0));
    }

    #[test]
    fn zero_segment_count_is_raised_to_one() {
        let mut axis = Axis::value();
        axis.set_segment_count(0);
        assert_eq!(axis.segment_count(), 1);
        axis.set_sub_segment_count(0);
        assert_eq!(axis.sub_segment_count(), 1);
    }

    #[test]
    fn unchanged_values_do_not_record_changes() {
        let mut axis = Axis::value().with_title("Sales");
        axis.set_title("Sales");
        axis.set_reversed(false);
        assert_eq!(axis.take_changes(), AxisChanges::none());
    }

    #[test]
    fn enabling_auto_adjust_is_reported_separately() {
        let mut axis = Axis::value().with_range(0.0, 1.0).expect("valid range");
        axis.set_auto_adjust_range(true);
        let changes = axis.take_changes();
        assert!(changes.auto_adjust_enabled());
        assert_eq!(changes.properties().count(), 0);
    }
}
