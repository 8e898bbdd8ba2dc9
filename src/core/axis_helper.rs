use serde::{Deserialize, Serialize};

/// Smallest span or normalizer used in divisions; degenerate ranges collapse to it.
pub const MIN_NORMALIZER: f32 = 1.0e-6;

/// Maps axis values to normalized `[0, 1]` positions along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisHelper {
    min: f32,
    max: f32,
    reversed: bool,
}

impl AxisHelper {
    #[must_use]
    pub const fn new(min: f32, max: f32, reversed: bool) -> Self {
        Self { min, max, reversed }
    }

    #[must_use]
    pub const fn range(self) -> (f32, f32) {
        (self.min, self.max)
    }

    #[must_use]
    pub const fn is_reversed(self) -> bool {
        self.reversed
    }

    /// Span used as divisor, never below [`MIN_NORMALIZER`].
    #[must_use]
    pub fn span(self) -> f32 {
        (self.max - self.min).max(MIN_NORMALIZER)
    }

    /// Position measured from the axis minimum, ignoring reversal.
    #[must_use]
    pub fn position_at(self, value: f32) -> f32 {
        (value - self.min) / self.span()
    }

    /// Position as seen on screen: flipped when the axis is reversed.
    #[must_use]
    pub fn item_position_at(self, value: f32) -> f32 {
        let position = self.position_at(value);
        if self.reversed { 1.0 - position } else { position }
    }

    /// Inverse of [`AxisHelper::item_position_at`].
    #[must_use]
    pub fn value_at(self, position: f32) -> f32 {
        let position = if self.reversed {
            1.0 - position
        } else {
            position
        };
        self.min + position * (self.max - self.min)
    }
}
