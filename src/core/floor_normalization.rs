use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::axis_helper::{AxisHelper, MIN_NORMALIZER};

/// Value-axis normalization for bar heights relative to the floor level.
///
/// Recomputed only when the value-axis range, its reversal or the floor level
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorNormalization {
    pub min: f32,
    pub max: f32,
    pub reversed: bool,
    /// Floor level clamped into `[min, max]`.
    pub actual_floor_level: f32,
    pub has_negative_values: bool,
    /// `true` when the floor sits at or beyond a range extreme.
    pub no_zero_in_range: bool,
    pub height_normalizer: f32,
    pub gradient_fraction: f32,
    pub background_adjustment: f32,
}

impl Default for FloorNormalization {
    fn default() -> Self {
        Self::compute(0.0, 1.0, 0.0, false)
    }
}

impl FloorNormalization {
    #[must_use]
    pub fn compute(min: f32, max: f32, floor_level: f32, reversed: bool) -> Self {
        let actual_floor_level = floor_level.clamp(min.min(max), max.max(min));
        let mut max_abs = (max - actual_floor_level).abs();
        let has_negative_values = min < actual_floor_level;

        let raw_normalizer = if max < actual_floor_level {
            max_abs = max.abs() - min.abs();
            min.abs() - max.abs()
        } else {
            max - min
        };
        let height_normalizer = if raw_normalizer > MIN_NORMALIZER {
            raw_normalizer
        } else {
            MIN_NORMALIZER
        };

        let (no_zero_in_range, gradient_fraction) =
            if max <= actual_floor_level || min >= actual_floor_level {
                (true, 2.0)
            } else {
                let below = (min - actual_floor_level).abs();
                (false, below.max(max_abs) / height_normalizer * 2.0)
            };

        let mut background_adjustment = ((max_abs / height_normalizer).clamp(0.0, 1.0) - 0.5) * 2.0;
        if reversed {
            background_adjustment = -background_adjustment;
        }

        debug!(
            min,
            max,
            actual_floor_level,
            height_normalizer,
            background_adjustment,
            "recomputed floor normalization"
        );

        Self {
            min,
            max,
            reversed,
            actual_floor_level,
            has_negative_values,
            no_zero_in_range,
            height_normalizer,
            gradient_fraction,
            background_adjustment,
        }
    }

    pub fn recompute(&mut self, min: f32, max: f32, floor_level: f32, reversed: bool) {
        *self = Self::compute(min, max, floor_level, reversed);
    }

    /// Normalized position of the floor along the value axis.
    #[must_use]
    pub fn zero_position(&self) -> f32 {
        self.helper().position_at(self.actual_floor_level)
    }

    /// Signed bar height for `value` in normalized units.
    ///
    /// With a sign crossing the height is measured from the floor. Otherwise
    /// the whole range maps to one sign: below-floor ranges hang down,
    /// above-floor ranges grow up. Reversed axes flip the result.
    #[must_use]
    pub fn bar_height(&self, value: f32) -> f32 {
        let position = self.helper().position_at(value);
        let mut height = if self.no_zero_in_range {
            if self.has_negative_values {
                (position - 1.0).min(0.0)
            } else {
                position.max(0.0)
            }
        } else {
            position - self.zero_position()
        };
        if self.reversed {
            height = -height;
        }
        height
    }

    /// Allowed camera pitch range in degrees for the current floor placement.
    #[must_use]
    pub fn vertical_rotation_limits(&self) -> (f32, f32) {
        if !self.no_zero_in_range {
            return (-90.0, 90.0);
        }
        if self.has_negative_values != self.reversed {
            (-90.0, 0.0)
        } else {
            (0.0, 90.0)
        }
    }

    fn helper(&self) -> AxisHelper {
        AxisHelper::new(self.min, self.max, false)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::FloorNormalization;

    #[test]
    fn floor_inside_range_splits_heights_around_zero_position() {
        let norm = FloorNormalization::compute(-10.0, 10.0, 0.0, false);
        assert!(norm.has_negative_values);
        assert!(!norm.no_zero_in_range);
        assert_relative_eq!(norm.height_normalizer, 20.0);
        // max(|min - floor|, max_abs) / height_normalizer * 2 = 10 / 20 * 2.
        // 2.0 is reserved for floors at or beyond a range extreme.
        assert_relative_eq!(norm.gradient_fraction, 1.0);
        assert_relative_eq!(norm.background_adjustment, 0.0);
        assert_relative_eq!(norm.zero_position(), 0.5);
        assert_relative_eq!(norm.bar_height(10.0), 0.5);
        assert_relative_eq!(norm.bar_height(-10.0), -0.5);
    }

    #[test]
    fn floor_below_range_keeps_all_heights_positive() {
        let norm = FloorNormalization::compute(5.0, 10.0, 0.0, false);
        assert_relative_eq!(norm.actual_floor_level, 5.0);
        assert!(norm.no_zero_in_range);
        assert!(!norm.has_negative_values);
        assert_relative_eq!(norm.gradient_fraction, 2.0);
        assert_relative_eq!(norm.background_adjustment, 1.0);
        for value in [5.0, 6.5, 10.0] {
            assert!(norm.bar_height(value) >= 0.0);
        }
    }

    #[test]
    fn floor_above_range_hangs_bars_down() {
        let norm = FloorNormalization::compute(-10.0, -2.0, 0.0, false);
        assert_relative_eq!(norm.actual_floor_level, -2.0);
        assert!(norm.no_zero_in_range);
        assert!(norm.has_negative_values);
        assert_relative_eq!(norm.bar_height(-2.0), 0.0);
        assert_relative_eq!(norm.bar_height(-10.0), -1.0);
        assert_eq!(norm.vertical_rotation_limits(), (-90.0, 0.0));
    }

    #[test]
    fn reversal_negates_heights_and_adjustment() {
        let plain = FloorNormalization::compute(0.0, 4.0, 0.0, false);
        let reversed = FloorNormalization::compute(0.0, 4.0, 0.0, true);
        assert_relative_eq!(reversed.bar_height(3.0), -plain.bar_height(3.0));
        assert_relative_eq!(
            reversed.background_adjustment,
            -plain.background_adjustment
        );
        assert_eq!(reversed.vertical_rotation_limits(), (-90.0, 0.0));
        assert_eq!(plain.vertical_rotation_limits(), (0.0, 90.0));
    }

    #[test]
    fn degenerate_range_keeps_normalizer_positive() {
        let norm = FloorNormalization::compute(3.0, 3.0, 0.0, false);
        assert!(norm.height_normalizer > 0.0);
        assert!(norm.bar_height(3.0).is_finite());
        assert!(norm.background_adjustment.is_finite());
    }

    #[test]
    fn recompute_replaces_previous_state() {
        let mut norm = FloorNormalization::default();
        norm.recompute(-1.0, 1.0, 0.5, false);
        assert_eq!(norm, FloorNormalization::compute(-1.0, 1.0, 0.5, false));
    }
}
