use serde::{Deserialize, Serialize};

use crate::core::axis::AxisKind;
use crate::core::axis_helper::AxisHelper;
use crate::core::label_format::format_axis_label;

/// Largest category index or count a bar axis window resolves to.
pub const MAX_CATEGORY_WINDOW: f64 = i32::MAX as f64;

/// Grid and label placement derived from an axis, positions normalized to `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisTicks {
    pub grid_positions: Vec<f32>,
    pub sub_grid_positions: Vec<f32>,
    pub label_positions: Vec<f32>,
    pub label_strings: Vec<String>,
}

/// Renderer-side copy of one axis, written only by controller pushes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisRenderCache {
    kind: AxisKind,
    title: String,
    labels: Vec<String>,
    min: f32,
    max: f32,
    segment_count: u32,
    sub_segment_count: u32,
    label_format: String,
    reversed: bool,
    ticks: Option<AxisTicks>,
}

impl Default for AxisRenderCache {
    fn default() -> Self {
        Self {
            kind: AxisKind::Value,
            title: String::new(),
            labels: Vec::new(),
            min: 0.0,
            max: 0.0,
            segment_count: 1,
            sub_segment_count: 1,
            label_format: String::new(),
            reversed: false,
            ticks: None,
        }
    }
}

impl AxisRenderCache {
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
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub const fn helper(&self) -> AxisHelper {
        AxisHelper::new(self.min, self.max, self.reversed)
    }

    /// First index and count of the categories inside the range.
    ///
    /// Both are capped at [`MAX_CATEGORY_WINDOW`], so huge ranges still scale finitely.
    #[must_use]
    pub fn category_window(&self) -> (usize, usize) {
        let first = f64::from(self.min).max(0.0).ceil().min(MAX_CATEGORY_WINDOW);
        let last = f64::from(self.max).floor();
        if last < first {
            return (first as usize, 0);
        }
        let count = (last - first + 1.0).min(MAX_CATEGORY_WINDOW);
        (first as usize, count as usize)
    }

    /// Derived grid and label placement.
    ///
    /// `None` until the renderer prepares a frame after a tick-affecting change.
    #[must_use]
    pub fn ticks(&self) -> Option<&AxisTicks> {
        self.ticks.as_ref()
    }

    /// Rebuilds ticks invalidated since the last frame. Returns whether anything was rebuilt.
    pub(crate) fn refresh_ticks(&mut self) -> bool {
        if self.ticks.is_some() {
            return false;
        }
        self.ticks = Some(self.compute_ticks());
        true
    }

    pub(crate) fn set_kind(&mut self, kind: AxisKind) -> bool {
        let changed = replace_if_changed(&mut self.kind, kind);
        self.invalidate_if(changed)
    }

    pub(crate) fn set_title(&mut self, title: &str) -> bool {
        if self.title == title {
            return false;
        }
        self.title = title.to_owned();
        true
    }

    pub(crate) fn set_labels(&mut self, labels: &[String]) -> bool {
        if self.labels == labels {
            return false;
        }
        self.labels = labels.to_vec();
        self.ticks = None;
        true
    }

    pub(crate) fn set_range(&mut self, min: f32, max: f32) -> bool {
        let min_changed = replace_if_changed(&mut self.min, min);
        let max_changed = replace_if_changed(&mut self.max, max);
        self.invalidate_if(min_changed || max_changed)
    }

    pub(crate) fn set_segment_count(&mut self, count: u32) -> bool {
        let changed = replace_if_changed(&mut self.segment_count, count.max(1));
        self.invalidate_if(changed)
    }

    pub(crate) fn set_sub_segment_count(&mut self, count: u32) -> bool {
        let changed = replace_if_changed(&mut self.sub_segment_count, count.max(1));
        self.invalidate_if(changed)
    }

    pub(crate) fn set_label_format(&mut self, format: &str) -> bool {
        if self.label_format == format {
            return false;
        }
        self.label_format = format.to_owned();
        self.ticks = None;
        true
    }

    pub(crate) fn set_reversed(&mut self, reversed: bool) -> bool {
        let changed = replace_if_changed(&mut self.reversed, reversed);
        self.invalidate_if(changed)
    }

    fn invalidate_if(&mut self, changed: bool) -> bool {
        if changed {
            self.ticks = None;
        }
        changed
    }

    fn compute_ticks(&self) -> AxisTicks {
        match self.kind {
            AxisKind::Value => self.value_ticks(),
            AxisKind::Category => self.category_ticks(),
        }
    }

    fn value_ticks(&self) -> AxisTicks {
        let segments = self.segment_count.max(1);
        let sub_segments = self.sub_segment_count.max(1);
        let segment_step = 1.0 / segments as f32;
        let sub_step = segment_step / sub_segments as f32;

        let grid_positions: Vec<f32> = (0..=segments).map(|i| i as f32 * segment_step).collect();
        let sub_grid_positions = (0..segments)
            .flat_map(|i| {
                (1..sub_segments).map(move |j| i as f32 * segment_step + j as f32 * sub_step)
            })
            .collect();

        let value_step = (self.max - self.min) / segments as f32;
        let label_strings = (0..=segments)
            .map(|i| {
                let value = self.min + i as f32 * value_step;
                format_axis_label(&self.label_format, f64::from(value))
            })
            .collect();
        let label_positions = grid_positions
            .iter()
            .map(|position| {
                if self.reversed {
                    1.0 - position
                } else {
                    *position
                }
            })
            .collect();

        AxisTicks {
            grid_positions,
            sub_grid_positions,
            label_positions,
            label_strings,
        }
    }

    fn category_ticks(&self) -> AxisTicks {
        let count = self.labels.len();
        let label_positions = (0..count)
            .map(|i| (i as f32 + 0.5) / count as f32)
            .collect();
        AxisTicks {
            grid_positions: (0..=count).map(|i| i as f32 / count.max(1) as f32).collect(),
            sub_grid_positions: Vec::new(),
            label_positions,
            label_strings: self.labels.clone(),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{AxisRenderCache, MAX_CATEGORY_WINDOW};
    use crate::core::axis::AxisKind;

    fn value_cache(min: f32, max: f32, segments: u32, sub_segments: u32) -> AxisRenderCache {
        let mut cache = AxisRenderCache::default();
        cache.set_range(min, max);
        cache.set_segment_count(segments);
        cache.set_sub_segment_count(sub_segments);
        cache.set_label_format("%.1f");
        cache
    }

    #[test]
    fn value_axis_ticks_follow_segments() {
        let mut cache = value_cache(0.0, 10.0, 4, 2);
        cache.refresh_ticks();
        let ticks = cache.ticks().expect("refreshed").clone();
        assert_eq!(ticks.grid_positions.len(), 5);
        assert_eq!(ticks.sub_grid_positions.len(), 4);
        assert_relative_eq!(ticks.sub_grid_positions[0], 0.125);
        assert_eq!(ticks.label_strings, ["0.0", "2.5", "5.0", "7.5", "10.0"]);
    }

    #[test]
    fn ticks_are_rebuilt_only_after_changes() {
        let mut cache = value_cache(0.0, 1.0, 1, 1);
        assert!(cache.refresh_ticks());
        let first = cache.ticks().expect("refreshed").clone();
        assert!(!cache.set_range(0.0, 1.0));
        assert!(!cache.refresh_ticks());
        assert_eq!(cache.ticks(), Some(&first));
        assert!(cache.set_label_format("%d"));
        assert!(cache.ticks().is_none());
        assert!(cache.refresh_ticks());
        assert_eq!(cache.ticks().expect("refreshed").label_strings, ["0", "1"]);
    }

    #[test]
    fn reversed_value_axis_mirrors_label_positions() {
        let mut cache = value_cache(0.0, 2.0, 2, 1);
        cache.set_reversed(true);
        cache.refresh_ticks();
        assert_eq!(
            cache.ticks().expect("refreshed").label_positions,
            [1.0, 0.5, 0.0]
        );
    }

    #[test]
    fn category_window_counts_whole_indices() {
        let mut cache = AxisRenderCache::default();
        cache.set_kind(AxisKind::Category);
        cache.set_range(0.0, 4.0);
        assert_eq!(cache.category_window(), (0, 5));
        cache.set_range(1.5, 3.0);
        assert_eq!(cache.category_window(), (2, 2));
    }

    #[test]
    fn category_window_is_capped_for_huge_ranges() {
        let mut cache = AxisRenderCache::default();
        cache.set_kind(AxisKind::Category);
        cache.set_range(0.0, 1.0e30);
        assert_eq!(cache.category_window(), (0, MAX_CATEGORY_WINDOW as usize));
        cache.set_range(1.0e30, f32::MAX);
        let (first, count) = cache.category_window();
        assert_eq!(first, MAX_CATEGORY_WINDOW as usize);
        assert!(count <= MAX_CATEGORY_WINDOW as usize);
    }

    #[test]
    fn category_ticks_center_labels() {
        let mut cache = AxisRenderCache::default();
        cache.set_kind(AxisKind::Category);
        cache.set_labels(&["a".to_owned(), "b".to_owned()]);
        cache.refresh_ticks();
        let ticks = cache.ticks().expect("refreshed");
        assert_eq!(ticks.label_positions, [0.25, 0.75]);
        assert_eq!(ticks.label_strings, ["a", "b"]);
    }
}
