use glam::Vec2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::api::ChartController;
use crate::core::AxisOrientation;
use crate::error::{ChartError, ChartResult};
use crate::render::ChartRenderer;

/// Limits for wheel zoom and axis-label dragging, in axis units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisInputConfig {
    /// Axis ranges never leave `[area_min, area_max]`.
    pub area_min: f32,
    pub area_max: f32,
    /// Narrowest X range the wheel may zoom to.
    pub min_range_x: f32,
    pub min_range_z: f32,
    /// Axis units moved per logical pixel of drag.
    pub speed_modifier: f32,
}

impl AxisInputConfig {
    #[must_use]
    pub fn new(area_min: f32, area_max: f32) -> Self {
        let width = area_max - area_min;
        Self {
            area_min,
            area_max,
            min_range_x: width * 0.1,
            min_range_z: width * 0.1,
            speed_modifier: 20.0,
        }
    }

    #[must_use]
    pub fn with_min_ranges(mut self, min_range_x: f32, min_range_z: f32) -> Self {
        self.min_range_x = min_range_x;
        self.min_range_z = min_range_z;
        self
    }

    #[must_use]
    pub fn with_speed_modifier(mut self, speed_modifier: f32) -> Self {
        self.speed_modifier = speed_modifier;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        let values = [
            self.area_min,
            self.area_max,
            self.min_range_x,
            self.min_range_z,
            self.speed_modifier,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "axis input limits must be finite".to_owned(),
            ));
        }
        if self.area_min >= self.area_max {
            return Err(ChartError::InvalidData(
                "axis input area min must be < max".to_owned(),
            ));
        }
        if self.min_range_x < 0.0 || self.min_range_z < 0.0 {
            return Err(ChartError::InvalidData(
                "axis input minimum ranges must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for AxisInputConfig {
    fn default() -> Self {
        Self::new(0.0, 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    DraggingX,
    DraggingZ,
}

/// New range for one axis, produced by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRangeUpdate {
    pub orientation: AxisOrientation,
    pub min: f32,
    pub max: f32,
}

impl AxisRangeUpdate {
    /// Sets the range on the controller's active axis, marking it for the next sync.
    pub fn apply_to<R: ChartRenderer>(self, controller: &mut ChartController<R>) -> ChartResult<()> {
        controller.update_axis(self.orientation, |axis| axis.set_range(self.min, self.max))
    }
}

/// Turns pointer and wheel input into X/Z axis range updates.
///
/// The handler never touches the renderer. Hosts apply the returned updates
/// to the controller, so they flow through the normal change tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisInputHandler {
    config: AxisInputConfig,
    state: DragState,
    pressed: bool,
    last_pointer: Option<Vec2>,
    x_range: (f32, f32),
    z_range: (f32, f32),
}

impl AxisInputHandler {
    pub fn new(config: AxisInputConfig, x_range: (f32, f32), z_range: (f32, f32)) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            state: DragState::Idle,
            pressed: false,
            last_pointer: None,
            x_range,
            z_range,
        })
    }

    /// Starts from the X and Z ranges currently active on `controller`.
    pub fn for_controller<R: ChartRenderer>(
        config: AxisInputConfig,
        controller: &ChartController<R>,
    ) -> ChartResult<Self> {
        Self::new(
            config,
            controller.axis(AxisOrientation::X).range(),
            controller.axis(AxisOrientation::Z).range(),
        )
    }

    #[must_use]
    pub const fn config(&self) -> AxisInputConfig {
        self.config
    }

    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub const fn x_range(&self) -> (f32, f32) {
        self.x_range
    }

    #[must_use]
    pub const fn z_range(&self) -> (f32, f32) {
        self.z_range
    }

    pub fn press(&mut self, pointer: Vec2) {
        self.pressed = true;
        self.last_pointer = Some(pointer);
    }

    pub fn release(&mut self) {
        self.pressed = false;
        self.state = DragState::Idle;
        self.last_pointer = None;
    }

    /// Called when the host reports that an axis label was picked under the pointer.
    pub fn begin_drag(&mut self, orientation: AxisOrientation) {
        self.state = match orientation {
            AxisOrientation::X => DragState::DraggingX,
            AxisOrientation::Z => DragState::DraggingZ,
            AxisOrientation::Y => DragState::Idle,
        };
    }

    /// Drags the picked axis label. `camera_horizontal` is in degrees.
    pub fn pointer_move(&mut self, pointer: Vec2, camera_horizontal: f32) -> Option<AxisRangeUpdate> {
        let previous = self.last_pointer.replace(pointer);
        if !self.pressed || self.state == DragState::Idle {
            return None;
        }
        let movement = pointer - previous?;
        let (sin, cos) = camera_horizontal.to_radians().sin_cos();
        let (area_min, area_max) = (self.config.area_min, self.config.area_max);

        let update = match self.state {
            DragState::DraggingX => {
                let distance = (movement.x * cos - movement.y * sin) * self.config.speed_modifier;
                let (min, max) = self.x_range;
                self.x_range = slide_into_area(min - distance, max - distance, area_min, area_max);
                AxisRangeUpdate {
                    orientation: AxisOrientation::X,
                    min: self.x_range.0,
                    max: self.x_range.1,
                }
            }
            DragState::DraggingZ => {
                let distance = (movement.x * sin + movement.y * cos) * self.config.speed_modifier;
                let (min, max) = self.z_range;
                self.z_range = slide_into_area(min + distance, max + distance, area_min, area_max);
                AxisRangeUpdate {
                    orientation: AxisOrientation::Z,
                    min: self.z_range.0,
                    max: self.z_range.1,
                }
            }
            DragState::Idle => return None,
        };
        trace!(?update, "axis label drag");
        Some(update)
    }

    /// Positive deltas zoom in by narrowing X and Z from both ends.
    pub fn wheel(&mut self, delta: f32) -> SmallVec<[AxisRangeUpdate; 2]> {
        if !delta.is_finite() {
            return SmallVec::new();
        }
        let (area_min, area_max) = (self.config.area_min, self.config.area_max);
        self.x_range = constrain(
            self.x_range.0 + delta,
            self.x_range.1 - delta,
            area_min,
            area_max,
            self.config.min_range_x,
        );
        self.z_range = constrain(
            self.z_range.0 + delta,
            self.z_range.1 - delta,
            area_min,
            area_max,
            self.config.min_range_z,
        );
        trace!(delta, x = ?self.x_range, z = ?self.z_range, "wheel zoom");

        let mut updates = SmallVec::new();
        updates.push(AxisRangeUpdate {
            orientation: AxisOrientation::X,
            min: self.x_range.0,
            max: self.x_range.1,
        });
        updates.push(AxisRangeUpdate {
            orientation: AxisOrientation::Z,
            min: self.z_range.0,
            max: self.z_range.1,
        });
        updates
    }
}

/// Clamps to the area, then widens symmetrically up to `min_width`.
fn constrain(min: f32, max: f32, area_min: f32, area_max: f32, min_width: f32) -> (f32, f32) {
    let mut min = min.max(area_min);
    let mut max = max.min(area_max);
    let width = max - min;
    if width < min_width {
        let adjust = (min_width - width) / 2.0;
        min -= adjust;
        max += adjust;
    }
    (min, max)
}

/// Moves a range back inside the area while keeping its width.
fn slide_into_area(min: f32, max: f32, area_min: f32, area_max: f32) -> (f32, f32) {
    let width = max - min;
    let (mut min, mut max) = (min, max);
    if min < area_min {
        min = area_min;
        max = min + width;
    }
    if max > area_max {
        max = area_max;
        min = max - width;
    }
    (min, max)
}
