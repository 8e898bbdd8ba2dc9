use tracing::debug;

use crate::core::{Axis, AxisId, AxisOrientation, ChartKind};
use crate::error::{ChartError, ChartResult};
use crate::render::ChartRenderer;

use super::ChartController;

/// Axes owned by a chart: one active per orientation plus detached ones.
#[derive(Debug)]
pub(super) struct AxisSlots {
    active: [Axis; 3],
    detached: Vec<Axis>,
}

impl AxisSlots {
    pub(super) fn new(kind: ChartKind) -> Self {
        Self {
            active: AxisOrientation::ALL.map(|orientation| default_axis(kind, orientation)),
            detached: Vec::new(),
        }
    }

    pub(super) fn active(&self, orientation: AxisOrientation) -> &Axis {
        &self.active[orientation.index()]
    }

    pub(super) fn active_mut(&mut self, orientation: AxisOrientation) -> &mut Axis {
        &mut self.active[orientation.index()]
    }

    fn orientation_of(&self, id: AxisId) -> Option<AxisOrientation> {
        AxisOrientation::ALL
            .into_iter()
            .find(|orientation| self.active(*orientation).id() == id)
    }

    fn detached_position(&self, id: AxisId) -> Option<usize> {
        self.detached.iter().position(|axis| axis.id() == id)
    }

    /// Puts `axis` into the slot and disposes of the previous occupant:
    /// chart defaults are dropped, external axes stay owned but detached.
    fn install(&mut self, orientation: AxisOrientation, mut axis: Axis) {
        axis.attach(orientation);
        let mut previous = std::mem::replace(&mut self.active[orientation.index()], axis);
        if previous.is_default() {
            debug!(axis = previous.id().raw(), ?orientation, "dropping replaced default axis");
        } else {
            previous.detach();
            self.detached.push(previous);
        }
    }
}

fn default_axis(kind: ChartKind, orientation: AxisOrientation) -> Axis {
    let mut axis = Axis::default_for(kind.default_axis_kind(orientation));
    axis.attach(orientation);
    axis
}

impl<R: ChartRenderer> ChartController<R> {
    /// Active axis for `orientation`. Every orientation always has one.
    #[must_use]
    pub fn axis(&self, orientation: AxisOrientation) -> &Axis {
        self.axes.active(orientation)
    }

    /// Every owned axis, active ones first in X/Y/Z order.
    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.axes.active.iter().chain(self.axes.detached.iter())
    }

    #[must_use]
    pub fn owns_axis(&self, id: AxisId) -> bool {
        self.axes.orientation_of(id).is_some() || self.axes.detached_position(id).is_some()
    }

    /// Adopts `axis` without activating it.
    pub fn add_axis(&mut self, mut axis: Axis) -> AxisId {
        axis.detach();
        let id = axis.id();
        self.axes.detached.push(axis);
        id
    }

    /// Makes `axis` active for `orientation`; `None` installs a fresh default.
    pub fn set_axis(&mut self, orientation: AxisOrientation, axis: Option<Axis>) -> AxisId {
        let axis = axis.unwrap_or_else(|| default_axis(self.config.kind, orientation));
        let id = axis.id();
        self.install_axis(orientation, axis);
        id
    }

    /// Re-activates an axis this chart already owns.
    pub fn activate_axis(&mut self, orientation: AxisOrientation, id: AxisId) -> ChartResult<()> {
        if let Some(active) = self.axes.orientation_of(id) {
            if active == orientation {
                return Ok(());
            }
            return Err(ChartError::AxisOrientationMismatch {
                axis: id,
                active,
                requested: orientation,
            });
        }
        let position = self
            .axes
            .detached_position(id)
            .ok_or(ChartError::AxisNotOwned { axis: id })?;
        let axis = self.axes.detached.remove(position);
        self.install_axis(orientation, axis);
        Ok(())
    }

    /// Hands ownership of `id` back to the caller.
    ///
    /// An active axis is replaced by a fresh default first. Returns `None`
    /// when the chart does not own the axis.
    pub fn release_axis(&mut self, id: AxisId) -> Option<Axis> {
        let mut released = if let Some(orientation) = self.axes.orientation_of(id) {
            let replacement = default_axis(self.config.kind, orientation);
            let released =
                std::mem::replace(&mut self.axes.active[orientation.index()], replacement);
            self.changes.mark_axis_replaced(orientation);
            self.adjust_axis_ranges();
            released
        } else {
            let position = self.axes.detached_position(id)?;
            self.axes.detached.remove(position)
        };
        released.release_ownership();
        debug!(axis = id.raw(), "released axis");
        Some(released)
    }

    /// Mutates the active axis and records what changed.
    pub fn update_axis<T>(
        &mut self,
        orientation: AxisOrientation,
        update: impl FnOnce(&mut Axis) -> T,
    ) -> T {
        let result = update(self.axes.active_mut(orientation));
        let changes = self.axes.active_mut(orientation).take_changes();
        self.changes.mark_axis(orientation, changes);
        if changes.auto_adjust_enabled() {
            self.adjust_axis_ranges();
        }
        result
    }

    fn install_axis(&mut self, orientation: AxisOrientation, axis: Axis) {
        debug!(axis = axis.id().raw(), ?orientation, "installing axis");
        self.axes.install(orientation, axis);
        self.changes.mark_axis_replaced(orientation);
        self.adjust_axis_ranges();
    }
}
