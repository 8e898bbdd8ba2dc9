use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::error::ChartResult;
use crate::render::ChartRenderer;

use super::{ChartConfig, ChartController, SyncOutcome};

/// Controller shared between a UI thread that mutates and a render thread that syncs.
///
/// The render thread holds the lock for a whole [`SharedChart::synchronize_frame`]
/// pass, so it never observes a half-applied mutation sequence.
#[derive(Debug)]
pub struct SharedChart<R: ChartRenderer> {
    inner: Arc<Mutex<ChartController<R>>>,
}

impl<R: ChartRenderer> Clone for SharedChart<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ChartRenderer> SharedChart<R> {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        Ok(Self::from_controller(ChartController::new(config)?))
    }

    #[must_use]
    pub fn from_controller(controller: ChartController<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, ChartController<R>> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access to the controller.
    pub fn with_controller<T>(&self, f: impl FnOnce(&mut ChartController<R>) -> T) -> T {
        let mut controller = self.inner.lock();
        f(&mut controller)
    }

    pub fn synchronize_frame(&self) -> SyncOutcome {
        self.inner.lock().synchronize()
    }
}
