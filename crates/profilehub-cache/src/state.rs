//! State shared between the coordinator and its readers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use profilehub_core::types::Snapshot;

/// Completion channel of the running cycle. `None` until the cycle finishes.
pub(crate) type CycleResult = watch::Receiver<Option<Arc<Snapshot>>>;

/// Bookkeeping for refresh admission. Never held across an `.await`.
#[derive(Debug, Default)]
pub(crate) struct CycleState {
    pub(crate) in_flight: Option<CycleResult>,
    pub(crate) last_attempt: Option<DateTime<Utc>>,
    pub(crate) last_save_error: Option<String>,
}

#[derive(Debug)]
pub(crate) struct Shared {
    visible: RwLock<Arc<Snapshot>>,
    cycle: Mutex<CycleState>,
    pub(crate) threshold: chrono::Duration,
}

impl Shared {
    pub(crate) fn new(initial: Snapshot, threshold: chrono::Duration) -> Self {
        Self {
            visible: RwLock::new(Arc::new(initial)),
            cycle: Mutex::new(CycleState::default()),
            threshold,
        }
    }

    /// The visible snapshot. Readers only ever clone the reference.
    pub(crate) fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&self.visible.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the visible snapshot as a whole.
    pub(crate) fn swap(&self, next: Arc<Snapshot>) {
        *self.visible.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    pub(crate) fn cycle(&self) -> MutexGuard<'_, CycleState> {
        self.cycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
