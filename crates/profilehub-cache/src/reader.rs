//! Read-only access to the visible snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use profilehub_core::types::Snapshot;

use crate::staleness::is_stale;
use crate::state::Shared;

/// Operator-facing view of the refresh machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshStatus {
    /// A refresh cycle is currently running.
    pub in_flight: bool,
    /// Start time of the most recent cycle, if any ran since startup.
    pub last_attempt: Option<DateTime<Utc>>,
    /// `last_update` of the visible snapshot.
    pub last_update: Option<DateTime<Utc>>,
    /// Whether the visible snapshot is past the staleness threshold.
    pub stale: bool,
    /// Staleness threshold in hours.
    pub staleness_threshold_hours: i64,
    /// Error from the most recent failed save; cleared by the next good one.
    pub last_save_error: Option<String>,
}

/// Cheap, cloneable handle for reading the current snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    shared: Arc<Shared>,
}

impl SnapshotReader {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// The most recently swapped-in snapshot. Never waits on a refresh.
    pub fn current(&self) -> Arc<Snapshot> {
        self.shared.current()
    }

    pub fn status(&self) -> RefreshStatus {
        let last_update = self.shared.current().last_update;
        let cycle = self.shared.cycle();

        RefreshStatus {
            in_flight: cycle.in_flight.is_some(),
            last_attempt: cycle.last_attempt,
            last_update,
            stale: is_stale(last_update, Utc::now(), self.shared.threshold),
            staleness_threshold_hours: self.shared.threshold.num_hours(),
            last_save_error: cycle.last_save_error.clone(),
        }
    }
}
