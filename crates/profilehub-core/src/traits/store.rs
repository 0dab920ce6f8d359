//! Snapshot persistence trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::Snapshot;

/// Durable storage for the last merged snapshot.
#[async_trait]
pub trait SnapshotStore: Send + Sync + std::fmt::Debug + 'static {
    /// Read the persisted snapshot.
    ///
    /// Never fails: a missing, unreadable, or malformed document yields the
    /// store's placeholder snapshot.
    async fn load(&self) -> Snapshot;

    /// Persist `snapshot` so that a concurrent `load` never observes a
    /// partially written document.
    async fn save(&self, snapshot: &Snapshot) -> AppResult<()>;
}
