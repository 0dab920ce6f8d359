//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use profilehub_cache::{RefreshCoordinator, SnapshotReader};
use profilehub_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Every field is cheap
/// to clone.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Read side of the snapshot cache
    pub reader: SnapshotReader,
    /// Write side, used only by the manual refresh route
    pub coordinator: RefreshCoordinator,
    /// Process start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, coordinator: RefreshCoordinator) -> Self {
        Self {
            config,
            reader: coordinator.reader(),
            coordinator,
            started_at: Utc::now(),
        }
    }
}
