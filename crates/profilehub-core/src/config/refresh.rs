//! Refresh scheduling and snapshot persistence configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Staleness-gated refresh configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Maximum snapshot age before the periodic check triggers a refresh.
    #[serde(default = "default_threshold_hours")]
    pub staleness_threshold_hours: u64,
    /// Cron expression (with seconds) for the periodic staleness check.
    #[serde(default = "default_check_schedule")]
    pub check_schedule: String,
    /// Whether to run one staleness check right after startup.
    #[serde(default = "default_true")]
    pub check_on_startup: bool,
    /// Path of the persisted snapshot document.
    #[serde(default = "default_store_path")]
    pub store_path: String,
}

impl RefreshConfig {
    /// The staleness threshold as a `chrono` duration.
    ///
    /// Fails when the configured hours do not fit a `chrono::Duration`.
    pub fn staleness_threshold(&self) -> Result<chrono::Duration, AppError> {
        i64::try_from(self.staleness_threshold_hours)
            .ok()
            .and_then(chrono::Duration::try_hours)
            .ok_or_else(|| {
                AppError::configuration(format!(
                    "refresh.staleness_threshold_hours is out of range: {}",
                    self.staleness_threshold_hours
                ))
            })
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            staleness_threshold_hours: default_threshold_hours(),
            check_schedule: default_check_schedule(),
            check_on_startup: default_true(),
            store_path: default_store_path(),
        }
    }
}

fn default_threshold_hours() -> u64 {
    48
}

fn default_check_schedule() -> String {
    "0 0 */12 * * *".to_string()
}

fn default_true() -> bool {
    true
}

fn default_store_path() -> String {
    "data/profile_data.json".to_string()
}
