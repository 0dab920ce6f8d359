//! Health probe payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use profilehub_cache::RefreshStatus;

/// Liveness probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub social_user_id: u64,
    /// Snowflake id as a string, like the presence fragment carries it.
    pub presence_user_id: String,
    pub time: DateTime<Utc>,
}

/// Liveness plus refresh machinery state.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthResponse {
    #[serde(flatten)]
    pub health: HealthResponse,
    pub uptime_seconds: i64,
    pub refresh: RefreshStatus,
}
