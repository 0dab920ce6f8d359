//! The cached unit of state served to readers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::presence::PresenceFragment;
use super::social::SocialFragment;

/// Merged result of one refresh cycle.
///
/// Snapshots are never mutated once built; a refresh produces a new value
/// that replaces the shared reference as a whole.
///
/// Key aliases accept documents written by the legacy bot
/// (`roblox`/`discord` sections, camelCase timestamp key).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Completion time of the last refresh that produced live data.
    #[serde(default, alias = "lastUpdate", with = "super::timestamp::lenient")]
    pub last_update: Option<DateTime<Utc>>,
    /// Social-graph fragment.
    #[serde(default, alias = "roblox")]
    pub social: Option<SocialFragment>,
    /// Presence fragment.
    #[serde(default, alias = "discord")]
    pub presence: Option<PresenceFragment>,
}

impl Snapshot {
    /// Snapshot served before any successful refresh.
    ///
    /// Both fragments carry placeholder identity data and `last_update` is
    /// `None`, so the first staleness check always fires.
    pub fn placeholder(social_user_id: u64, presence_user_id: u64) -> Self {
        Self {
            last_update: None,
            social: Some(SocialFragment::placeholder(social_user_id, None)),
            presence: Some(PresenceFragment::placeholder(presence_user_id, None)),
        }
    }

    /// Whether any refresh has ever completed with live data.
    pub fn ever_updated(&self) -> bool {
        self.last_update.is_some()
    }
}
