//! Presence-identity fragment.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::defaults::{self, PLACEHOLDER_DISPLAY_NAME, PLACEHOLDER_USERNAME};

/// Live presence of the tracked identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceState {
    /// Online.
    Online,
    /// Idle / away.
    Idle,
    /// Do not disturb.
    Dnd,
    /// Offline or invisible.
    #[serde(alias = "invisible")]
    Offline,
    /// Presence could not be resolved.
    #[default]
    #[serde(other)]
    Unknown,
}

impl PresenceState {
    /// Map a provider status string, unrecognized values become `Unknown`.
    pub fn from_provider(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "online" => Self::Online,
            "idle" => Self::Idle,
            "dnd" => Self::Dnd,
            "offline" | "invisible" => Self::Offline,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Idle => write!(f, "idle"),
            Self::Dnd => write!(f, "dnd"),
            Self::Offline => write!(f, "offline"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Normalized identity and presence from the presence provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceFragment {
    /// Snowflake user id, kept as a string so JSON consumers do not lose precision.
    pub user_id: String,
    /// Login name.
    pub username: String,
    /// Global display name, or the username when none is set.
    pub display_name: String,
    /// Avatar URL, animated when the avatar is.
    pub avatar_url: String,
    /// Raw avatar hash, `None` when the default avatar is in use.
    pub avatar_hash: Option<String>,
    /// Legacy discriminator (`"0"` for migrated accounts).
    pub discriminator: String,
    /// Whether the account is a bot.
    pub is_bot: bool,
    /// Account creation time, `None` when unknown.
    #[serde(with = "super::timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    /// Public account flags bitfield.
    pub public_flags: u64,
    /// Profile banner URL.
    pub banner_url: Option<String>,
    /// Accent color as `#rrggbb`.
    pub accent_color: Option<String>,
    /// Live presence state.
    pub status: PresenceState,
    /// Name of the current non-custom activity.
    pub activity: Option<String>,
    /// Free-text custom status.
    pub custom_status: Option<String>,
}

impl PresenceFragment {
    /// Fully degraded fragment for `user_id`.
    ///
    /// Keeps the last-known username and display name from `previous` when
    /// present; presence reads as `Unknown`.
    pub fn placeholder(user_id: u64, previous: Option<&PresenceFragment>) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: defaults::carry_over(
                previous.map(|p| p.username.as_str()),
                PLACEHOLDER_USERNAME,
            ),
            display_name: defaults::carry_over(
                previous.map(|p| p.display_name.as_str()),
                PLACEHOLDER_DISPLAY_NAME,
            ),
            ..Self::default()
        }
    }
}
