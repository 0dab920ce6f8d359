//! Social-graph fragment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::defaults::{self, PLACEHOLDER_DISPLAY_NAME, PLACEHOLDER_USERNAME};

/// Normalized profile from the social-graph provider.
///
/// Every field has a default so a partially written record still loads.
/// Counts are never negative; a failed count lookup reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialFragment {
    /// Provider user id.
    pub user_id: u64,
    /// Login name.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Free-text profile description.
    pub description: String,
    /// Whether the account is banned.
    pub is_banned: bool,
    /// Account creation time, `None` when unknown.
    #[serde(with = "super::timestamp::lenient")]
    pub created_at: Option<DateTime<Utc>>,
    /// Avatar headshot URL, empty when the thumbnail lookup failed.
    pub avatar_url: String,
    /// Number of friends.
    pub friends_count: u64,
    /// Number of followers.
    pub followers_count: u64,
    /// Number of followed accounts.
    pub following_count: u64,
}

impl SocialFragment {
    /// Fully degraded fragment for `user_id`.
    ///
    /// Keeps the last-known username and display name from `previous` when
    /// present; every other field takes its default.
    pub fn placeholder(user_id: u64, previous: Option<&SocialFragment>) -> Self {
        Self {
            user_id,
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
