//! Remote identity provider configuration.

use serde::{Deserialize, Serialize};

/// Settings shared by both source fetchers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Per-request timeout in seconds. A hung lookup degrades after this.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// User agent sent with every provider request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Social-graph provider (Roblox-shaped API).
    #[serde(default)]
    pub social: SocialSourceConfig,
    /// Presence provider (Discord-shaped API).
    #[serde(default)]
    pub presence: PresenceSourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout(),
            user_agent: default_user_agent(),
            social: SocialSourceConfig::default(),
            presence: PresenceSourceConfig::default(),
        }
    }
}

/// Social-graph provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialSourceConfig {
    /// Tracked user id.
    #[serde(default = "default_social_user_id")]
    pub user_id: u64,
    /// Base URL of the users API.
    #[serde(default = "default_users_base_url")]
    pub users_base_url: String,
    /// Base URL of the thumbnails API.
    #[serde(default = "default_thumbnails_base_url")]
    pub thumbnails_base_url: String,
    /// Base URL of the friends API.
    #[serde(default = "default_friends_base_url")]
    pub friends_base_url: String,
    /// Requested avatar headshot size, e.g. `150x150`.
    #[serde(default = "default_avatar_size")]
    pub avatar_size: String,
    /// Requested avatar image format.
    #[serde(default = "default_avatar_format")]
    pub avatar_format: String,
}

impl Default for SocialSourceConfig {
    fn default() -> Self {
        Self {
            user_id: default_social_user_id(),
            users_base_url: default_users_base_url(),
            thumbnails_base_url: default_thumbnails_base_url(),
            friends_base_url: default_friends_base_url(),
            avatar_size: default_avatar_size(),
            avatar_format: default_avatar_format(),
        }
    }
}

/// Presence provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceSourceConfig {
    /// Tracked user id (snowflake).
    #[serde(default = "default_presence_user_id")]
    pub user_id: u64,
    /// Base URL of the REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Base URL of the media CDN used to build avatar and banner URLs.
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,
    /// Bot token for the user lookup.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// Base URL of the live-status service. `None` disables the lookup.
    #[serde(default = "default_status_base_url")]
    pub status_base_url: Option<String>,
}

impl PresenceSourceConfig {
    /// The bot token, treating a blank value as unset.
    pub fn usable_bot_token(&self) -> Option<&str> {
        self.bot_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

impl Default for PresenceSourceConfig {
    fn default() -> Self {
        Self {
            user_id: default_presence_user_id(),
            api_base_url: default_api_base_url(),
            cdn_base_url: default_cdn_base_url(),
            bot_token: None,
            status_base_url: default_status_base_url(),
        }
    }
}

fn default_request_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("profilehub/{}", env!("CARGO_PKG_VERSION"))
}

fn default_social_user_id() -> u64 {
    1610763045
}

fn default_users_base_url() -> String {
    "https://users.roblox.com".to_string()
}

fn default_thumbnails_base_url() -> String {
    "https://thumbnails.roblox.com".to_string()
}

fn default_friends_base_url() -> String {
    "https://friends.roblox.com".to_string()
}

fn default_avatar_size() -> String {
    "150x150".to_string()
}

fn default_avatar_format() -> String {
    "Png".to_string()
}

fn default_presence_user_id() -> u64 {
    822804221425614903
}

fn default_api_base_url() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_cdn_base_url() -> String {
    "https://cdn.discordapp.com".to_string()
}

fn default_status_base_url() -> Option<String> {
    Some("https://api.lanyard.rest/v1".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_bot_token_is_unusable() {
        let mut config = PresenceSourceConfig::default();
        assert_eq!(config.usable_bot_token(), None);

        config.bot_token = Some("   ".into());
        assert_eq!(config.usable_bot_token(), None);

        config.bot_token = Some("abc.def".into());
        assert_eq!(config.usable_bot_token(), Some("abc.def"));
    }
}
