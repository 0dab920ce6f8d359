//! Presence-identity fetcher.
//!
//! The user record comes from the REST API and needs a bot token. Live
//! status comes from a separate presence-sharing service; a user who does
//! not share a context with it (404) simply reads as `Unknown`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, warn};

use profilehub_core::config::PresenceSourceConfig;
use profilehub_core::error::{AppError, ErrorKind};
use profilehub_core::result::AppResult;
use profilehub_core::traits::source::PresenceSource;
use profilehub_core::types::{PresenceFragment, PresenceState, SourceOutcome};

use crate::client::fetch_json;
use crate::dto::{ActivityDto, LiveStatusDto, PresenceUserDto, StatusEnvelopeDto};

/// Milliseconds between the Unix epoch and the provider's snowflake epoch.
const SNOWFLAKE_EPOCH_MS: u64 = 1_420_070_400_000;

const AVATAR_SIZE: u32 = 1024;
const BANNER_SIZE: u32 = 512;

/// Live status fields resolved by the secondary lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LiveStatus {
    status: PresenceState,
    activity: Option<String>,
    custom_status: Option<String>,
}

impl From<LiveStatusDto> for LiveStatus {
    fn from(dto: LiveStatusDto) -> Self {
        let custom_status = dto
            .activities
            .iter()
            .find(|a| a.kind == ActivityDto::CUSTOM_STATUS)
            .and_then(|a| a.state.clone())
            .filter(|s| !s.trim().is_empty());
        let activity = dto
            .activities
            .iter()
            .find(|a| a.kind != ActivityDto::CUSTOM_STATUS && !a.name.is_empty())
            .map(|a| a.name.clone());

        Self {
            status: PresenceState::from_provider(&dto.discord_status),
            activity,
            custom_status,
        }
    }
}

/// Fetches the presence identity for one user.
#[derive(Debug, Clone)]
pub struct PresenceFetcher {
    http: Client,
    config: PresenceSourceConfig,
}

impl PresenceFetcher {
    /// Create a fetcher sharing `http` with the other source.
    pub fn new(http: Client, config: PresenceSourceConfig) -> Self {
        Self { http, config }
    }

    fn cdn(&self) -> &str {
        self.config.cdn_base_url.trim_end_matches('/')
    }

    async fn fetch_user(&self, user_id: u64) -> AppResult<PresenceUserDto> {
        let token = self
            .config
            .usable_bot_token()
            .ok_or_else(|| {
                AppError::new(
                    ErrorKind::Configuration,
                    "presence.user: no bot token configured",
                )
            })?;

        let url = format!(
            "{}/users/{user_id}",
            self.config.api_base_url.trim_end_matches('/')
        );
        let request = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bot {token}"));
        fetch_json(request, "presence.user").await
    }

    async fn fetch_status(&self, user_id: u64) -> AppResult<LiveStatus> {
        let Some(base) = self.config.status_base_url.as_deref() else {
            return Ok(LiveStatus::default());
        };

        let url = format!("{}/users/{user_id}", base.trim_end_matches('/'));
        let envelope: StatusEnvelopeDto = fetch_json(self.http.get(url), "presence.status").await?;

        match envelope.data {
            Some(data) if envelope.success => Ok(data.into()),
            _ => Err(AppError::external_service(
                "presence.status: unsuccessful response",
            )),
        }
    }

    fn avatar_url(&self, user: &PresenceUserDto, user_id: u64) -> String {
        match user.avatar.as_deref().filter(|h| !h.is_empty()) {
            Some(hash) => format!(
                "{}/avatars/{user_id}/{hash}.{}?size={AVATAR_SIZE}",
                self.cdn(),
                image_ext(hash)
            ),
            None => format!(
                "{}/embed/avatars/{}.png",
                self.cdn(),
                default_avatar_index(user_id, &user.discriminator)
            ),
        }
    }

    fn banner_url(&self, user: &PresenceUserDto, user_id: u64) -> Option<String> {
        user.banner
            .as_deref()
            .filter(|h| !h.is_empty())
            .map(|hash| {
                format!(
                    "{}/banners/{user_id}/{hash}.{}?size={BANNER_SIZE}",
                    self.cdn(),
                    image_ext(hash)
                )
            })
    }

    fn to_fragment(&self, user_id: u64, user: PresenceUserDto, live: LiveStatus) -> PresenceFragment {
        let avatar_url = self.avatar_url(&user, user_id);
        let banner_url = self.banner_url(&user, user_id);
        let display_name = user
            .global_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| user.username.clone());

        PresenceFragment {
            user_id: user_id.to_string(),
            username: user.username,
            display_name,
            avatar_url,
            avatar_hash: user.avatar.filter(|h| !h.is_empty()),
            discriminator: user.discriminator,
            is_bot: user.bot,
            created_at: snowflake_created_at(user_id),
            public_flags: user.public_flags,
            banner_url,
            accent_color: user.accent_color.map(|c| format!("#{c:06x}")),
            status: live.status,
            activity: live.activity,
            custom_status: live.custom_status,
        }
    }
}

/// Animated hashes carry an `a_` prefix.
fn image_ext(hash: &str) -> &'static str {
    if hash.starts_with("a_") { "gif" } else { "png" }
}

/// Index of the built-in avatar shown when the user has none.
fn default_avatar_index(user_id: u64, discriminator: &str) -> u64 {
    match discriminator.trim() {
        "" | "0" => (user_id >> 22) % 6,
        legacy => legacy.parse::<u64>().map(|d| d % 5).unwrap_or(0),
    }
}

/// Creation time encoded in the upper bits of a snowflake id.
fn snowflake_created_at(user_id: u64) -> Option<DateTime<Utc>> {
    let millis = (user_id >> 22).checked_add(SNOWFLAKE_EPOCH_MS)?;
    DateTime::from_timestamp_millis(i64::try_from(millis).ok()?)
}

#[async_trait]
impl PresenceSource for PresenceFetcher {
    async fn fetch(
        &self,
        user_id: u64,
        previous: Option<&PresenceFragment>,
    ) -> SourceOutcome<PresenceFragment> {
        let (user, live) = tokio::join!(self.fetch_user(user_id), self.fetch_status(user_id));

        let user = match user {
            Ok(user) => user,
            Err(e) => {
                warn!(user_id, error = %e, "Presence user lookup failed, fragment degraded");
                return SourceOutcome::Degraded(PresenceFragment::placeholder(user_id, previous));
            }
        };

        let live = live.unwrap_or_else(|e| {
            if e.kind == ErrorKind::NotFound {
                debug!(user_id, "User not visible to status service, presence unknown");
            } else {
                warn!(user_id, error = %e, "Presence status lookup failed, presence unknown");
            }
            LiveStatus::default()
        });

        let fragment = self.to_fragment(user_id, user, live);
        debug!(user_id, status = %fragment.status, "Fetched presence fragment");
        SourceOutcome::Fresh(fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use profilehub_core::config::SourcesConfig;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER: u64 = 822804221425614903;

    fn fetcher(server: &MockServer, token: Option<&str>) -> PresenceFetcher {
        let http = crate::build_http_client(&SourcesConfig::default()).unwrap();
        PresenceFetcher::new(
            http,
            PresenceSourceConfig {
                user_id: USER,
                api_base_url: format!("{}/api", server.uri()),
                cdn_base_url: "https://cdn.example".to_string(),
                bot_token: token.map(str::to_string),
                status_base_url: Some(format!("{}/status", server.uri())),
            },
        )
    }

    async fn mount_user(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/users/{USER}")))
            .and(header("authorization", "Bot secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn user_body() -> serde_json::Value {
        json!({
            "id": USER.to_string(),
            "username": "realice",
            "global_name": "David",
            "avatar": "a_1f2e3d",
            "discriminator": "0",
            "public_flags": 64,
            "banner": "b4nn3r",
            "accent_color": 1_127_256
        })
    }

    #[tokio::test]
    async fn test_full_fetch() {
        let server = MockServer::start().await;
        mount_user(&server, user_body()).await;
        Mock::given(method("GET"))
            .and(path(format!("/status/users/{USER}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "discord_status": "dnd",
                    "activities": [
                        { "type": 4, "name": "Custom Status", "state": "Life to no Limits" },
                        { "type": 0, "name": "Visual Studio Code" }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let outcome = fetcher(&server, Some("secret")).fetch(USER, None).await;
        assert!(!outcome.is_degraded());

        let fragment = outcome.into_fragment();
        assert_eq!(fragment.user_id, USER.to_string());
        assert_eq!(fragment.display_name, "David");
        assert_eq!(
            fragment.avatar_url,
            format!("https://cdn.example/avatars/{USER}/a_1f2e3d.gif?size=1024")
        );
        assert_eq!(
            fragment.banner_url.as_deref(),
            Some(format!("https://cdn.example/banners/{USER}/b4nn3r.png?size=512").as_str())
        );
        assert_eq!(fragment.accent_color.as_deref(), Some("#113358"));
        assert_eq!(fragment.public_flags, 64);
        assert_eq!(fragment.status, PresenceState::Dnd);
        assert_eq!(fragment.custom_status.as_deref(), Some("Life to no Limits"));
        assert_eq!(fragment.activity.as_deref(), Some("Visual Studio Code"));
        assert_eq!(
            fragment.created_at.unwrap().timestamp_millis(),
            ((USER >> 22) + SNOWFLAKE_EPOCH_MS) as i64
        );
    }

    #[tokio::test]
    async fn test_status_not_found_reads_unknown() {
        let server = MockServer::start().await;
        mount_user(&server, user_body()).await;
        Mock::given(method("GET"))
            .and(path(format!("/status/users/{USER}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": { "code": "user_not_monitored" }
            })))
            .mount(&server)
            .await;

        let outcome = fetcher(&server, Some("secret")).fetch(USER, None).await;
        assert!(!outcome.is_degraded());

        let fragment = outcome.into_fragment();
        assert_eq!(fragment.username, "realice");
        assert_eq!(fragment.status, PresenceState::Unknown);
        assert!(fragment.custom_status.is_none());
        assert!(fragment.activity.is_none());
    }

    #[tokio::test]
    async fn test_missing_token_degrades() {
        let server = MockServer::start().await;
        mount_user(&server, user_body()).await;

        let previous = PresenceFragment {
            username: "realice".into(),
            display_name: "David".into(),
            status: PresenceState::Online,
            ..PresenceFragment::default()
        };
        let outcome = fetcher(&server, None).fetch(USER, Some(&previous)).await;
        assert!(outcome.is_degraded());

        let fragment = outcome.into_fragment();
        assert_eq!(fragment.display_name, "David");
        assert_eq!(fragment.status, PresenceState::Unknown);
    }

    #[tokio::test]
    async fn test_blank_token_degrades() {
        let server = MockServer::start().await;
        mount_user(&server, user_body()).await;

        let outcome = fetcher(&server, Some("  ")).fetch(USER, None).await;
        assert!(outcome.is_degraded());
    }

    #[tokio::test]
    async fn test_rejected_token_degrades() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/users/{USER}")))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let outcome = fetcher(&server, Some("wrong")).fetch(USER, None).await;
        assert!(outcome.is_degraded());
        assert_eq!(outcome.fragment().username, "unknown");
    }

    #[tokio::test]
    async fn test_default_avatar_without_hash() {
        let server = MockServer::start().await;
        mount_user(
            &server,
            json!({ "id": USER.to_string(), "username": "realice", "discriminator": "0" }),
        )
        .await;

        let fragment = fetcher(&server, Some("secret"))
            .fetch(USER, None)
            .await
            .into_fragment();
        assert_eq!(
            fragment.avatar_url,
            format!("https://cdn.example/embed/avatars/{}.png", (USER >> 22) % 6)
        );
        assert_eq!(fragment.display_name, "realice");
        assert!(fragment.avatar_hash.is_none());
        assert!(fragment.banner_url.is_none());
    }

    #[test]
    fn test_default_avatar_index_legacy_discriminator() {
        assert_eq!(default_avatar_index(1, "1337"), 2);
        assert_eq!(default_avatar_index(1, "garbage"), 0);
        assert_eq!(image_ext("abc"), "png");
    }
}
