//! Social-graph fetcher.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use profilehub_core::config::SocialSourceConfig;
use profilehub_core::error::AppError;
use profilehub_core::result::AppResult;
use profilehub_core::traits::source::SocialSource;
use profilehub_core::types::defaults::{DEFAULT_AVATAR_URL, DEFAULT_COUNT};
use profilehub_core::types::timestamp::parse_lenient;
use profilehub_core::types::{SocialFragment, SourceOutcome};

use crate::client::{fetch_json, or_default};
use crate::dto::{CountDto, SocialUserDto, ThumbnailBatchDto};

/// Relationship counters exposed by the friends API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Friends,
    Followers,
    Followings,
}

impl Relation {
    fn segment(self) -> &'static str {
        match self {
            Self::Friends => "friends",
            Self::Followers => "followers",
            Self::Followings => "followings",
        }
    }

    fn lookup(self) -> &'static str {
        match self {
            Self::Friends => "social.friends_count",
            Self::Followers => "social.followers_count",
            Self::Followings => "social.following_count",
        }
    }
}

/// Fetches profile, avatar, and relationship counts for one user.
#[derive(Debug, Clone)]
pub struct SocialFetcher {
    http: Client,
    config: SocialSourceConfig,
}

impl SocialFetcher {
    /// Create a fetcher sharing `http` with the other source.
    pub fn new(http: Client, config: SocialSourceConfig) -> Self {
        Self { http, config }
    }

    fn base(url: &str) -> &str {
        url.trim_end_matches('/')
    }

    async fn fetch_profile(&self, user_id: u64) -> AppResult<SocialUserDto> {
        let url = format!(
            "{}/v1/users/{user_id}",
            Self::base(&self.config.users_base_url)
        );
        fetch_json(self.http.get(url), "social.profile").await
    }

    async fn fetch_avatar(&self, user_id: u64) -> AppResult<String> {
        let url = format!(
            "{}/v1/users/avatar-headshot",
            Self::base(&self.config.thumbnails_base_url)
        );
        let request = self.http.get(url).query(&[
            ("userIds", user_id.to_string()),
            ("size", self.config.avatar_size.clone()),
            ("format", self.config.avatar_format.clone()),
        ]);
        let batch: ThumbnailBatchDto = fetch_json(request, "social.avatar").await?;

        batch
            .data
            .into_iter()
            .find_map(|t| t.image_url.filter(|u| !u.is_empty()))
            .ok_or_else(|| AppError::external_service("social.avatar: no image in response"))
    }

    async fn fetch_count(&self, user_id: u64, relation: Relation) -> AppResult<u64> {
        let url = format!(
            "{}/v1/users/{user_id}/{}/count",
            Self::base(&self.config.friends_base_url),
            relation.segment()
        );
        let body: CountDto = fetch_json(self.http.get(url), relation.lookup()).await?;
        Ok(body.count.max(0) as u64)
    }
}

#[async_trait]
impl SocialSource for SocialFetcher {
    async fn fetch(
        &self,
        user_id: u64,
        previous: Option<&SocialFragment>,
    ) -> SourceOutcome<SocialFragment> {
        let profile = match self.fetch_profile(user_id).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(user_id, error = %e, "Social profile lookup failed, fragment degraded");
                return SourceOutcome::Degraded(SocialFragment::placeholder(user_id, previous));
            }
        };

        let (avatar, friends, followers, following) = tokio::join!(
            self.fetch_avatar(user_id),
            self.fetch_count(user_id, Relation::Friends),
            self.fetch_count(user_id, Relation::Followers),
            self.fetch_count(user_id, Relation::Followings),
        );

        let fragment = SocialFragment {
            user_id,
            username: profile.name,
            display_name: profile.display_name,
            description: profile.description,
            is_banned: profile.is_banned,
            created_at: profile.created.as_deref().and_then(parse_lenient),
            avatar_url: or_default(
                avatar,
                DEFAULT_AVATAR_URL.to_string(),
                "social.avatar",
                user_id,
            ),
            friends_count: or_default(
                friends,
                DEFAULT_COUNT,
                Relation::Friends.lookup(),
                user_id,
            ),
            followers_count: or_default(
                followers,
                DEFAULT_COUNT,
                Relation::Followers.lookup(),
                user_id,
            ),
            following_count: or_default(
                following,
                DEFAULT_COUNT,
                Relation::Followings.lookup(),
                user_id,
            ),
        };

        debug!(user_id, username = %fragment.username, "Fetched social fragment");
        SourceOutcome::Fresh(fragment)
    }
}
