//! Wire shapes returned by the providers.
//!
//! Only the fields ProfileHub reads are modelled; everything else is ignored.

use serde::Deserialize;

/// `GET /v1/users/{id}` on the users API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SocialUserDto {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub is_banned: bool,
    pub created: Option<String>,
}

/// `GET /v1/users/avatar-headshot` on the thumbnails API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThumbnailBatchDto {
    pub data: Vec<ThumbnailDto>,
}

/// One entry of a thumbnail batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThumbnailDto {
    pub target_id: u64,
    pub state: String,
    pub image_url: Option<String>,
}

/// `GET /v1/users/{id}/{relation}/count` on the friends API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CountDto {
    pub count: i64,
}

/// `GET /users/{id}` on the presence provider's REST API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PresenceUserDto {
    pub id: String,
    pub username: String,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
    pub discriminator: String,
    pub bot: bool,
    pub public_flags: u64,
    pub banner: Option<String>,
    pub accent_color: Option<u32>,
}

/// Envelope of the live-status service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusEnvelopeDto {
    pub success: bool,
    pub data: Option<LiveStatusDto>,
}

/// Live status of a user sharing a context with the status service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiveStatusDto {
    pub discord_status: String,
    pub activities: Vec<ActivityDto>,
}

/// One activity entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActivityDto {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    pub state: Option<String>,
}

impl ActivityDto {
    /// Activity type used for user-set custom statuses.
    pub const CUSTOM_STATUS: u8 = 4;
}
