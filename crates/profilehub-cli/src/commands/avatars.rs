//! `avatars`: avatar and banner URLs from both sources.

use serde::Serialize;
use tabled::Tabled;

use profilehub_core::error::AppError;
use profilehub_core::types::Snapshot;

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ImageRow {
    #[tabled(rename = "Source")]
    pub source: &'static str,
    #[tabled(rename = "Kind")]
    pub kind: &'static str,
    #[tabled(rename = "URL")]
    pub url: String,
}

/// Image URLs present in `snapshot`; empty URLs are skipped.
pub fn image_rows(snapshot: &Snapshot) -> Vec<ImageRow> {
    let mut rows = Vec::new();

    if let Some(social) = &snapshot.social {
        rows.push(("social", "avatar", social.avatar_url.clone()));
    }
    if let Some(presence) = &snapshot.presence {
        rows.push(("presence", "avatar", presence.avatar_url.clone()));
        if let Some(banner) = &presence.banner_url {
            rows.push(("presence", "banner", banner.clone()));
        }
    }

    rows.into_iter()
        .filter(|(_, _, url)| !url.is_empty())
        .map(|(source, kind, url)| ImageRow { source, kind, url })
        .collect()
}

/// Execute `avatars`
pub async fn execute(client: &ApiClient, format: OutputFormat) -> Result<(), AppError> {
    let snapshot = client.snapshot().await?;
    output::print_list(&image_rows(&snapshot), format);
    Ok(())
}
