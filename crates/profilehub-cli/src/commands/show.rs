//! `show`: human summary of the cached snapshot.

use serde::Serialize;
use tabled::Tabled;

use profilehub_core::error::AppError;
use profilehub_core::types::Snapshot;

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

/// One line of the summary table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Source")]
    pub source: &'static str,
    #[tabled(rename = "Field")]
    pub field: &'static str,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl FieldRow {
    fn new(source: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self {
            source,
            field,
            value: value.to_string(),
        }
    }
}

fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}

/// Flatten a snapshot into display rows.
pub fn summary_rows(snapshot: &Snapshot) -> Vec<FieldRow> {
    let mut rows = Vec::new();

    if let Some(social) = &snapshot.social {
        rows.push(FieldRow::new("social", "username", &social.username));
        rows.push(FieldRow::new("social", "display name", &social.display_name));
        rows.push(FieldRow::new("social", "friends", social.friends_count));
        rows.push(FieldRow::new("social", "followers", social.followers_count));
        rows.push(FieldRow::new("social", "following", social.following_count));
        if social.is_banned {
            rows.push(FieldRow::new("social", "banned", "yes"));
        }
    }

    if let Some(presence) = &snapshot.presence {
        rows.push(FieldRow::new("presence", "username", &presence.username));
        rows.push(FieldRow::new("presence", "display name", &presence.display_name));
        rows.push(FieldRow::new("presence", "status", presence.status));
        rows.push(FieldRow::new(
            "presence",
            "custom status",
            or_dash(presence.custom_status.as_deref()),
        ));
        rows.push(FieldRow::new(
            "presence",
            "activity",
            or_dash(presence.activity.as_deref()),
        ));
    }

    rows
}

/// Render a snapshot in the selected format.
pub fn render(snapshot: &Snapshot, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(snapshot),
        OutputFormat::Table => {
            match snapshot.last_update {
                Some(at) => output::print_kv("Last update", &at.to_rfc3339()),
                None => output::print_warning("Profile has never been refreshed"),
            }
            output::print_list(&summary_rows(snapshot), format);
        }
    }
}

/// Execute `show`
pub async fn execute(client: &ApiClient, format: OutputFormat) -> Result<(), AppError> {
    let snapshot = client.snapshot().await?;
    render(&snapshot, format);
    Ok(())
}
