//! `status`: liveness and refresh state of the server.

use profilehub_core::error::AppError;

use crate::client::ApiClient;
use crate::output::{self, OutputFormat};

fn display(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Execute `status`
pub async fn execute(client: &ApiClient, format: OutputFormat) -> Result<(), AppError> {
    let status = client.status().await?;

    if format == OutputFormat::Json {
        output::print_json(&status);
        return Ok(());
    }

    output::print_heading("Server");
    for key in ["service", "version", "status", "uptime_seconds", "time"] {
        output::print_kv(key, &display(&status[key]));
    }

    output::print_heading("Refresh");
    let refresh = &status["refresh"];
    for key in [
        "in_flight",
        "stale",
        "last_update",
        "last_attempt",
        "staleness_threshold_hours",
    ] {
        output::print_kv(key, &display(&refresh[key]));
    }

    if let Some(err) = refresh["last_save_error"].as_str() {
        output::print_warning(&format!("Last save failed: {err}"));
    }

    Ok(())
}
