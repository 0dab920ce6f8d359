//! `refresh`: trigger a manual refresh on the server.

use clap::Args;

use profilehub_core::error::AppError;

use crate::client::ApiClient;
use crate::commands::show;
use crate::output::{self, OutputFormat};

/// Arguments for `refresh`
#[derive(Debug, Args)]
pub struct RefreshArgs {
    /// Refresh token configured on the server
    #[arg(long, env = "PROFILEHUB_REFRESH_TOKEN", hide_env_values = true)]
    pub token: String,
}

/// Execute `refresh`
pub async fn execute(
    args: &RefreshArgs,
    client: &ApiClient,
    format: OutputFormat,
) -> Result<(), AppError> {
    let snapshot = client.refresh(&args.token).await?;

    if format == OutputFormat::Table {
        output::print_success("Refresh complete");
    }
    show::render(&snapshot, format);
    Ok(())
}
