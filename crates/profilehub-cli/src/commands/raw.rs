//! `raw`: print the snapshot JSON untouched.

use profilehub_core::error::AppError;

use crate::client::ApiClient;
use crate::output;

/// Execute `raw`
pub async fn execute(client: &ApiClient) -> Result<(), AppError> {
    let value = client.raw_snapshot().await?;
    output::print_json(&value);
    Ok(())
}
