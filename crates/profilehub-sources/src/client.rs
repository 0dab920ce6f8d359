//! Shared HTTP client and request helpers.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::warn;

use profilehub_core::config::SourcesConfig;
use profilehub_core::error::{AppError, ErrorKind};
use profilehub_core::result::AppResult;

/// Build the client used by both fetchers.
///
/// The per-request timeout bounds every provider lookup.
pub fn build_http_client(config: &SourcesConfig) -> AppResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .user_agent(&config.user_agent)
        .build()
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })
}

/// Send `request` and decode a JSON body.
///
/// Non-2xx responses become `ExternalService` errors, except 404 which maps
/// to `NotFound`.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
    lookup: &str,
) -> AppResult<T> {
    let response = request.send().await.map_err(|e| {
        AppError::with_source(
            ErrorKind::ExternalService,
            format!("{lookup}: request failed"),
            e,
        )
    })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(AppError::not_found(format!("{lookup}: not found")));
    }
    if !status.is_success() {
        return Err(AppError::external_service(format!(
            "{lookup}: provider returned {}",
            status.as_u16()
        )));
    }

    response.json::<T>().await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("{lookup}: malformed response body"),
            e,
        )
    })
}

/// Collapse a failed field lookup into its default, logging the cause.
pub(crate) fn or_default<T>(result: AppResult<T>, default: T, lookup: &str, user_id: u64) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(lookup, user_id, error = %e, "Lookup failed, using default");
            default
        }
    }
}
