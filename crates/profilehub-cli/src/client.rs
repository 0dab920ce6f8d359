//! Thin HTTP client for the ProfileHub API.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use profilehub_core::error::{AppError, ErrorKind};
use profilehub_core::result::AppResult;
use profilehub_core::types::Snapshot;

/// Manual refreshes wait on both providers, so allow well past their timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("profilehub-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET /api/profile
    pub async fn snapshot(&self) -> AppResult<Snapshot> {
        send(self.http.get(self.url("/api/profile"))).await
    }

    /// GET /api/profile as untouched JSON
    pub async fn raw_snapshot(&self) -> AppResult<serde_json::Value> {
        send(self.http.get(self.url("/api/profile"))).await
    }

    /// POST /api/profile/refresh
    pub async fn refresh(&self, token: &str) -> AppResult<Snapshot> {
        send(
            self.http
                .post(self.url("/api/profile/refresh"))
                .bearer_auth(token),
        )
        .await
    }

    /// GET /api/health/detailed
    pub async fn status(&self) -> AppResult<serde_json::Value> {
        send(self.http.get(self.url("/api/health/detailed"))).await
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> AppResult<T> {
    let response = request.send().await.map_err(|e| {
        AppError::with_source(
            ErrorKind::ServiceUnavailable,
            "Could not reach the ProfileHub server",
            e,
        )
    })?;

    let status = response.status();
    if !status.is_success() {
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| format!("server returned {}", status.as_u16()));
        let kind = match status {
            StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            _ => ErrorKind::ExternalService,
        };
        return Err(AppError::new(kind, message));
    }

    response.json::<T>().await.map_err(|e| {
        AppError::with_source(ErrorKind::Serialization, "Malformed server response", e)
    })
}
