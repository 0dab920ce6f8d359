//! Shared test helpers for API tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use profilehub_api::AppState;
use profilehub_cache::{RefreshCoordinator, TrackedIdentities};
use profilehub_core::config::AppConfig;
use profilehub_core::traits::{PresenceSource, SocialSource};
use profilehub_core::types::{
    PresenceFragment, PresenceState, Snapshot, SocialFragment, SourceOutcome,
};
use profilehub_storage::JsonFileStore;

/// Social and presence source answering from memory.
#[derive(Debug, Default)]
pub struct StubSources {
    pub calls: AtomicUsize,
}

#[async_trait]
impl SocialSource for StubSources {
    async fn fetch(&self, user_id: u64, _: Option<&SocialFragment>) -> SourceOutcome<SocialFragment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SourceOutcome::Fresh(SocialFragment {
            user_id,
            username: "realice".into(),
            display_name: "David".into(),
            friends_count: 42,
            followers_count: 10,
            ..SocialFragment::default()
        })
    }
}

#[async_trait]
impl PresenceSource for StubSources {
    async fn fetch(
        &self,
        user_id: u64,
        _: Option<&PresenceFragment>,
    ) -> SourceOutcome<PresenceFragment> {
        SourceOutcome::Fresh(PresenceFragment {
            user_id: user_id.to_string(),
            username: "realice".into(),
            display_name: "David".into(),
            status: PresenceState::Online,
            ..PresenceFragment::default()
        })
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Sources behind the coordinator
    pub sources: Arc<StubSources>,
    /// Application config
    pub config: AppConfig,
    _data_dir: TempDir,
}

impl TestApp {
    /// Create a new test application, optionally with a refresh token
    pub async fn new(refresh_token: Option<&str>) -> Self {
        let mut config = AppConfig::default();
        config.server.refresh_token = refresh_token.map(str::to_string);

        let data_dir = TempDir::new().expect("Failed to create temp dir");
        let identities = TrackedIdentities {
            social: config.sources.social.user_id,
            presence: config.sources.presence.user_id,
        };
        let store = Arc::new(JsonFileStore::new(
            data_dir.path().join("profile_data.json"),
            Snapshot::placeholder(identities.social, identities.presence),
        ));
        let sources = Arc::new(StubSources::default());

        let coordinator = RefreshCoordinator::bootstrap(
            store,
            sources.clone(),
            sources.clone(),
            identities,
            config.refresh.staleness_threshold().unwrap(),
        )
        .await;

        let state = AppState::new(Arc::new(config.clone()), coordinator);
        let router = profilehub_api::build_app(state);

        Self {
            router,
            sources,
            config,
            _data_dir: data_dir,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, token: Option<&str>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req.body(Body::empty()).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub fn fetches(&self) -> usize {
        self.sources.calls.load(Ordering::SeqCst)
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
