//! Snapshot handlers.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use profilehub_cache::RefreshTrigger;

use crate::extractors::RefreshAuth;
use crate::state::AppState;

/// GET /api/profile
pub async fn get_profile(State(state): State<AppState>) -> Response {
    let snapshot = state.reader.current();
    Json(snapshot.as_ref()).into_response()
}

/// GET /api/profile/social
pub async fn get_social(State(state): State<AppState>) -> Response {
    let snapshot = state.reader.current();
    Json(snapshot.social.as_ref()).into_response()
}

/// GET /api/profile/presence
pub async fn get_presence(State(state): State<AppState>) -> Response {
    let snapshot = state.reader.current();
    Json(snapshot.presence.as_ref()).into_response()
}

/// POST /api/profile/refresh
///
/// Runs a refresh (or joins the running one) and returns its snapshot.
pub async fn refresh_profile(_auth: RefreshAuth, State(state): State<AppState>) -> Response {
    tracing::info!("Manual refresh requested");
    let snapshot = state.coordinator.refresh_now(RefreshTrigger::Manual).await;
    Json(snapshot.as_ref()).into_response()
}
