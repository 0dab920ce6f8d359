//! Health check handlers.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use crate::dto::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

fn liveness(state: &AppState) -> HealthResponse {
    let tracked = state.coordinator.identities();
    HealthResponse {
        status: "ok".to_string(),
        service: "profilehub".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        social_user_id: tracked.social,
        presence_user_id: tracked.presence.to_string(),
        time: Utc::now(),
    }
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(liveness(&state))
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let health = liveness(&state);
    let uptime_seconds = (health.time - state.started_at).num_seconds();

    Json(DetailedHealthResponse {
        health,
        uptime_seconds,
        refresh: state.reader.status(),
    })
}
