//! Route table.

use axum::Router;
use axum::routing::{get, post};

use crate::handlers;
use crate::middleware::cache_control::{no_store, public_cache};
use crate::state::AppState;

/// Builds every route under `/api`, without the outer middleware stack.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config.server;

    let mut api_routes = Router::new()
        .merge(profile_routes(server.cache_max_age_seconds))
        .merge(health_routes());

    if server.refresh_token.as_deref().is_some_and(|t| !t.is_empty()) {
        api_routes = api_routes.merge(refresh_routes());
    } else {
        tracing::info!("No refresh token configured, manual refresh route not mounted");
    }

    Router::new()
        .nest("/api", api_routes)
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Snapshot reads, cacheable downstream
fn profile_routes(max_age_seconds: u64) -> Router<AppState> {
    Router::new()
        .route("/profile", get(handlers::profile::get_profile))
        .route("/profile/social", get(handlers::profile::get_social))
        .route("/profile/presence", get(handlers::profile::get_presence))
        .layer(public_cache(max_age_seconds))
}

/// Manual refresh trigger
fn refresh_routes() -> Router<AppState> {
    Router::new()
        .route("/profile/refresh", post(handlers::profile::refresh_profile))
        .layer(no_store())
}

/// Liveness probes
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
        .layer(no_store())
}
