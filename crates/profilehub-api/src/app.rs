//! Application builder: wires router, middleware and state into an Axum app.

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use profilehub_core::error::{AppError, ErrorKind};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(build_compression_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum::middleware::from_fn(request_logging))
}

/// Binds the configured address and serves until `shutdown` flips to `true`.
pub async fn serve(state: AppState, mut shutdown: watch::Receiver<bool>) -> Result<(), AppError> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;

    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
            tracing::info!("HTTP server draining connections");
        })
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "HTTP server error", e))
}
