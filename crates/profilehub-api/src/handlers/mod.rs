//! Route handlers.

pub mod health;
pub mod profile;

use axum::http::Uri;

use profilehub_core::error::AppError;

use crate::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    AppError::not_found(format!("No route for {}", uri.path())).into()
}
