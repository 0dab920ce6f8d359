//! `RefreshAuth` extractor: checks the bearer token on the manual refresh route.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use profilehub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Proof that the request carried the configured refresh token.
#[derive(Debug, Clone, Copy)]
pub struct RefreshAuth;

impl FromRequestParts<AppState> for RefreshAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state
            .config
            .server
            .refresh_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::not_found("Manual refresh is disabled"))?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        if !tokens_match(token.trim(), expected) {
            tracing::warn!("Manual refresh rejected: bad token");
            return Err(AppError::authentication("Invalid refresh token").into());
        }

        Ok(RefreshAuth)
    }
}

/// Compares without short-circuiting on the first differing byte.
fn tokens_match(given: &str, expected: &str) -> bool {
    given.len() == expected.len()
        && given
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
