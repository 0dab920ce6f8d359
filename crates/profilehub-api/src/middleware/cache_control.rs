//! `Cache-Control` headers for snapshot and probe routes.

use axum::http::HeaderValue;
use axum::http::header::CACHE_CONTROL;
use tower_http::set_header::SetResponseHeaderLayer;

/// Lets downstream clients reuse snapshot responses for `max_age_seconds`.
pub fn public_cache(max_age_seconds: u64) -> SetResponseHeaderLayer<HeaderValue> {
    let value = HeaderValue::from_str(&format!("public, max-age={max_age_seconds}"))
        .unwrap_or_else(|_| HeaderValue::from_static("no-cache"));
    SetResponseHeaderLayer::overriding(CACHE_CONTROL, value)
}

/// Marks a response as never cacheable.
pub fn no_store() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(CACHE_CONTROL, HeaderValue::from_static("no-store"))
}
