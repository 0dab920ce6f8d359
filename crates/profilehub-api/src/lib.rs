//! # profilehub-api
//!
//! HTTP API layer for ProfileHub built on Axum.
//!
//! Serves the cached snapshot (whole, or one fragment), the guarded manual
//! refresh trigger, and liveness probes. Middleware covers CORS, response
//! caching headers, compression and request logging.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
