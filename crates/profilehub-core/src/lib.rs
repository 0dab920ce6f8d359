//! # profilehub-core
//!
//! Core crate for ProfileHub. Contains configuration schemas, the snapshot
//! data model, source and store traits, and the unified error system.
//!
//! This crate has **no** internal dependencies on other ProfileHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
