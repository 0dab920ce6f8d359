//! Tower layers and middleware functions.

pub mod cache_control;
pub mod compression;
pub mod cors;
pub mod logging;
