//! Response bodies that are not the snapshot itself.

pub mod response;

pub use response::{DetailedHealthResponse, HealthResponse};
