//! Job implementations.

pub mod staleness;

pub use staleness::StalenessCheckJob;
