//! Scheduled refresh work for ProfileHub.
//!
//! This crate provides:
//! - A cron scheduler that periodically checks snapshot staleness
//! - The staleness-check job it runs, also used once at startup

pub mod jobs;
pub mod scheduler;

pub use jobs::StalenessCheckJob;
pub use scheduler::RefreshScheduler;
