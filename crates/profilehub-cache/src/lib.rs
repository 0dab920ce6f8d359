//! # profilehub-cache
//!
//! Holds the visible [`Snapshot`](profilehub_core::types::Snapshot) and
//! drives refresh cycles against the two sources.
//!
//! - [`RefreshCoordinator`] is the only writer. It admits at most one
//!   refresh at a time; concurrent callers join the cycle already running.
//! - [`SnapshotReader`] is the read side handed to the HTTP layer. Reads
//!   never wait on a refresh.

pub mod coordinator;
pub mod merge;
pub mod reader;
pub mod staleness;
mod state;

pub use coordinator::{RefreshCoordinator, RefreshTrigger, TrackedIdentities};
pub use reader::{RefreshStatus, SnapshotReader};
