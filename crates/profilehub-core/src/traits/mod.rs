//! Core traits defined in `profilehub-core` and implemented by other crates.

pub mod source;
pub mod store;

pub use source::{PresenceSource, SocialSource};
pub use store::SnapshotStore;
