//! Snapshot data model shared by the fetchers, the store, and the readers.

pub mod defaults;
pub mod outcome;
pub mod presence;
pub mod snapshot;
pub mod social;
pub mod timestamp;

pub use outcome::SourceOutcome;
pub use presence::{PresenceFragment, PresenceState};
pub use snapshot::Snapshot;
pub use social::SocialFragment;
