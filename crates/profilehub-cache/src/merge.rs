//! Combining fetch outcomes into the next snapshot.

use chrono::{DateTime, Utc};

use profilehub_core::types::{PresenceFragment, Snapshot, SocialFragment, SourceOutcome};

/// Build the snapshot produced by one refresh cycle.
///
/// `last_update` advances to `completed_at` when at least one source
/// produced live data. When both sources degraded, the previous
/// `last_update` is kept so the snapshot keeps reading as stale.
pub fn merge(
    previous: &Snapshot,
    social: SourceOutcome<SocialFragment>,
    presence: SourceOutcome<PresenceFragment>,
    completed_at: DateTime<Utc>,
) -> Snapshot {
    let last_update = if social.is_degraded() && presence.is_degraded() {
        previous.last_update
    } else {
        Some(completed_at)
    };

    Snapshot {
        last_update,
        social: Some(social.into_fragment()),
        presence: Some(presence.into_fragment()),
    }
}
