//! Source fetcher traits for the two identity providers.

use async_trait::async_trait;

use crate::types::{PresenceFragment, SocialFragment, SourceOutcome};

/// Fetches the social-graph fragment for a tracked identity.
///
/// Implementations never fail: a failed secondary lookup degrades one field,
/// a failed primary lookup yields [`SourceOutcome::Degraded`] built from
/// `previous`.
#[async_trait]
pub trait SocialSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the fragment for `user_id`.
    async fn fetch(
        &self,
        user_id: u64,
        previous: Option<&SocialFragment>,
    ) -> SourceOutcome<SocialFragment>;
}

/// Fetches the presence fragment for a tracked identity.
///
/// Same degradation contract as [`SocialSource`]. An unresolvable live
/// status is field-level degradation, not a degraded fragment.
#[async_trait]
pub trait PresenceSource: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch the fragment for `user_id`.
    async fn fetch(
        &self,
        user_id: u64,
        previous: Option<&PresenceFragment>,
    ) -> SourceOutcome<PresenceFragment>;
}
