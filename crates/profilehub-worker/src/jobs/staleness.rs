//! Staleness check job.

use serde_json::Value;
use tracing;

use profilehub_cache::{RefreshCoordinator, RefreshTrigger};

/// Refreshes the snapshot when it has aged past the threshold.
///
/// Fire-and-forget from the scheduler's point of view: a check that finds
/// the snapshot fresh, or a refresh already running, does nothing.
#[derive(Debug, Clone)]
pub struct StalenessCheckJob {
    coordinator: RefreshCoordinator,
}

impl StalenessCheckJob {
    /// Create a new staleness check job
    pub fn new(coordinator: RefreshCoordinator) -> Self {
        Self { coordinator }
    }

    /// Run one check and summarize what happened.
    pub async fn run(&self, trigger: RefreshTrigger) -> Value {
        tracing::debug!(%trigger, "Running staleness check");

        match self.coordinator.refresh_if_stale(trigger).await {
            Some(snapshot) => serde_json::json!({
                "task": "staleness_check",
                "trigger": trigger.to_string(),
                "refreshed": true,
                "last_update": snapshot.last_update,
            }),
            None => serde_json::json!({
                "task": "staleness_check",
                "trigger": trigger.to_string(),
                "refreshed": false,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};

    use profilehub_cache::TrackedIdentities;
    use profilehub_core::result::AppResult;
    use profilehub_core::traits::{PresenceSource, SnapshotStore, SocialSource};
    use profilehub_core::types::{
        PresenceFragment, Snapshot, SocialFragment, SourceOutcome,
    };

    #[derive(Debug, Default)]
    struct CountingSources {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SocialSource for CountingSources {
        async fn fetch(&self, user_id: u64, _: Option<&SocialFragment>) -> SourceOutcome<SocialFragment> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            SourceOutcome::Fresh(SocialFragment {
                user_id,
                ..SocialFragment::default()
            })
        }
    }

    #[async_trait]
    impl PresenceSource for CountingSources {
        async fn fetch(
            &self,
            user_id: u64,
            _: Option<&PresenceFragment>,
        ) -> SourceOutcome<PresenceFragment> {
            SourceOutcome::Fresh(PresenceFragment {
                user_id: user_id.to_string(),
                ..PresenceFragment::default()
            })
        }
    }

    #[derive(Debug)]
    struct FixedStore(Snapshot);

    #[async_trait]
    impl SnapshotStore for FixedStore {
        async fn load(&self) -> Snapshot {
            self.0.clone()
        }

        async fn save(&self, _: &Snapshot) -> AppResult<()> {
            Ok(())
        }
    }

    async fn job(initial: Snapshot) -> (StalenessCheckJob, Arc<CountingSources>) {
        let sources = Arc::new(CountingSources::default());
        let coordinator = RefreshCoordinator::bootstrap(
            Arc::new(FixedStore(initial)),
            sources.clone(),
            sources.clone(),
            TrackedIdentities {
                social: 1,
                presence: 2,
            },
            Duration::hours(48),
        )
        .await;
        (StalenessCheckJob::new(coordinator), sources)
    }

    #[tokio::test]
    async fn test_stale_snapshot_is_refreshed() {
        let (job, sources) = job(Snapshot::default()).await;

        let summary = job.run(RefreshTrigger::Startup).await;

        assert_eq!(summary["refreshed"], true);
        assert_eq!(summary["trigger"], "startup");
        assert_eq!(sources.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fresh_snapshot_is_left_alone() {
        let (job, sources) = job(Snapshot {
            last_update: Some(Utc::now() - Duration::hours(47)),
            ..Snapshot::default()
        })
        .await;

        let summary = job.run(RefreshTrigger::Scheduled).await;

        assert_eq!(summary["refreshed"], false);
        assert_eq!(sources.calls.load(Ordering::SeqCst), 0);
    }
}
