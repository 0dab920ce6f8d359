//! Cron scheduler for the periodic staleness check.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use profilehub_cache::{RefreshCoordinator, RefreshTrigger};
use profilehub_core::config::RefreshConfig;
use profilehub_core::error::AppError;

use crate::jobs::StalenessCheckJob;

/// Cron-based scheduler driving the staleness check
pub struct RefreshScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// The check run on every tick
    job: Arc<StalenessCheckJob>,
    /// Cron expression (with seconds)
    schedule: String,
}

impl std::fmt::Debug for RefreshScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshScheduler")
            .field("schedule", &self.schedule)
            .finish()
    }
}

impl RefreshScheduler {
    /// Create a new scheduler
    pub async fn new(
        coordinator: RefreshCoordinator,
        config: &RefreshConfig,
    ) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self {
            scheduler,
            job: Arc::new(StalenessCheckJob::new(coordinator)),
            schedule: config.check_schedule.clone(),
        })
    }

    /// Register all scheduled tasks
    pub async fn register_default_tasks(&self) -> Result<(), AppError> {
        self.register_staleness_check().await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Run one check in the background, outside the cron schedule.
    pub fn spawn_startup_check(&self) -> JoinHandle<()> {
        let job = Arc::clone(&self.job);
        tokio::spawn(async move {
            let summary = job.run(RefreshTrigger::Startup).await;
            tracing::info!(%summary, "Startup staleness check complete");
        })
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    async fn register_staleness_check(&self) -> Result<(), AppError> {
        let job = Arc::clone(&self.job);
        let cron = CronJob::new_async(self.schedule.as_str(), move |_uuid, _lock| {
            let job = Arc::clone(&job);
            Box::pin(async move {
                let summary = job.run(RefreshTrigger::Scheduled).await;
                tracing::debug!(%summary, "Scheduled staleness check complete");
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid staleness check schedule '{}': {e}",
                self.schedule
            ))
        })?;

        self.scheduler.add(cron).await.map_err(|e| {
            AppError::internal(format!("Failed to add staleness_check schedule: {e}"))
        })?;

        tracing::info!(schedule = %self.schedule, "Registered: staleness_check");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::Duration;

    use profilehub_cache::TrackedIdentities;
    use profilehub_core::error::ErrorKind;
    use profilehub_core::result::AppResult;
    use profilehub_core::traits::{PresenceSource, SnapshotStore, SocialSource};
    use profilehub_core::types::{
        PresenceFragment, Snapshot, SocialFragment, SourceOutcome,
    };

    #[derive(Debug)]
    struct Offline;

    #[async_trait]
    impl SocialSource for Offline {
        async fn fetch(&self, id: u64, p: Option<&SocialFragment>) -> SourceOutcome<SocialFragment> {
            SourceOutcome::Degraded(SocialFragment::placeholder(id, p))
        }
    }

    #[async_trait]
    impl PresenceSource for Offline {
        async fn fetch(
            &self,
            id: u64,
            p: Option<&PresenceFragment>,
        ) -> SourceOutcome<PresenceFragment> {
            SourceOutcome::Degraded(PresenceFragment::placeholder(id, p))
        }
    }

    #[async_trait]
    impl SnapshotStore for Offline {
        async fn load(&self) -> Snapshot {
            Snapshot::default()
        }

        async fn save(&self, _: &Snapshot) -> AppResult<()> {
            Ok(())
        }
    }

    async fn coordinator() -> RefreshCoordinator {
        let offline = Arc::new(Offline);
        RefreshCoordinator::bootstrap(
            offline.clone(),
            offline.clone(),
            offline,
            TrackedIdentities {
                social: 1,
                presence: 2,
            },
            Duration::hours(48),
        )
        .await
    }

    #[tokio::test]
    async fn test_register_and_shutdown() {
        let mut scheduler = RefreshScheduler::new(coordinator().await, &RefreshConfig::default())
            .await
            .unwrap();

        scheduler.register_default_tasks().await.unwrap();
        scheduler.start().await.unwrap();
        scheduler.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_schedule_is_a_configuration_error() {
        let config = RefreshConfig {
            check_schedule: "every twelve hours".to_string(),
            ..RefreshConfig::default()
        };
        let scheduler = RefreshScheduler::new(coordinator().await, &config)
            .await
            .unwrap();

        let err = scheduler.register_default_tasks().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn test_startup_check_runs_a_cycle() {
        let coordinator = coordinator().await;
        let reader = coordinator.reader();
        let scheduler = RefreshScheduler::new(coordinator, &RefreshConfig::default())
            .await
            .unwrap();

        scheduler.spawn_startup_check().await.unwrap();

        assert!(reader.status().last_attempt.is_some());
        assert!(!reader.current().ever_updated());
    }
}
