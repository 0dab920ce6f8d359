//! Refresh coordination.
//!
//! A cycle fetches both fragments concurrently, merges them, saves the
//! result, and swaps it in. Only one cycle runs at a time: a caller that
//! arrives while one is running waits on that cycle's result instead of
//! starting another. The cycle itself runs on a spawned task so a caller
//! that goes away (a dropped HTTP request) cannot abort it halfway.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use profilehub_core::traits::{PresenceSource, SnapshotStore, SocialSource};
use profilehub_core::types::Snapshot;

use crate::merge::merge;
use crate::reader::SnapshotReader;
use crate::staleness::is_stale;
use crate::state::{CycleResult, Shared};

/// What started a refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// Periodic staleness check.
    Scheduled,
    /// Staleness check run once at startup.
    Startup,
    /// Explicit operator request.
    Manual,
}

impl fmt::Display for RefreshTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduled => write!(f, "scheduled"),
            Self::Startup => write!(f, "startup"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Provider user ids of the tracked identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedIdentities {
    pub social: u64,
    pub presence: u64,
}

/// Sole writer of the visible snapshot.
///
/// Cloning is cheap and every clone drives the same state.
#[derive(Debug, Clone)]
pub struct RefreshCoordinator {
    shared: Arc<Shared>,
    social: Arc<dyn SocialSource>,
    presence: Arc<dyn PresenceSource>,
    store: Arc<dyn SnapshotStore>,
    identities: TrackedIdentities,
}

/// Clears the in-flight marker when a cycle ends, including by panic.
struct InFlightGuard<'a>(&'a Shared);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.cycle().in_flight = None;
    }
}

impl RefreshCoordinator {
    /// Load the persisted snapshot and make it visible.
    ///
    /// Never fails: an absent or unreadable store yields its placeholder.
    pub async fn bootstrap(
        store: Arc<dyn SnapshotStore>,
        social: Arc<dyn SocialSource>,
        presence: Arc<dyn PresenceSource>,
        identities: TrackedIdentities,
        staleness_threshold: chrono::Duration,
    ) -> Self {
        let initial = store.load().await;
        info!(
            last_update = ?initial.last_update,
            social_user_id = identities.social,
            presence_user_id = identities.presence,
            "Refresh coordinator initialized"
        );

        Self {
            shared: Arc::new(Shared::new(initial, staleness_threshold)),
            social,
            presence,
            store,
            identities,
        }
    }

    /// Read handle over the same state.
    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader::new(Arc::clone(&self.shared))
    }

    /// Identities every cycle fetches.
    pub fn identities(&self) -> TrackedIdentities {
        self.identities
    }

    /// Run a refresh now, or join the one already running, and return the
    /// snapshot it produced.
    ///
    /// The returned snapshot has already been saved (or the save attempted)
    /// and swapped in.
    pub async fn refresh_now(&self, trigger: RefreshTrigger) -> Arc<Snapshot> {
        let mut result = self.admit(trigger);

        let produced = result
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|done| done.clone());

        match produced {
            Some(snapshot) => snapshot,
            None => {
                warn!(%trigger, "Refresh cycle ended without a result, serving current snapshot");
                self.shared.current()
            }
        }
    }

    /// Refresh only when the visible snapshot is stale and nothing is
    /// running. Returns the new snapshot when a cycle ran.
    pub async fn refresh_if_stale(&self, trigger: RefreshTrigger) -> Option<Arc<Snapshot>> {
        let busy = self.shared.cycle().in_flight.is_some();
        if busy {
            debug!(%trigger, "Refresh already in flight, skipping staleness check");
            return None;
        }

        let last_update = self.shared.current().last_update;
        if !is_stale(last_update, Utc::now(), self.shared.threshold) {
            debug!(%trigger, ?last_update, "Snapshot is fresh, no refresh needed");
            return None;
        }

        info!(%trigger, ?last_update, "Snapshot is stale, refreshing");
        Some(self.refresh_now(trigger).await)
    }

    /// Join the running cycle or start a new one.
    fn admit(&self, trigger: RefreshTrigger) -> CycleResult {
        let mut cycle = self.shared.cycle();

        if let Some(running) = &cycle.in_flight {
            debug!(%trigger, "Joining in-flight refresh");
            return running.clone();
        }

        let (tx, rx) = watch::channel(None);
        cycle.in_flight = Some(rx.clone());
        cycle.last_attempt = Some(Utc::now());

        let this = self.clone();
        tokio::spawn(async move { this.run_cycle(trigger, tx).await });

        rx
    }

    async fn run_cycle(&self, trigger: RefreshTrigger, done: watch::Sender<Option<Arc<Snapshot>>>) {
        let guard = InFlightGuard(&self.shared);
        let started = Instant::now();
        let previous = self.shared.current();

        info!(%trigger, "Refresh cycle started");

        let (social, presence) = tokio::join!(
            self.social
                .fetch(self.identities.social, previous.social.as_ref()),
            self.presence
                .fetch(self.identities.presence, previous.presence.as_ref()),
        );
        let social_degraded = social.is_degraded();
        let presence_degraded = presence.is_degraded();

        let next = Arc::new(merge(&previous, social, presence, Utc::now()));

        match self.store.save(&next).await {
            Ok(()) => self.shared.cycle().last_save_error = None,
            Err(e) => {
                error!(error = %e, "Failed to persist snapshot, serving it from memory only");
                self.shared.cycle().last_save_error = Some(e.to_string());
            }
        }

        self.shared.swap(Arc::clone(&next));
        drop(guard);

        info!(
            %trigger,
            social_degraded,
            presence_degraded,
            last_update = ?next.last_update,
            duration_ms = started.elapsed().as_millis() as u64,
            "Refresh cycle finished"
        );

        // Joiners may have gone away; the swap above is what matters.
        let _ = done.send(Some(next));
    }
}
