//! ProfileHub Server: cached social and presence profile for one identity.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use profilehub_api::AppState;
use profilehub_cache::{RefreshCoordinator, TrackedIdentities};
use profilehub_core::config::AppConfig;
use profilehub_core::error::AppError;
use profilehub_core::types::Snapshot;
use profilehub_sources::{PresenceFetcher, SocialFetcher, build_http_client};
use profilehub_storage::JsonFileStore;
use profilehub_worker::RefreshScheduler;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("PROFILEHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ProfileHub v{}", env!("CARGO_PKG_VERSION"));

    let identities = TrackedIdentities {
        social: config.sources.social.user_id,
        presence: config.sources.presence.user_id,
    };

    // ── Step 1: Snapshot store ───────────────────────────────────
    let store = Arc::new(JsonFileStore::new(
        &config.refresh.store_path,
        Snapshot::placeholder(identities.social, identities.presence),
    ));
    tracing::info!(path = %store.path().display(), "Snapshot store ready");

    // ── Step 2: Source fetchers ──────────────────────────────────
    let http = build_http_client(&config.sources)?;
    let social = Arc::new(SocialFetcher::new(
        http.clone(),
        config.sources.social.clone(),
    ));
    let presence = Arc::new(PresenceFetcher::new(http, config.sources.presence.clone()));
    if config.sources.presence.usable_bot_token().is_none() {
        tracing::warn!("No presence bot token configured, presence fragment will stay degraded");
    }

    // ── Step 3: Refresh coordinator ──────────────────────────────
    let coordinator = RefreshCoordinator::bootstrap(
        store,
        social,
        presence,
        identities,
        config.refresh.staleness_threshold()?,
    )
    .await;

    // ── Step 4: Scheduler ────────────────────────────────────────
    let mut scheduler = RefreshScheduler::new(coordinator.clone(), &config.refresh).await?;
    scheduler.register_default_tasks().await?;
    scheduler.start().await?;

    let startup_check = config
        .refresh
        .check_on_startup
        .then(|| scheduler.spawn_startup_check());

    // ── Step 5: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    // ── Step 6: HTTP server ──────────────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(Arc::new(config), coordinator);
    profilehub_api::serve(state, shutdown_rx).await?;

    // ── Step 7: Wait for background tasks ────────────────────────
    tracing::info!("Waiting for background tasks to complete...");

    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Scheduler shutdown failed: {e}");
    }
    if let Some(handle) = startup_check {
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Startup staleness check still running at shutdown");
        }
    }

    tracing::info!("ProfileHub server shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
