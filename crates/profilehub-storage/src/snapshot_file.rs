//! JSON file snapshot store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use profilehub_core::error::{AppError, ErrorKind};
use profilehub_core::result::AppResult;
use profilehub_core::traits::store::SnapshotStore;
use profilehub_core::types::Snapshot;

/// Stores the snapshot as one pretty-printed JSON document.
///
/// Saves go to a uniquely named sibling file which is flushed and then
/// renamed over the target, so readers only ever see a complete document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    /// Location of the persisted document.
    path: PathBuf,
    /// Snapshot returned when the document is missing or unusable.
    fallback: Snapshot,
}

impl JsonFileStore {
    /// Create a store for `path`, serving `fallback` until a save succeeds.
    pub fn new(path: impl Into<PathBuf>, fallback: Snapshot) -> Self {
        Self {
            path: path.into(),
            fallback,
        }
    }

    /// Location of the persisted document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "snapshot.json".to_string());
        self.path
            .with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple()))
    }

    async fn ensure_parent(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create snapshot directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn write_temp(&self, temp: &Path, body: &[u8]) -> AppResult<()> {
        let mut file = fs::File::create(temp).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create temp file: {}", temp.display()),
                e,
            )
        })?;
        file.write_all(body).await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for JsonFileStore {
    async fn load(&self) -> Snapshot {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No persisted snapshot, using placeholder");
                return self.fallback.clone();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable snapshot file, using placeholder");
                return self.fallback.clone();
            }
        };

        match serde_json::from_slice::<Snapshot>(&raw) {
            Ok(snapshot) => {
                debug!(
                    path = %self.path.display(),
                    last_update = ?snapshot.last_update,
                    "Loaded persisted snapshot"
                );
                snapshot
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Corrupt snapshot file, using placeholder");
                self.fallback.clone()
            }
        }
    }

    async fn save(&self, snapshot: &Snapshot) -> AppResult<()> {
        let body = serde_json::to_vec_pretty(snapshot)?;
        self.ensure_parent().await?;

        let temp = self.temp_path();
        if let Err(e) = self.write_temp(&temp, &body).await {
            let _ = fs::remove_file(&temp).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp, &self.path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace snapshot file: {}", self.path.display()),
                e,
            ));
        }

        debug!(path = %self.path.display(), bytes = body.len(), "Persisted snapshot");
        Ok(())
    }
}
