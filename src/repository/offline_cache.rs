use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::resource_kind::ResourceKind;
use crate::services::error_handling::{DeskError, DeskResult};

/// A create that could not reach the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PendingWrite<T> {
    pub local_id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub payload: T,
}

/// Best-effort local store of unsynced writes, one JSON file per resource.
///
/// A missing file is an empty queue. A file that no longer parses is also
/// treated as empty (and overwritten by the next stash) so a damaged cache
/// never blocks the screens that use it.
#[derive(Debug, Clone)]
pub struct OfflineCache {
    dir: PathBuf,
}

impl OfflineCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, kind: ResourceKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.cache_key()))
    }

    /// Append `payload` to the queue for `kind`, returning its local id.
    pub async fn stash<T>(&self, kind: ResourceKind, payload: &T) -> DeskResult<Uuid>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut queue: Vec<PendingWrite<T>> = self.pending(kind).await?;
        let entry = PendingWrite {
            local_id: Uuid::new_v4(),
            saved_at: Utc::now(),
            payload: payload.clone(),
        };
        let local_id = entry.local_id;
        queue.push(entry);

        self.write_queue(kind, &queue).await?;
        info!(resource = %kind, %local_id, queued = queue.len(), "Write saved locally");
        Ok(local_id)
    }

    /// Pending writes for `kind`, oldest first.
    pub async fn pending<T>(&self, kind: ResourceKind) -> DeskResult<Vec<PendingWrite<T>>>
    where
        T: DeserializeOwned,
    {
        let path = self.file_for(kind);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&content) {
            Ok(queue) => Ok(queue),
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "Ignoring unreadable offline cache file"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Drop one entry; returns whether it was queued.
    pub async fn discard<T>(&self, kind: ResourceKind, local_id: Uuid) -> DeskResult<bool>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut queue: Vec<PendingWrite<T>> = self.pending(kind).await?;
        let before = queue.len();
        queue.retain(|entry| entry.local_id != local_id);
        if queue.len() == before {
            return Ok(false);
        }

        self.write_queue(kind, &queue).await?;
        debug!(resource = %kind, %local_id, "Discarded pending write");
        Ok(true)
    }

    pub async fn clear(&self, kind: ResourceKind) -> DeskResult<()> {
        match fs::remove_file(self.file_for(kind)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_queue<T: Serialize>(
        &self,
        kind: ResourceKind,
        queue: &[PendingWrite<T>],
    ) -> DeskResult<()> {
        fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(queue).map_err(|err| DeskError::Cache {
            message: err.to_string(),
        })?;
        fs::write(self.file_for(kind), json).await?;
        Ok(())
    }
}
