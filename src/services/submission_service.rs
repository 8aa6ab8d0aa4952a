use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::app_config::NotificationConfig;
use crate::domain::resource_kind::ResourceKind;
use crate::domain::sale::Sale;
use crate::repository::offline_cache::{OfflineCache, PendingWrite};
use crate::services::api_client::ApiClient;
use crate::services::error_handling::{DeskError, DeskResult, LogHelper};
use crate::services::notification::Notification;
use crate::services::validation::Validate;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// Accepted by the backend; carries the stored record.
    Saved(T),
    /// Backend unreachable; kept in the offline cache for a later sync.
    SavedLocally { local_id: Uuid },
}

impl<T> SubmitOutcome<T> {
    pub fn is_saved_locally(&self) -> bool {
        matches!(self, SubmitOutcome::SavedLocally { .. })
    }

    /// `"Booking"` gives "Booking created successfully!" or "Backend not
    /// available. Booking saved locally!".
    pub fn notification(&self, noun: &str) -> Notification {
        match self {
            SubmitOutcome::Saved(_) => {
                Notification::success(format!("{} created successfully!", noun))
            }
            SubmitOutcome::SavedLocally { .. } => Notification::warning(format!(
                "Backend not available. {} saved locally!",
                noun
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub synced: usize,
    /// Still queued: rejected entries plus everything after a transport failure
    pub remaining: usize,
}

/// Validates forms and sends them to the backend.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    api: ApiClient,
    cache: Option<OfflineCache>,
    notifications: NotificationConfig,
}

impl SubmissionService {
    pub fn new(
        api: ApiClient,
        cache: Option<OfflineCache>,
        notifications: NotificationConfig,
    ) -> Self {
        Self {
            api,
            cache,
            notifications,
        }
    }

    fn check<T: Validate>(record: &T) -> DeskResult<()> {
        record.validate().map_err(|errors| {
            let err = DeskError::from(errors);
            LogHelper::log_error_with_context("submit", &err);
            err
        })
    }

    /// Create a record. Invalid input is never sent. Only an unreachable
    /// backend leads to a local copy, and only when the cache is enabled;
    /// rejections and unreadable replies are returned as errors.
    #[instrument(skip(self, record), fields(resource = %kind))]
    pub async fn submit<T>(&self, kind: ResourceKind, record: &T) -> DeskResult<SubmitOutcome<T>>
    where
        T: Validate + Serialize + DeserializeOwned + Clone,
    {
        Self::check(record)?;

        match self.api.create(kind, record).await {
            Ok(saved) => {
                info!("Record created");
                Ok(SubmitOutcome::Saved(saved))
            }
            Err(err) if err.is_transport() => match &self.cache {
                Some(cache) => {
                    warn!(error = %err, "Backend unavailable, caching write");
                    let local_id = cache.stash(kind, record).await?;
                    Ok(SubmitOutcome::SavedLocally { local_id })
                }
                None => Err(err),
            },
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self, record), fields(resource = %kind))]
    pub async fn update<T>(&self, kind: ResourceKind, id: u64, record: &T) -> DeskResult<T>
    where
        T: Validate + Serialize + DeserializeOwned,
    {
        Self::check(record)?;
        self.api.update(kind, id, record).await
    }

    /// Create a sale together with its supporting document. Not cached:
    /// documents stay with the form until the backend accepts them.
    pub async fn submit_sale(
        &self,
        sale: &Sale,
        document: Option<(String, Vec<u8>)>,
    ) -> DeskResult<Sale> {
        Self::check(sale)?;
        self.api.create_sale_with_document(sale, document).await
    }

    /// Replay cached creates for `kind`, oldest first.
    ///
    /// Stops at the first transport failure so ordering is preserved.
    /// Entries the backend rejects stay queued and the replay moves on.
    /// An accepted entry with an unreadable reply counts as synced.
    #[instrument(skip(self), fields(resource = %kind))]
    pub async fn sync_pending<T>(&self, kind: ResourceKind) -> DeskResult<SyncReport>
    where
        T: Serialize + DeserializeOwned,
    {
        let Some(cache) = &self.cache else {
            return Ok(SyncReport::default());
        };

        let queue: Vec<PendingWrite<T>> = cache.pending(kind).await?;
        let total = queue.len();
        let mut report = SyncReport::default();

        for (index, entry) in queue.into_iter().enumerate() {
            match self.api.create(kind, &entry.payload).await {
                Ok(_) => {
                    cache.discard::<T>(kind, entry.local_id).await?;
                    report.synced += 1;
                }
                Err(err) if err.is_transport() => {
                    warn!(error = %err, left = total - index, "Sync stopped");
                    report.remaining += total - index;
                    return Ok(report);
                }
                Err(err @ DeskError::Decode { .. }) => {
                    warn!(error = %err, "Pending write accepted with an unreadable reply");
                    cache.discard::<T>(kind, entry.local_id).await?;
                    report.synced += 1;
                }
                Err(err) => {
                    LogHelper::log_error_with_context("sync pending write", &err);
                    report.remaining += 1;
                }
            }
        }

        info!(synced = report.synced, remaining = report.remaining, "Sync finished");
        Ok(report)
    }

    /// Notification for an outcome, with the configured display duration.
    pub fn notify<T>(&self, outcome: &DeskResult<SubmitOutcome<T>>, noun: &str) -> Notification {
        let note = match outcome {
            Ok(outcome) => outcome.notification(noun),
            Err(err) => Notification::from_error(err),
        };
        note.configured(&self.notifications)
    }
}
