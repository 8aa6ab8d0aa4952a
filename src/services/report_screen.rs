use chrono::NaiveDateTime;
use tracing::{info, instrument, warn};

use crate::config::app_config::NotificationConfig;
use crate::domain::filter::FilterKey;
use crate::domain::record::ReportRecord;
use crate::domain::resource_kind::ResourceKind;
use crate::repository::record_store::RecordStore;
use crate::services::api_client::RecordSource;
use crate::services::error_handling::LogHelper;
use crate::services::notification::Notification;
use crate::services::report_engine::ReportState;

/// What the shell shows after a screen event.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenUpdate<R> {
    pub state: ReportState<R>,
    pub notification: Option<Notification>,
}

/// Wording of a screen's load and delete notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenMessages {
    pub load_failed: String,
    pub deleted: String,
    pub delete_failed: String,
}

impl ScreenMessages {
    /// `("vehicle sales data", "Sale")` gives "Failed to load vehicle sales
    /// data", "Sale deleted successfully" and "Failed to delete sale".
    pub fn new(data_label: &str, noun: &str) -> Self {
        Self {
            load_failed: format!("Failed to load {}", data_label),
            deleted: format!("{} deleted successfully", noun),
            delete_failed: format!("Failed to delete {}", noun.to_lowercase()),
        }
    }

    pub fn for_kind(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Vehicles => Self::new("vehicles", "Vehicle"),
            ResourceKind::Drivers => Self::new("drivers", "Driver"),
            ResourceKind::Bookings => Self::new("bookings", "Booking"),
            ResourceKind::Purchases => Self::new("vehicle purchase data", "Purchase"),
            ResourceKind::Sales => Self::new("vehicle sales data", "Sale"),
        }
    }
}

/// One report screen: a record source, the loaded records and the state
/// derived from them.
pub struct ReportScreen<R, S> {
    source: S,
    store: RecordStore<R>,
    amount: fn(&R) -> f64,
    messages: ScreenMessages,
    notifications: NotificationConfig,
    state: ReportState<R>,
}

impl<R, S> ReportScreen<R, S>
where
    R: ReportRecord<Id = u64> + Clone + Send + 'static,
    S: RecordSource<R>,
{
    /// An empty screen showing `Today`, like a freshly opened report.
    pub fn new(
        source: S,
        amount: fn(&R) -> f64,
        messages: ScreenMessages,
        notifications: NotificationConfig,
        now: NaiveDateTime,
    ) -> Self {
        let store = RecordStore::new();
        let state = ReportState::compute(&store, FilterKey::default(), now, amount);
        Self {
            source,
            store,
            amount,
            messages,
            notifications,
            state,
        }
    }

    pub fn state(&self) -> &ReportState<R> {
        &self.state
    }

    pub fn store(&self) -> &RecordStore<R> {
        &self.store
    }

    fn recompute(&mut self, filter: FilterKey, now: NaiveDateTime) {
        self.state = ReportState::compute(&self.store, filter, now, self.amount);
    }

    fn update(&self, notification: Option<Notification>) -> ScreenUpdate<R> {
        ScreenUpdate {
            state: self.state.clone(),
            notification: notification.map(|n| n.configured(&self.notifications)),
        }
    }

    /// Bulk load from the source. A failed load leaves the screen empty,
    /// never showing stale records.
    #[instrument(skip(self))]
    pub async fn activate(&mut self, now: NaiveDateTime) -> ScreenUpdate<R> {
        let filter = self.state.filter();
        match self.source.fetch_all().await {
            Ok(records) => {
                self.store.load(records);
                self.recompute(filter, now);
                info!(records = self.store.len(), "Report loaded");
                self.update(None)
            }
            Err(err) => {
                LogHelper::log_error_with_context("load report", &err);
                self.store.clear();
                self.recompute(filter, now);
                self.update(Some(Notification::from_error_or(
                    &err,
                    self.messages.load_failed.clone(),
                )))
            }
        }
    }

    pub fn select(&mut self, filter: FilterKey, now: NaiveDateTime) -> ScreenUpdate<R> {
        self.recompute(filter, now);
        self.update(None)
    }

    /// Delete remotely, then locally. On failure nothing local changes.
    #[instrument(skip(self))]
    pub async fn delete(&mut self, id: u64, now: NaiveDateTime) -> ScreenUpdate<R> {
        match self.source.delete_by_id(id).await {
            Ok(()) => {
                if !self.store.remove_by_id(&id) {
                    warn!(id, "Deleted record was not in the loaded set");
                }
                self.recompute(self.state.filter(), now);
                self.update(Some(Notification::success(self.messages.deleted.clone())))
            }
            Err(err) => {
                LogHelper::log_error_with_context("delete record", &err);
                self.update(Some(Notification::from_error_or(
                    &err,
                    self.messages.delete_failed.clone(),
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sale::Sale;
    use crate::services::api_client::MockRecordSource;
    use crate::services::error_handling::DeskError;
    use crate::services::notification::NotificationLevel;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 22)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn sale(id: u64, date: &str, hire: f64) -> Sale {
        Sale {
            id: Some(id),
            vehicle_id: format!("VH-0000000{}", id),
            date: date.to_string(),
            lorry_hire: hire,
            ..Default::default()
        }
    }

    fn screen(source: MockRecordSource<Sale>) -> ReportScreen<Sale, MockRecordSource<Sale>> {
        ReportScreen::new(
            source,
            Sale::hire_amount,
            ScreenMessages::for_kind(ResourceKind::Sales),
            NotificationConfig::default(),
            now(),
        )
    }

    #[test]
    fn test_messages() {
        let messages = ScreenMessages::for_kind(ResourceKind::Sales);
        assert_eq!(messages.load_failed, "Failed to load vehicle sales data");
        assert_eq!(messages.deleted, "Sale deleted successfully");
        assert_eq!(messages.delete_failed, "Failed to delete sale");
    }

    #[tokio::test]
    async fn test_activate_loads_and_computes() {
        let mut source = MockRecordSource::new();
        source.expect_fetch_all().times(1).returning(|| {
            Ok(vec![
                sale(1, "2024-05-22", 100.0),
                sale(2, "2024-05-21", 50.0),
            ])
        });

        let mut screen = screen(source);
        let update = screen.activate(now()).await;

        assert!(update.notification.is_none());
        assert_eq!(update.state.filter(), FilterKey::Today);
        assert_eq!(update.state.filtered().len(), 1);
        assert_eq!(update.state.total().count, 2);
        assert_eq!(update.state.stats().get(FilterKey::ThisWeek).unwrap().sum, 150.0);
    }

    #[tokio::test]
    async fn test_failed_load_empties_store() {
        let mut source = MockRecordSource::new();
        let mut calls = 0;
        source.expect_fetch_all().times(2).returning(move || {
            calls += 1;
            if calls == 1 {
                Ok(vec![sale(1, "2024-05-22", 100.0)])
            } else {
                Err(DeskError::transport("/api/vehicle-sales", "connection refused"))
            }
        });

        let mut screen = screen(source);
        screen.activate(now()).await;
        assert_eq!(screen.store().len(), 1);

        let update = screen.activate(now()).await;
        assert!(screen.store().is_empty());
        assert_eq!(update.state.total().count, 0);
        let note = update.notification.unwrap();
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, "Failed to load vehicle sales data");
    }

    #[tokio::test]
    async fn test_delete_success_removes_and_recomputes() {
        let mut source = MockRecordSource::new();
        source.expect_fetch_all().returning(|| {
            Ok(vec![
                sale(1, "2024-05-22", 100.0),
                sale(2, "2024-05-21", 50.0),
            ])
        });
        source
            .expect_delete_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(()));

        let mut screen = screen(source);
        screen.activate(now()).await;
        screen.select(FilterKey::All, now());

        let update = screen.delete(1, now()).await;
        assert_eq!(update.state.filter(), FilterKey::All);
        assert_eq!(update.state.total().count, 1);
        assert_eq!(update.state.total().sum, 50.0);
        assert_eq!(
            update.notification.unwrap().message,
            "Sale deleted successfully"
        );
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_store() {
        let mut source = MockRecordSource::new();
        source
            .expect_fetch_all()
            .returning(|| Ok(vec![sale(1, "2024-05-22", 100.0)]));
        source
            .expect_delete_by_id()
            .returning(|_| Err(DeskError::transport("/api/vehicle-sales/1", "timed out")));

        let mut screen = screen(source);
        screen.activate(now()).await;

        let update = screen.delete(1, now()).await;
        assert_eq!(screen.store().len(), 1);
        assert_eq!(update.state.filtered().len(), 1);
        assert_eq!(update.notification.unwrap().message, "Failed to delete sale");
    }

    #[test]
    fn test_select_is_pure_recompute() {
        let source = MockRecordSource::new();
        let mut screen = screen(source);

        let before = screen.state().clone();
        let update = screen.select(FilterKey::ThisMonth, now());
        assert_eq!(update.state.filter(), FilterKey::ThisMonth);
        assert_eq!(before.filter(), FilterKey::Today);
        assert!(update.notification.is_none());
    }
}
