use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::domain::filter::FilterKey;
use crate::domain::record::ReportRecord;
use crate::domain::window::{TimeWindow, midnight};
use crate::repository::record_store::RecordStore;
use crate::services::error_handling::{DeskError, DeskResult, LogHelper};
use crate::services::export_service::{Column, ExportAdapter};

/// Count and sum of one numeric field over the same filtered subset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateResult {
    pub count: usize,
    pub sum: f64,
    pub window: TimeWindow,
}

impl AggregateResult {
    fn empty(window: TimeWindow) -> Self {
        Self {
            count: 0,
            sum: 0.0,
            window,
        }
    }

    fn add(&mut self, amount: f64) {
        self.count += 1;
        self.sum += amount;
    }
}

/// The stat cards of a report screen: one aggregate per windowed filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowStats {
    pub windows: BTreeMap<FilterKey, AggregateResult>,
    /// Records left out because their date did not parse
    pub skipped: usize,
}

impl WindowStats {
    pub fn get(&self, key: FilterKey) -> Option<&AggregateResult> {
        self.windows.get(&key)
    }
}

/// Date-window filtering and aggregation over a [`RecordStore`].
///
/// Every operation is pure: same store, key and `now` give the same result.
/// `All` matches every record, even one whose date does not parse. The
/// other windows skip such records and report how many were skipped.
pub struct ReportEngine;

impl ReportEngine {
    pub fn filtered<R>(store: &RecordStore<R>, key: FilterKey, now: NaiveDateTime) -> Vec<R>
    where
        R: ReportRecord + Clone,
    {
        Self::filtered_with_skips(store, key, now).0
    }

    /// Like [`ReportEngine::filtered`], also returning the skipped count.
    pub fn filtered_with_skips<R>(
        store: &RecordStore<R>,
        key: FilterKey,
        now: NaiveDateTime,
    ) -> (Vec<R>, usize)
    where
        R: ReportRecord + Clone,
    {
        if key == FilterKey::All {
            return (store.all().to_vec(), 0);
        }

        let window = TimeWindow::resolve(key, now);
        let mut matched = Vec::new();
        let mut skipped = 0;
        for record in store.all() {
            match day_of(record) {
                Some(day) if window.contains(day) => matched.push(record.clone()),
                Some(_) => {}
                None => skipped += 1,
            }
        }
        (matched, skipped)
    }

    pub fn aggregate<R>(
        store: &RecordStore<R>,
        key: FilterKey,
        now: NaiveDateTime,
        amount: impl Fn(&R) -> f64,
    ) -> AggregateResult
    where
        R: ReportRecord,
    {
        let window = TimeWindow::resolve(key, now);
        let mut result = AggregateResult::empty(window);
        let mut skipped = 0;

        for record in store.all() {
            if key == FilterKey::All {
                result.add(amount(record));
                continue;
            }
            match day_of(record) {
                Some(day) if window.contains(day) => result.add(amount(record)),
                Some(_) => {}
                None => skipped += 1,
            }
        }

        LogHelper::log_skipped_records(key.key(), skipped);
        result
    }

    /// Aggregates for Today, This Week, This Month and This Year, parsing
    /// each record's date once.
    pub fn stats_for_all_windows<R>(
        store: &RecordStore<R>,
        now: NaiveDateTime,
        amount: impl Fn(&R) -> f64,
    ) -> WindowStats
    where
        R: ReportRecord,
    {
        let mut windows: BTreeMap<FilterKey, AggregateResult> = FilterKey::WINDOWED
            .iter()
            .map(|&key| (key, AggregateResult::empty(TimeWindow::resolve(key, now))))
            .collect();
        let mut skipped = 0;

        for record in store.all() {
            let Some(day) = day_of(record) else {
                skipped += 1;
                continue;
            };
            let value = amount(record);
            for result in windows.values_mut() {
                if result.window.contains(day) {
                    result.add(value);
                }
            }
        }

        LogHelper::log_skipped_records("stats", skipped);
        debug!(records = store.len(), skipped, "Computed window stats");
        WindowStats { windows, skipped }
    }
}

fn day_of<R: ReportRecord>(record: &R) -> Option<NaiveDateTime> {
    record
        .occurred_on_date()
        .ok()
        .map(midnight)
}

/// Everything a report screen shows for one filter selection.
///
/// Never mutated: a new state is computed for every filter change, load and
/// delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportState<R> {
    filter: FilterKey,
    now: NaiveDateTime,
    records: Vec<R>,
    stats: WindowStats,
    total: AggregateResult,
    skipped: usize,
}

impl<R: ReportRecord + Clone> ReportState<R> {
    pub fn compute(
        store: &RecordStore<R>,
        filter: FilterKey,
        now: NaiveDateTime,
        amount: impl Fn(&R) -> f64,
    ) -> Self {
        let records = ReportEngine::filtered(store, filter, now);
        let stats = ReportEngine::stats_for_all_windows(store, now, &amount);
        let total = ReportEngine::aggregate(store, FilterKey::All, now, &amount);

        Self {
            filter,
            now,
            records,
            skipped: stats.skipped,
            stats,
            total,
        }
    }

    /// The state for another filter over the same store and instant.
    pub fn with_filter(
        &self,
        store: &RecordStore<R>,
        filter: FilterKey,
        amount: impl Fn(&R) -> f64,
    ) -> Self {
        Self::compute(store, filter, self.now, amount)
    }

    pub fn filter(&self) -> FilterKey {
        self.filter
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// The records matching the selected filter, in store order.
    pub fn filtered(&self) -> &[R] {
        &self.records
    }

    pub fn stats(&self) -> &WindowStats {
        &self.stats
    }

    pub fn total(&self) -> &AggregateResult {
        &self.total
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Serialize the filtered records, never the whole store.
    pub fn export(
        &self,
        adapter: &dyn ExportAdapter<R>,
        columns: &[Column<R>],
    ) -> DeskResult<Vec<u8>> {
        if self.records.is_empty() {
            return Err(DeskError::NothingToExport);
        }
        adapter.serialize(&self.records, columns)
    }
}
