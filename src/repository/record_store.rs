use std::collections::HashSet;
use tracing::{debug, warn};

use crate::domain::record::ReportRecord;

/// In-memory records backing one report screen.
///
/// Contents are replaced wholesale by [`RecordStore::load`]; there is no
/// incremental merge. Access is not thread-safe: the store is owned by a
/// single screen and mutated from one logical thread of control.
#[derive(Debug, Clone)]
pub struct RecordStore<R> {
    records: Vec<R>,
}

impl<R> Default for RecordStore<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: ReportRecord> RecordStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with `records`, keeping their order.
    ///
    /// A repeated id keeps its first occurrence.
    pub fn load(&mut self, records: impl IntoIterator<Item = R>) {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut duplicates = 0usize;

        for record in records {
            match record.record_id() {
                Some(id) if !seen.insert(id.clone()) => {
                    duplicates += 1;
                    debug!(?id, "Dropping duplicate record id");
                }
                _ => kept.push(record),
            }
        }

        if duplicates > 0 {
            warn!(duplicates, "Bulk load contained repeated ids");
        }

        self.records = kept;
        debug!(count = self.records.len(), "Record store loaded");
    }

    /// Returns whether a record with `id` was present.
    pub fn remove_by_id(&mut self, id: &R::Id) -> bool {
        match self
            .records
            .iter()
            .position(|r| r.record_id().as_ref() == Some(id))
        {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn all(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::fixtures::{Entry, entry};

    fn ids(store: &RecordStore<Entry>) -> Vec<u64> {
        store.all().iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut store = RecordStore::new();
        store.load(vec![entry(1, "2024-01-01", 1.0), entry(2, "2024-01-02", 2.0)]);
        assert_eq!(ids(&store), vec![1, 2]);

        store.load(vec![entry(7, "2024-02-01", 7.0)]);
        assert_eq!(ids(&store), vec![7]);

        store.load(Vec::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_keeps_first_duplicate() {
        let mut store = RecordStore::new();
        store.load(vec![
            entry(1, "2024-01-01", 10.0),
            entry(2, "2024-01-02", 20.0),
            entry(1, "2024-01-03", 30.0),
        ]);

        assert_eq!(store.len(), 2);
        assert_eq!(store.all()[0].amount, 10.0);
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = RecordStore::new();
        store.load(vec![
            entry(1, "2024-01-01", 1.0),
            entry(2, "2024-01-02", 2.0),
            entry(3, "2024-01-03", 3.0),
        ]);

        assert!(store.remove_by_id(&2));
        assert!(!store.remove_by_id(&2));
        assert!(!store.remove_by_id(&99));
        assert_eq!(ids(&store), vec![1, 3]);
    }

    #[test]
    fn test_unsaved_records_are_kept() {
        use crate::domain::purchase::Purchase;

        let mut store = RecordStore::new();
        store.load(vec![Purchase::default(), Purchase::default()]);
        assert_eq!(store.len(), 2);
        assert!(!store.remove_by_id(&0));

        store.clear();
        assert!(store.is_empty());
    }
}
