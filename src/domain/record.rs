use chrono::NaiveDate;
use std::fmt::Debug;
use std::hash::Hash;

use crate::domain::window::parse_record_date;
use crate::services::error_handling::DeskResult;

/// A domain entity that takes part in date-range reports.
pub trait ReportRecord {
    type Id: Clone + Eq + Hash + Debug;

    /// Backend-assigned identity; `None` for records that were never saved.
    fn record_id(&self) -> Option<Self::Id>;

    /// The raw date field the report buckets on.
    fn occurred_on(&self) -> &str;

    fn occurred_on_date(&self) -> DeskResult<NaiveDate> {
        parse_record_date(self.occurred_on())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ReportRecord;

    /// Minimal record used by store and engine tests.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Entry {
        pub id: u64,
        pub date: String,
        pub amount: f64,
    }

    pub fn entry(id: u64, date: &str, amount: f64) -> Entry {
        Entry {
            id,
            date: date.to_string(),
            amount,
        }
    }

    impl ReportRecord for Entry {
        type Id = u64;

        fn record_id(&self) -> Option<u64> {
            Some(self.id)
        }

        fn occurred_on(&self) -> &str {
            &self.date
        }
    }
}
