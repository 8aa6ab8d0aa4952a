use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::filter::FilterKey;
use crate::services::error_handling::{DeskError, DeskResult};

/// A half-open `[start, end)` interval in local wall-clock time.
///
/// A missing bound is unbounded on that side, so the `All` window has
/// neither and the week/month/year windows have no end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl TimeWindow {
    pub fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Returns `None` when `start > end`.
    pub fn bounded(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start <= end).then_some(Self {
            start: Some(start),
            end: Some(end),
        })
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start.is_none_or(|start| instant >= start) && self.end.is_none_or(|end| instant < end)
    }

    /// Resolve a filter key against a reference instant.
    ///
    /// The week starts on the most recent Sunday. Week, month and year
    /// windows stay open towards the future, so forward-dated records count.
    pub fn resolve(key: FilterKey, now: NaiveDateTime) -> TimeWindow {
        let today = now.date();
        match key {
            FilterKey::Today => {
                let start = midnight(today);
                match start.checked_add_signed(Duration::days(1)) {
                    Some(end) => TimeWindow {
                        start: Some(start),
                        end: Some(end),
                    },
                    None => TimeWindow::starting_at(start),
                }
            }
            FilterKey::ThisWeek => {
                let days_since_sunday = today.weekday().num_days_from_sunday() as i64;
                TimeWindow::starting_at(midnight(today - Duration::days(days_since_sunday)))
            }
            FilterKey::ThisMonth => {
                TimeWindow::starting_at(midnight(today - Duration::days(today.day0() as i64)))
            }
            FilterKey::ThisYear => {
                TimeWindow::starting_at(midnight(today - Duration::days(today.ordinal0() as i64)))
            }
            FilterKey::All => TimeWindow::unbounded(),
        }
    }

    /// Resolve against the current local time of this process.
    pub fn resolve_now(key: FilterKey) -> TimeWindow {
        Self::resolve(key, Local::now().naive_local())
    }
}

pub fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Parse a record's date field down to its calendar day.
///
/// Offsets are converted into the local zone before truncation; naive
/// values are taken as local already.
pub fn parse_record_date(raw: &str) -> DeskResult<NaiveDate> {
    let value = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Local).date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(datetime.date());
        }
    }

    Err(DeskError::Parse {
        value: raw.to_string(),
    })
}
