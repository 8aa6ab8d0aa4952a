use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reporting period a user picks on a report screen.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    #[default]
    Today,
    ThisWeek,
    ThisMonth,
    ThisYear,
    All,
}

impl FilterKey {
    /// The windows shown as stat cards; `All` never gets one.
    pub const WINDOWED: [FilterKey; 4] = [
        FilterKey::Today,
        FilterKey::ThisWeek,
        FilterKey::ThisMonth,
        FilterKey::ThisYear,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FilterKey::Today => "today",
            FilterKey::ThisWeek => "thisWeek",
            FilterKey::ThisMonth => "thisMonth",
            FilterKey::ThisYear => "thisYear",
            FilterKey::All => "all",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Today => "Today",
            FilterKey::ThisWeek => "This Week",
            FilterKey::ThisMonth => "This Month",
            FilterKey::ThisYear => "This Year",
            FilterKey::All => "All Time",
        }
    }

    /// Unknown keys select every record.
    pub fn parse_lenient(key: &str) -> FilterKey {
        key.parse().unwrap_or(FilterKey::All)
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter key: {0}")]
pub struct UnknownFilterKey(pub String);

impl FromStr for FilterKey {
    type Err = UnknownFilterKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "today" => Ok(FilterKey::Today),
            "thisWeek" => Ok(FilterKey::ThisWeek),
            "thisMonth" => Ok(FilterKey::ThisMonth),
            "thisYear" => Ok(FilterKey::ThisYear),
            "all" => Ok(FilterKey::All),
            other => Err(UnknownFilterKey(other.to_string())),
        }
    }
}
