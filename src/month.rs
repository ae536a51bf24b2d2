// 📅 Month Filter - month-of-year selection, ignoring the year
//
// Months are numbered 1 (January) through 12 (December) everywhere:
// the HTTP `month` parameter, the CLI flag, and `TransactionRecord::sale_month`.

use crate::error::AnalyticsError;
use crate::record::TransactionRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Validated calendar month, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MonthOfYear(u32);

impl MonthOfYear {
    pub fn new(number: u32) -> Result<Self, AnalyticsError> {
        if (1..=12).contains(&number) {
            Ok(MonthOfYear(number))
        } else {
            Err(AnalyticsError::InvalidMonth(number.to_string()))
        }
    }

    /// Parse an optional query parameter; absent is an error, never a default
    pub fn from_param(raw: Option<&str>) -> Result<Self, AnalyticsError> {
        raw.ok_or(AnalyticsError::MissingMonth)?.parse()
    }

    pub fn number(self) -> u32 {
        self.0
    }

    /// English month name ("January" ...)
    pub fn name(self) -> &'static str {
        u8::try_from(self.0)
            .ok()
            .and_then(|n| chrono::Month::try_from(n).ok())
            .map_or("", |month| month.name())
    }

    /// January through December, in order
    pub fn all() -> impl Iterator<Item = MonthOfYear> {
        (1..=12).map(MonthOfYear)
    }
}

impl FromStr for MonthOfYear {
    type Err = AnalyticsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim()
            .parse::<u32>()
            .ok()
            .filter(|n| (1..=12).contains(n))
            .map(MonthOfYear)
            .ok_or_else(|| AnalyticsError::InvalidMonth(raw.to_string()))
    }
}

impl fmt::Display for MonthOfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// FILTER
// ============================================================================

/// True when the record's sale date falls in `month` of any year.
/// Records without a readable date match no month.
pub fn matches(record: &TransactionRecord, month: MonthOfYear) -> bool {
    record.sale_month() == Some(month.number())
}

/// Subset of `records` sold in `month`, in input order
pub fn filter_by_month<'a, I>(records: I, month: MonthOfYear) -> Vec<&'a TransactionRecord>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    records
        .into_iter()
        .filter(|record| matches(record, month))
        .collect()
}
