// 💰 Sum Aggregator
use crate::record::TransactionRecord;

/// Sum of prices, 0 for an empty set
///
/// Negative prices are summed as they are; absent prices add nothing.
pub fn total_amount(records: &[&TransactionRecord]) -> f64 {
    // Start from +0.0: an empty set must serialize as 0.0, never -0.0
    records.iter().fold(0.0, |total, record| total + record.amount())
}
