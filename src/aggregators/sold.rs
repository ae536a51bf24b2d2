// 📦 Sold Count Aggregator
use crate::record::TransactionRecord;

/// Number of records whose `sold` flag equals `want_sold`
///
/// Records with no `sold` flag match neither polarity.
pub fn count_by_sold(records: &[&TransactionRecord], want_sold: bool) -> usize {
    records
        .iter()
        .filter(|record| record.sold == Some(want_sold))
        .count()
}
