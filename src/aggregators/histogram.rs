// 📊 Histogram Aggregator - fixed price ranges for the bar chart
//
// Nine bounded ranges, inclusive at both ends, then a catch-all. Any price not
// inside a bounded range lands in the catch-all: above 900, but also negative
// prices and the gaps between ranges (e.g. 100.5).

use crate::record::TransactionRecord;
use serde::{Deserialize, Serialize};

/// Number of ranges in every histogram
pub const BUCKET_COUNT: usize = 10;

const BOUNDED_RANGES: [(f64, f64, &str); BUCKET_COUNT - 1] = [
    (0.0, 100.0, "0 - 100"),
    (101.0, 200.0, "101 - 200"),
    (201.0, 300.0, "201 - 300"),
    (301.0, 400.0, "301 - 400"),
    (401.0, 500.0, "401 - 500"),
    (501.0, 600.0, "501 - 600"),
    (601.0, 700.0, "601 - 700"),
    (701.0, 800.0, "701 - 800"),
    (801.0, 900.0, "801 - 900"),
];

const CATCH_ALL_LABEL: &str = "901 - above";

/// One bar of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub range: String,
    pub no_of_items: usize,
}

impl PriceRange {
    fn empty(label: &str) -> Self {
        PriceRange {
            range: label.to_string(),
            no_of_items: 0,
        }
    }
}

/// Index of the range `price` belongs to
pub fn bucket_index(price: f64) -> usize {
    BOUNDED_RANGES
        .iter()
        .position(|(low, high, _)| price >= *low && price <= *high)
        .unwrap_or(BUCKET_COUNT - 1)
}

/// All ten ranges in fixed order, each counting the records priced inside it.
/// Empty ranges are kept with a count of 0.
pub fn histogram(records: &[&TransactionRecord]) -> Vec<PriceRange> {
    let mut ranges: Vec<PriceRange> = BOUNDED_RANGES
        .iter()
        .map(|(_, _, label)| PriceRange::empty(label))
        .chain(std::iter::once(PriceRange::empty(CATCH_ALL_LABEL)))
        .collect();

    for record in records {
        ranges[bucket_index(record.amount())].no_of_items += 1;
    }

    ranges
}
