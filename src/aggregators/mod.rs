// Aggregators - pure functions over a month-filtered record set
//
// Every aggregator takes the same `&[&TransactionRecord]` slice produced by
// `month::filter_by_month`, reads it, and returns a fresh value.

pub mod sum;
pub mod sold;
pub mod histogram;
pub mod category;

pub use sum::total_amount;
pub use sold::count_by_sold;
pub use histogram::{histogram, PriceRange, BUCKET_COUNT};
pub use category::{distribution, CategoryCount};
