// 🥧 Category Aggregator - counts per category label for the pie chart
use crate::record::TransactionRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// One entry per distinct label, in order of first appearance
///
/// Labels are compared verbatim: "Toys", "toys" and "toys " are three categories.
/// Records without a category are counted under `"unlabeled"`.
pub fn distribution(records: &[&TransactionRecord]) -> Vec<CategoryCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();

    for record in records {
        *counts.entry(record.category_label()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}
