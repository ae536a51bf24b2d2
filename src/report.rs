// 📈 Report Composer - every query path over the store
//
// Each method filters the store once and hands that one filtered set to the
// aggregators, so single-metric answers and the combined report share the
// same implementation.

use crate::aggregators::{
    count_by_sold, distribution, histogram, total_amount, CategoryCount, PriceRange,
};
use crate::error::AnalyticsError;
use crate::month::{filter_by_month, MonthOfYear};
use crate::record::TransactionRecord;
use crate::store::TransactionStore;
use serde::{Deserialize, Serialize};

// ============================================================================
// RESPONSE SHAPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSaleAmount {
    pub total_sale_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalSoldItems {
    pub total_sold_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalNotSoldItems {
    pub total_not_sold_items: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartData {
    pub bar_chart_data: Vec<PriceRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChartData {
    pub pie_chart_data: Vec<CategoryCount>,
}

/// All five views of one month, computed from a single filtered set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub total_sale_amount: f64,
    pub total_sold_items: usize,
    pub total_not_sold_items: usize,
    pub bar_chart_data: Vec<PriceRange>,
    pub pie_chart_data: Vec<CategoryCount>,
}

impl CombinedReport {
    pub fn from_filtered(records: &[&TransactionRecord]) -> Self {
        CombinedReport {
            total_sale_amount: total_amount(records),
            total_sold_items: count_by_sold(records, true),
            total_not_sold_items: count_by_sold(records, false),
            bar_chart_data: histogram(records),
            pie_chart_data: distribution(records),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTransactions {
    pub transactions: Vec<TransactionRecord>,
}

/// Headline numbers for one month, used by the yearly overview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: MonthOfYear,
    pub records: usize,
    pub total_sale_amount: f64,
    pub total_sold_items: usize,
    pub total_not_sold_items: usize,
}

// ============================================================================
// COMPOSER
// ============================================================================

pub struct ReportComposer<'a> {
    store: &'a TransactionStore,
}

impl<'a> ReportComposer<'a> {
    pub fn new(store: &'a TransactionStore) -> Self {
        ReportComposer { store }
    }

    /// The month's records. Fails if the store is not loaded.
    fn filtered(&self, month: MonthOfYear) -> Result<Vec<&'a TransactionRecord>, AnalyticsError> {
        Ok(filter_by_month(self.store.all()?, month))
    }

    pub fn total_sale_amount(&self, month: MonthOfYear) -> Result<TotalSaleAmount, AnalyticsError> {
        let set = self.filtered(month)?;
        Ok(TotalSaleAmount {
            total_sale_amount: total_amount(&set),
        })
    }

    pub fn total_sold_items(&self, month: MonthOfYear) -> Result<TotalSoldItems, AnalyticsError> {
        let set = self.filtered(month)?;
        Ok(TotalSoldItems {
            total_sold_items: count_by_sold(&set, true),
        })
    }

    pub fn total_not_sold_items(
        &self,
        month: MonthOfYear,
    ) -> Result<TotalNotSoldItems, AnalyticsError> {
        let set = self.filtered(month)?;
        Ok(TotalNotSoldItems {
            total_not_sold_items: count_by_sold(&set, false),
        })
    }

    pub fn bar_chart(&self, month: MonthOfYear) -> Result<BarChartData, AnalyticsError> {
        let set = self.filtered(month)?;
        Ok(BarChartData {
            bar_chart_data: histogram(&set),
        })
    }

    pub fn pie_chart(&self, month: MonthOfYear) -> Result<PieChartData, AnalyticsError> {
        let set = self.filtered(month)?;
        Ok(PieChartData {
            pie_chart_data: distribution(&set),
        })
    }

    /// Combined report: one filter pass, five aggregations over it
    pub fn compose(&self, month: MonthOfYear) -> Result<CombinedReport, AnalyticsError> {
        let set = self.filtered(month)?;
        Ok(CombinedReport::from_filtered(&set))
    }

    pub fn transactions(&self, month: MonthOfYear) -> Result<MonthTransactions, AnalyticsError> {
        let set = self.filtered(month)?;
        Ok(MonthTransactions {
            transactions: set.into_iter().cloned().collect(),
        })
    }

    /// January through December, regardless of year
    pub fn yearly_overview(&self) -> Result<Vec<MonthSummary>, AnalyticsError> {
        let all = self.store.all()?;

        Ok(MonthOfYear::all()
            .map(|month| {
                let set = filter_by_month(all, month);
                MonthSummary {
                    month,
                    records: set.len(),
                    total_sale_amount: total_amount(&set),
                    total_sold_items: count_by_sold(&set, true),
                    total_not_sold_items: count_by_sold(&set, false),
                }
            })
            .collect())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_record(id: &str, price: f64, sold: bool, category: &str, date: &str) -> TransactionRecord {
        TransactionRecord::new(id)
            .with_price(price)
            .with_sold(sold)
            .with_category(category)
            .with_date_of_sale(date)
    }

    fn scenario_store() -> TransactionStore {
        TransactionStore::with_records(vec![
            create_test_record("1", 50.0, true, "X", "2022-01-05T10:00:00+00:00"),
            create_test_record("2", 150.0, false, "Y", "2021-01-20T10:00:00+00:00"),
            create_test_record("3", 999.0, true, "X", "2022-02-11T10:00:00+00:00"),
        ])
    }

    fn month(n: u32) -> MonthOfYear {
        MonthOfYear::new(n).unwrap()
    }

    #[test]
    fn test_combined_report_scenario() {
        let store = scenario_store();
        let report = ReportComposer::new(&store).compose(month(1)).unwrap();

        assert_eq!(report.total_sale_amount, 200.0);
        assert_eq!(report.total_sold_items, 1);
        assert_eq!(report.total_not_sold_items, 1);

        assert_eq!(report.bar_chart_data.len(), 10);
        assert_eq!(report.bar_chart_data[0].range, "0 - 100");
        assert_eq!(report.bar_chart_data[0].no_of_items, 1);
        assert_eq!(report.bar_chart_data[1].range, "101 - 200");
        assert_eq!(report.bar_chart_data[1].no_of_items, 1);
        assert!(report.bar_chart_data[2..].iter().all(|r| r.no_of_items == 0));

        assert_eq!(
            report.pie_chart_data,
            vec![
                CategoryCount { category: "X".to_string(), count: 1 },
                CategoryCount { category: "Y".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_single_metrics_agree_with_combined() {
        let store = scenario_store();
        let composer = ReportComposer::new(&store);

        for m in MonthOfYear::all() {
            let combined = composer.compose(m).unwrap();
            assert_eq!(composer.total_sale_amount(m).unwrap().total_sale_amount, combined.total_sale_amount);
            assert_eq!(composer.total_sold_items(m).unwrap().total_sold_items, combined.total_sold_items);
            assert_eq!(composer.total_not_sold_items(m).unwrap().total_not_sold_items, combined.total_not_sold_items);
            assert_eq!(composer.bar_chart(m).unwrap().bar_chart_data, combined.bar_chart_data);
            assert_eq!(composer.pie_chart(m).unwrap().pie_chart_data, combined.pie_chart_data);
        }
    }

    #[test]
    fn test_empty_month_is_zero_not_error() {
        let store = scenario_store();
        let report = ReportComposer::new(&store).compose(month(6)).unwrap();

        assert_eq!(report.total_sale_amount, 0.0);
        assert_eq!(report.total_sold_items, 0);
        assert_eq!(report.bar_chart_data.len(), 10);
        assert!(report.pie_chart_data.is_empty());
    }

    #[test]
    fn test_empty_month_total_serializes_as_zero() {
        let store = TransactionStore::with_records(Vec::new());
        let composer = ReportComposer::new(&store);

        let single = serde_json::to_string(&composer.total_sale_amount(month(3)).unwrap()).unwrap();
        assert_eq!(single, r#"{"totalSaleAmount":0.0}"#);

        let combined = serde_json::to_string(&composer.compose(month(3)).unwrap()).unwrap();
        assert!(combined.starts_with(r#"{"totalSaleAmount":0.0,"#), "{combined}");
    }

    #[test]
    fn test_uninitialized_store_fails_every_query() {
        let store = TransactionStore::new();
        let composer = ReportComposer::new(&store);
        let m = month(1);
        let err = Err::<(), _>(AnalyticsError::UninitializedStore);

        assert_eq!(composer.total_sale_amount(m).map(|_| ()), err);
        assert_eq!(composer.total_sold_items(m).map(|_| ()), err);
        assert_eq!(composer.total_not_sold_items(m).map(|_| ()), err);
        assert_eq!(composer.bar_chart(m).map(|_| ()), err);
        assert_eq!(composer.pie_chart(m).map(|_| ()), err);
        assert_eq!(composer.compose(m).map(|_| ()), err);
        assert_eq!(composer.transactions(m).map(|_| ()), err);
        assert_eq!(composer.yearly_overview().map(|_| ()), err);
    }

    #[test]
    fn test_transactions_lists_filtered_set() {
        let store = scenario_store();
        let listed = ReportComposer::new(&store).transactions(month(2)).unwrap();

        assert_eq!(listed.transactions.len(), 1);
        assert_eq!(listed.transactions[0].id, "3");
    }

    #[test]
    fn test_yearly_overview() {
        let store = scenario_store();
        let overview = ReportComposer::new(&store).yearly_overview().unwrap();

        assert_eq!(overview.len(), 12);
        assert_eq!(overview[0].records, 2);
        assert_eq!(overview[0].total_sale_amount, 200.0);
        assert_eq!(overview[1].records, 1);
        assert_eq!(overview[1].total_sold_items, 1);
        assert_eq!(overview.iter().map(|m| m.records).sum::<usize>(), 3);
    }

    #[test]
    fn test_combined_report_json_shape() {
        let store = scenario_store();
        let report = ReportComposer::new(&store).compose(month(2)).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        for key in ["totalSaleAmount", "totalSoldItems", "totalNotSoldItems", "barChartData", "pieChartData"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["barChartData"][9], serde_json::json!({ "range": "901 - above", "noOfItems": 1 }));
        assert_eq!(value["pieChartData"][0], serde_json::json!({ "category": "X", "count": 1 }));
    }
}
