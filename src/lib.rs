// Sales Insights - Core Library
// Month-scoped analytics over an in-memory collection of sales transactions

pub mod record;
pub mod error;
pub mod store;
pub mod month;
pub mod aggregators;
pub mod report;
pub mod loader;
pub mod config;
pub mod logging;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use record::{parse_sale_date, TransactionRecord, UNLABELED_CATEGORY};
pub use error::{AnalyticsError, ConfigError, LoadError, StoreError};
pub use store::TransactionStore;
pub use month::{filter_by_month, matches, MonthOfYear};
pub use aggregators::{
    count_by_sold, distribution, histogram, total_amount, CategoryCount, PriceRange, BUCKET_COUNT,
};
pub use report::{
    BarChartData, CombinedReport, MonthSummary, MonthTransactions, PieChartData, ReportComposer,
    TotalNotSoldItems, TotalSaleAmount, TotalSoldItems,
};
pub use loader::{DataSource, DEFAULT_SOURCE_URL};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
