// ⚠️ Errors - one enum per failure domain
use thiserror::Error;

/// Failures a query can report to its caller
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// A query arrived before the transaction collection was loaded
    #[error("transaction data has not been initialized")]
    UninitializedStore,

    /// The `month` parameter was not supplied
    #[error("missing required parameter `month` (1-12)")]
    MissingMonth,

    /// The `month` parameter is not an integer in 1-12
    #[error("invalid month {0:?}: expected an integer from 1 (January) to 12 (December)")]
    InvalidMonth(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("transaction store is already loaded")]
    AlreadyLoaded,
}

/// Failures while acquiring the record collection
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote source answered with status {0}")]
    Status(u16),

    #[error("could not read source file: {0}")]
    Io(#[from] std::io::Error),

    #[error("source is not a JSON array of transactions: {0}")]
    Json(#[from] serde_json::Error),

    #[error("source is not a valid transactions CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}
