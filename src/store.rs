// 🗄️ Transaction Store - load-once, read-many record collection
// Replaces a process-global: the store is an owned value handed to whoever queries it

use crate::error::{AnalyticsError, StoreError};
use crate::record::TransactionRecord;
use std::sync::OnceLock;
use tracing::info;

/// Immutable in-memory collection of transactions
///
/// Starts uninitialized. [`TransactionStore::load`] fills it exactly once;
/// until then every read reports [`AnalyticsError::UninitializedStore`], so an
/// unloaded store is never mistaken for a month without sales.
#[derive(Debug, Default)]
pub struct TransactionStore {
    records: OnceLock<Vec<TransactionRecord>>,
}

impl TransactionStore {
    /// Create an empty, uninitialized store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that is already loaded with `records`
    pub fn with_records(records: Vec<TransactionRecord>) -> Self {
        let store = Self::new();
        // A fresh OnceLock cannot already be set
        let _ = store.records.set(records);
        store
    }

    /// Store the full collection. Rejected if the store was already loaded.
    pub fn load(&self, records: Vec<TransactionRecord>) -> Result<usize, StoreError> {
        let count = records.len();
        self.records
            .set(records)
            .map_err(|_| StoreError::AlreadyLoaded)?;
        info!(records = count, "transaction store initialized");
        Ok(count)
    }

    /// Full collection, or an error if nothing has been loaded yet
    pub fn all(&self) -> Result<&[TransactionRecord], AnalyticsError> {
        self.records
            .get()
            .map(Vec::as_slice)
            .ok_or(AnalyticsError::UninitializedStore)
    }

    pub fn is_loaded(&self) -> bool {
        self.records.get().is_some()
    }

    /// Number of loaded records (0 while uninitialized)
    pub fn len(&self) -> usize {
        self.records.get().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
