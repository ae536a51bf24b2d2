// 🌐 Loader - one-time acquisition of the transaction collection
// Remote JSON over HTTP, or a local JSON / CSV file. No retries.

use crate::error::LoadError;
use crate::record::TransactionRecord;
use crate::store::TransactionStore;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Seed dataset served by the product-transaction challenge
pub const DEFAULT_SOURCE_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` / `https://` is remote, anything else a file path
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(raw.to_string())
        } else {
            DataSource::File(PathBuf::from(raw))
        }
    }
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Url(DEFAULT_SOURCE_URL.to_string())
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

// ============================================================================
// FETCH
// ============================================================================

/// Retrieve the full collection from `source`
pub async fn fetch(source: &DataSource, timeout: Duration) -> Result<Vec<TransactionRecord>, LoadError> {
    match source {
        DataSource::Url(url) => fetch_url(url, timeout).await,
        DataSource::File(path) => load_file(path),
    }
}

pub async fn fetch_url(url: &str, timeout: Duration) -> Result<Vec<TransactionRecord>, LoadError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    parse_json(&body)
}

/// `.csv` files are read as CSV, everything else as a JSON array
pub fn load_file(path: &Path) -> Result<Vec<TransactionRecord>, LoadError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        load_csv(path)
    } else {
        let bytes = std::fs::read(path)?;
        parse_json(&bytes)
    }
}

/// Top level must be a JSON array. Entries that are not transaction objects
/// (bare numbers, strings, nulls) are skipped, never fatal.
pub fn parse_json(bytes: &[u8]) -> Result<Vec<TransactionRecord>, LoadError> {
    let entries: Vec<Value> = serde_json::from_slice(bytes)?;
    let total = entries.len();

    let records: Vec<TransactionRecord> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() < total {
        warn!(skipped = total - records.len(), "skipped entries that are not transaction objects");
    }

    Ok(records)
}

/// Header row must use the JSON field names (`id,title,price,...,dateOfSale`)
///
/// Short rows are read with the missing fields absent. Ids keep their exact
/// text (`007` stays `007`).
pub fn load_csv(csv_path: &Path) -> Result<Vec<TransactionRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(csv_path)?;
    let headers = rdr.headers()?.clone();
    let id_column = headers.iter().position(|name| name == "id");

    let mut records = Vec::new();
    let mut skipped = 0usize;
    let mut row = csv::StringRecord::new();

    while rdr.read_record(&mut row)? {
        let mut record: TransactionRecord = match row.deserialize(Some(&headers)) {
            Ok(record) => record,
            Err(e) => {
                warn!(line = ?row.position().map(|p| p.line()), error = %e, "skipping unreadable CSV row");
                skipped += 1;
                continue;
            }
        };

        if let Some(raw_id) = id_column
            .and_then(|i| row.get(i))
            .filter(|raw| !raw.trim().is_empty())
        {
            record.id = raw_id.to_string();
        }
        records.push(record);
    }

    if skipped > 0 {
        warn!(skipped, "some CSV rows could not be read");
    }

    Ok(records)
}

/// Fetch `source` and load it into `store`
///
/// On failure the store is left untouched, so it stays uninitialized.
pub async fn load_into(
    store: &TransactionStore,
    source: &DataSource,
    timeout: Duration,
) -> Result<usize, LoadError> {
    info!(%source, "fetching transactions");

    let records = fetch(source, timeout).await.inspect_err(|e| {
        warn!(%source, error = %e, "failed to fetch transactions");
    })?;

    let undated = records.iter().filter(|r| r.date_of_sale.is_none()).count();
    if undated > 0 {
        warn!(undated, "some records have no readable dateOfSale and match no month");
    }

    Ok(store.load(records)?)
}
