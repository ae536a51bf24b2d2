// 🧾 Transaction Record - one sale from the source collection
// Fields are read leniently: a malformed value becomes "absent" instead of failing the load

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Label used for records that carry no category
pub const UNLABELED_CATEGORY: &str = "unlabeled";

// ============================================================================
// RECORD
// ============================================================================

/// Immutable sales transaction, as delivered by the remote dataset
///
/// Only `price`, `sold`, `category` and the month of `date_of_sale` feed the
/// analytics. `title`, `description` and `image` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Opaque identity. Numeric ids in the source are kept as their decimal text.
    #[serde(default = "default_id", deserialize_with = "opaque_id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Numbers and booleans are kept as their text, like any other label
    #[serde(default, deserialize_with = "lenient_label")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "lenient_sold")]
    pub sold: Option<bool>,

    /// Sale timestamp in the offset it was recorded with (never converted)
    #[serde(default, deserialize_with = "lenient_date")]
    pub date_of_sale: Option<DateTime<FixedOffset>>,
}

fn default_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl TransactionRecord {
    /// Create a record with only an id; everything else absent
    pub fn new(id: impl Into<String>) -> Self {
        TransactionRecord {
            id: id.into(),
            title: None,
            price: None,
            description: None,
            category: None,
            image: None,
            sold: None,
            date_of_sale: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_sold(mut self, sold: bool) -> Self {
        self.sold = Some(sold);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the sale date from text; unparseable text leaves the date absent
    pub fn with_date_of_sale(mut self, raw: &str) -> Self {
        self.date_of_sale = parse_sale_date(raw);
        self
    }

    /// Price used by the aggregators (absent counts as 0)
    pub fn amount(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Category label used verbatim, or [`UNLABELED_CATEGORY`]
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNLABELED_CATEGORY)
    }

    /// Calendar month (1-12) of the sale, in the record's own offset
    pub fn sale_month(&self) -> Option<u32> {
        use chrono::Datelike;
        self.date_of_sale.map(|date| date.month())
    }
}

// ============================================================================
// DATE PARSING
// ============================================================================

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a sale date, keeping whatever offset it was written with
///
/// Dates without an offset are taken at face value (pinned to +00:00 so the
/// calendar fields stay exactly as written).
pub fn parse_sale_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc().fixed_offset());
        }
    }

    None
}

// ============================================================================
// LENIENT FIELD DESERIALIZERS
// Each goes through Option<serde_json::Value> so JSON and CSV sources share one
// path: JSON null and empty CSV fields both arrive as None.
// ============================================================================

fn opaque_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => default_id(),
    })
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

fn lenient_sold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => parse_sale_date(&s),
        _ => None,
    })
}

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_remote_record() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven Backpack",
            "price": 329.85,
            "description": "Your perfect pack",
            "category": "men's clothing",
            "image": "https://example.com/1.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        }"#;

        let record: TransactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, "1");
        assert_eq!(record.price, Some(329.85));
        assert_eq!(record.sold, Some(false));
        assert_eq!(record.category_label(), "men's clothing");
        assert_eq!(record.sale_month(), Some(11));
        assert_eq!(record.title.as_deref(), Some("Fjallraven Backpack"));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let record: TransactionRecord = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();

        assert_eq!(record.id, "abc");
        assert_eq!(record.price, None);
        assert_eq!(record.amount(), 0.0);
        assert_eq!(record.sold, None);
        assert_eq!(record.category_label(), UNLABELED_CATEGORY);
        assert_eq!(record.sale_month(), None);
    }

    #[test]
    fn test_missing_id_gets_uuid() {
        let a: TransactionRecord = serde_json::from_str(r#"{"price": 10}"#).unwrap();
        let b: TransactionRecord = serde_json::from_str(r#"{"id": null}"#).unwrap();

        assert!(uuid::Uuid::parse_str(&a.id).is_ok());
        assert!(uuid::Uuid::parse_str(&b.id).is_ok());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_malformed_values_do_not_fail() {
        let json = r#"{"id": 7, "price": "not a number", "sold": "maybe", "dateOfSale": "yesterday"}"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.price, None);
        assert_eq!(record.sold, None);
        assert_eq!(record.date_of_sale, None);
    }

    #[test]
    fn test_mistyped_text_fields_do_not_fail() {
        let json = r#"{"id": 3, "title": 42, "description": ["a"], "image": {"src": "x"}, "category": 5}"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.title, None);
        assert_eq!(record.description, None);
        assert_eq!(record.image, None);
        assert_eq!(record.category_label(), "5");

        let record: TransactionRecord = serde_json::from_str(r#"{"id": 4, "category": true}"#).unwrap();
        assert_eq!(record.category_label(), "true");

        let record: TransactionRecord = serde_json::from_str(r#"{"id": 5, "category": {"name": "toys"}}"#).unwrap();
        assert_eq!(record.category_label(), UNLABELED_CATEGORY);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let json = r#"{"id": "x", "price": " 12.5 ", "sold": "TRUE"}"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.price, Some(12.5));
        assert_eq!(record.sold, Some(true));
    }

    #[test]
    fn test_month_uses_stored_offset() {
        // 23:30 on Dec 31 at -05:00 is already January in UTC
        let record = TransactionRecord::new("1").with_date_of_sale("2021-12-31T23:30:00-05:00");
        assert_eq!(record.sale_month(), Some(12));

        let record = TransactionRecord::new("2").with_date_of_sale("2022-01-01T00:15:00+05:30");
        assert_eq!(record.sale_month(), Some(1));
    }

    #[test]
    fn test_parse_sale_date_formats() {
        assert!(parse_sale_date("2021-07-27T20:29:54+05:30").is_some());
        assert!(parse_sale_date("2021-07-27T20:29:54Z").is_some());
        assert!(parse_sale_date("2021-07-27T20:29:54").is_some());
        assert!(parse_sale_date("2021-07-27 20:29:54.123").is_some());
        assert!(parse_sale_date("2021-07-27").is_some());
        assert!(parse_sale_date("07/27/2021").is_some());
        assert!(parse_sale_date("").is_none());
        assert!(parse_sale_date("27th of July").is_none());

        let naive = parse_sale_date("03/05/2022").unwrap();
        assert_eq!(naive.to_rfc3339(), "2022-03-05T00:00:00+00:00");
    }

    #[test]
    fn test_csv_row_deserializes() {
        let data = "\
id,title,price,description,category,image,sold,dateOfSale
1,Backpack,109.95,Nice,men's clothing,,true,2022-03-27T20:29:54+05:30
2,,,,,,,
";
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let records: Vec<TransactionRecord> = rdr.deserialize().collect::<Result<_, _>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "1");
        assert_eq!(records[0].price, Some(109.95));
        assert_eq!(records[0].sold, Some(true));
        assert_eq!(records[0].sale_month(), Some(3));
        assert_eq!(records[0].image, None);

        assert_eq!(records[1].id, "2");
        assert_eq!(records[1].price, None);
        assert_eq!(records[1].sold, None);
        assert_eq!(records[1].category_label(), UNLABELED_CATEGORY);
    }

    #[test]
    fn test_serialize_round_trip_keeps_camel_case() {
        let record = TransactionRecord::new("9")
            .with_price(42.0)
            .with_sold(true)
            .with_category("toys")
            .with_date_of_sale("2022-05-01T10:00:00+02:00");

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["dateOfSale"], "2022-05-01T10:00:00+02:00");
        assert_eq!(value["price"], 42.0);
        assert!(value.get("title").is_none());
    }
}
