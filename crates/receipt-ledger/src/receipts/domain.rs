use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

/// Validation failure raised while turning a submitted draft into a [`Receipt`].
///
/// `MalformedField` covers shape problems (the field is absent or not a JSON
/// string) and is checked before any grammar runs; `InvalidFormat` covers a
/// string that fails its field grammar. The first failure aborts the whole
/// receipt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("field '{field}' must be a quoted string")]
    MalformedField { field: &'static str },
    #[error("field '{field}' must be {expected}")]
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },
}

fn retailer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w\s&-]+$").expect("retailer pattern compiles"))
}

fn description_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\w\s-]+$").expect("description pattern compiles"))
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\d{2}$").expect("amount pattern compiles"))
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"))
}

/// Retailer name restricted to word characters, whitespace, `&`, and `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retailer(String);

impl Retailer {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if retailer_pattern().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::InvalidFormat {
                field: "retailer",
                expected: "a non-empty name of word characters, spaces, '&', or '-'",
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Calendar date of purchase, accepted as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseDate(NaiveDate);

impl PurchaseDate {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = ValidationError::InvalidFormat {
            field: "purchaseDate",
            expected: "a calendar date in YYYY-MM-DD form",
        };

        // chrono's %m/%d also take single digits; the wire format demands
        // zero padding, so check the shape first.
        if !date_pattern().is_match(raw) {
            return Err(invalid);
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| invalid)
    }

    pub fn day(&self) -> u32 {
        use chrono::Datelike;
        self.0.day()
    }
}

/// Time of purchase, accepted as 24-hour `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseTime(NaiveTime);

impl PurchaseTime {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "purchaseTime",
                expected: "a 24-hour time in HH:MM form",
            })
    }

    pub fn hour(&self) -> u32 {
        use chrono::Timelike;
        self.0.hour()
    }
}

/// Monetary amount held as integer cents.
///
/// The submitted text must carry exactly two fractional digits; keeping cents
/// rather than a float makes the round-dollar and quarter-multiple checks
/// exact instead of tolerance-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(u64);

impl Amount {
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, ValidationError> {
        let invalid = ValidationError::InvalidFormat {
            field,
            expected: "an unsigned amount with exactly two decimal digits",
        };

        if !amount_pattern().is_match(raw) {
            return Err(invalid);
        }

        let (dollars, fraction) = raw.split_once('.').ok_or_else(|| invalid.clone())?;
        let dollars: u64 = dollars.parse().map_err(|_| invalid.clone())?;
        let fraction: u64 = fraction.parse().map_err(|_| invalid.clone())?;

        dollars
            .checked_mul(100)
            .and_then(|total| total.checked_add(fraction))
            .map(Self)
            .ok_or(invalid)
    }

    pub fn cents(&self) -> u64 {
        self.0
    }
}

/// Item description restricted to word characters, whitespace, and `-`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if description_pattern().is_match(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ValidationError::InvalidFormat {
                field: "shortDescription",
                expected: "a non-empty description of word characters, spaces, or '-'",
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single purchased line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub description: Description,
    pub price: Amount,
}

impl Item {
    fn from_draft(draft: &ItemDraft) -> Result<Self, ValidationError> {
        let description =
            Description::parse(string_field("shortDescription", &draft.short_description)?)?;
        let price = Amount::parse("price", string_field("price", &draft.price)?)?;
        Ok(Self { description, price })
    }
}

/// Fully validated receipt. Every field passed its grammar at construction,
/// so downstream code never re-checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub retailer: Retailer,
    pub purchase_date: PurchaseDate,
    pub purchase_time: PurchaseTime,
    pub items: Vec<Item>,
    pub total: Amount,
}

impl Receipt {
    /// Validate a submitted draft field by field, failing on the first error.
    pub fn from_draft(draft: ReceiptDraft) -> Result<Self, ValidationError> {
        let retailer = Retailer::parse(string_field("retailer", &draft.retailer)?)?;
        let purchase_date =
            PurchaseDate::parse(string_field("purchaseDate", &draft.purchase_date)?)?;
        let purchase_time =
            PurchaseTime::parse(string_field("purchaseTime", &draft.purchase_time)?)?;
        let items = draft
            .items
            .iter()
            .map(Item::from_draft)
            .collect::<Result<Vec<_>, _>>()?;
        let total = Amount::parse("total", string_field("total", &draft.total)?)?;

        Ok(Self {
            retailer,
            purchase_date,
            purchase_time,
            items,
            total,
        })
    }
}

/// Wire shape of a submitted receipt before validation.
///
/// Fields stay untyped JSON values so that shape errors (a number where a
/// string belongs, a missing field) surface as [`ValidationError`] rather
/// than a deserializer rejection the boundary cannot classify.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptDraft {
    #[serde(default)]
    pub retailer: Value,
    #[serde(default, rename = "purchaseDate")]
    pub purchase_date: Value,
    #[serde(default, rename = "purchaseTime")]
    pub purchase_time: Value,
    #[serde(default)]
    pub items: Vec<ItemDraft>,
    #[serde(default)]
    pub total: Value,
}

/// Wire shape of a single line item before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDraft {
    #[serde(default, rename = "shortDescription")]
    pub short_description: Value,
    #[serde(default)]
    pub price: Value,
}

fn string_field<'a>(field: &'static str, value: &'a Value) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or(ValidationError::MalformedField { field })
}
