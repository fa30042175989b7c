//! Store listing records and the normalization applied to raw model output.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::text_utils::parse_price;

/// Placeholder used for any field the model left out.
pub const UNKNOWN: &str = "Unknown";

/// A listing exactly as the model produced it. Fields keep whatever JSON
/// type the model chose; nothing is coerced until `ListingRecord::from_raw`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub store: Option<Value>,
    pub address: Option<Value>,
    pub status: Option<Value>,
    pub price: Option<Value>,
    pub quantity: Option<Value>,
    pub notes: Option<Value>,
}

impl RawListing {
    /// Pick the known fields out of one array element. Returns `None` for
    /// elements that are not JSON objects. Explicit nulls count as missing.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };
        let mut take = |key: &str| fields.remove(key).filter(|v| !v.is_null());
        Some(Self {
            store: take("store"),
            address: take("address"),
            status: take("status"),
            price: take("price"),
            quantity: take("quantity"),
            notes: take("notes"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Price {
    Amount(f64),
    Unknown,
}

impl Price {
    pub fn from_value(value: Option<&Value>) -> Self {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite() && *v >= 0.0),
            Some(Value::String(s)) => parse_price(s),
            _ => None,
        };
        parsed.map_or(Price::Unknown, Price::Amount)
    }

    /// Ascending sort key; unknown prices go last.
    pub fn sort_key(&self) -> f64 {
        match self {
            Price::Amount(v) => *v,
            Price::Unknown => f64::INFINITY,
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Price::Amount(v) => serializer.serialize_f64(*v),
            Price::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// Stock information comes in one of two shapes depending on what the model
/// was asked for.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Availability {
    Status { status: String },
    Priced { price: Price, quantity: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Quality {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl Quality {
    /// Map a model supplied label onto the enum. Anything unexpected is
    /// `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "excellent" => Quality::Excellent,
            "good" => Quality::Good,
            "fair" => Quality::Fair,
            "poor" => Quality::Poor,
            _ => Quality::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Excellent => "Excellent",
            Quality::Good => "Good",
            Quality::Fair => "Fair",
            Quality::Poor => "Poor",
            Quality::Unknown => UNKNOWN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub store: String,
    pub address: String,
    #[serde(flatten)]
    pub availability: Availability,
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<Quality>,
    pub last_checked: DateTime<Utc>,
}

impl ListingRecord {
    /// Fill in every missing field and stamp the record with `now`.
    pub fn from_raw(raw: RawListing, now: DateTime<Utc>) -> Self {
        let availability = if raw.price.is_some() || raw.quantity.is_some() {
            Availability::Priced {
                price: Price::from_value(raw.price.as_ref()),
                quantity: text_or_unknown(raw.quantity.as_ref()),
            }
        } else if let Some(status) = raw.status {
            Availability::Status {
                status: text_or_unknown(Some(&status)),
            }
        } else {
            Availability::Priced {
                price: Price::Unknown,
                quantity: UNKNOWN.to_string(),
            }
        };

        Self {
            store: text_or_unknown(raw.store.as_ref()),
            address: text_or_unknown(raw.address.as_ref()),
            availability,
            notes: raw.notes.as_ref().map(value_text).unwrap_or_default(),
            quality: None,
            last_checked: now,
        }
    }

    pub fn price(&self) -> Price {
        match &self.availability {
            Availability::Priced { price, .. } => *price,
            Availability::Status { .. } => Price::Unknown,
        }
    }
}

/// Render any JSON value as display text. Strings are trimmed, arrays are
/// joined with commas, objects fall back to their compact JSON form.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn text_or_unknown(value: Option<&Value>) -> String {
    let text = value.map(value_text).unwrap_or_default();
    if text.is_empty() {
        UNKNOWN.to_string()
    } else {
        text
    }
}

/// Stable ascending sort by price. Records without a usable price keep their
/// relative order at the end.
pub fn sort_by_price(records: &mut [ListingRecord]) {
    records.sort_by(|a, b| a.price().sort_key().total_cmp(&b.price().sort_key()));
}
