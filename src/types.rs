//! Common types used throughout wallet-trades
//!
//! Trade records are kept as raw JSON objects so that every field the API
//! returns survives to the output file untouched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Field holding the dedup key of a trade
pub const DEDUP_KEY_FIELD: &str = "transactionHash";

// ============================================================================
// Side
// ============================================================================

/// Trade side filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    #[value(name = "BUY")]
    Buy,
    #[value(name = "SELL")]
    Sell,
}

impl Side {
    /// Wire representation used by the trades API
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(format!("unknown side '{other}', expected BUY or SELL")),
        }
    }
}

// ============================================================================
// Trade Record
// ============================================================================

/// One trade as returned by the API
///
/// Only [`DEDUP_KEY_FIELD`] is inspected structurally. The remaining
/// accessors are read-only conveniences for the console summary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeRecord(JsonObject);

impl TradeRecord {
    /// Build a record from an arbitrary JSON value, if it is an object
    pub fn from_value(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Transaction hash used to deduplicate records across pages
    pub fn dedup_key(&self) -> Option<&str> {
        self.get_str(DEDUP_KEY_FIELD)
    }

    /// Raw field access
    pub fn get(&self, field: &str) -> Option<&JsonValue> {
        self.0.get(field)
    }

    /// String field access
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(JsonValue::as_str)
    }

    pub fn side(&self) -> Option<Side> {
        self.get_str("side").and_then(|s| s.parse().ok())
    }

    pub fn price(&self) -> Option<f64> {
        self.get("price").and_then(as_f64_lenient)
    }

    pub fn size(&self) -> Option<f64> {
        self.get("size").and_then(as_f64_lenient)
    }

    /// Unix timestamp in seconds
    pub fn timestamp(&self) -> Option<i64> {
        match self.get("timestamp")? {
            JsonValue::Number(n) => n.as_i64(),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn condition_id(&self) -> Option<&str> {
        self.get_str("conditionId")
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The API is inconsistent about quoting numbers
fn as_f64_lenient(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}
