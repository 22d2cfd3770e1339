//! Core data types: products, transactions and timestamp handling
//!
//! Timestamps are stored as ISO-8601 strings. That keeps the JSON files
//! human-readable and lets range filters compare lexicographically,
//! which for ISO-8601 is the same as chronological order.

use chrono::{Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{InventoryError, Result};

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    /// On-hand quantity. Unsigned, so negative stock is unrepresentable;
    /// the sale path still checks sufficiency before subtracting.
    pub stock: u32,
    pub owner: String,
}

/// The kind of stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Purchase,
    Sale,
}

impl Operation {
    /// Parse user input ("purchase" / "sale", case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "purchase" => Some(Operation::Purchase),
            "sale" => Some(Operation::Sale),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Purchase => "purchase",
            Operation::Sale => "sale",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in the append-only transaction ledger
///
/// Product name is denormalized at operation time so renaming or
/// deleting a product never rewrites history. No synthetic id; ordering
/// is insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub product_id: String,
    pub product_name: String,
    #[serde(rename = "operation_type")]
    pub operation: Operation,
    pub operator: String,
    pub timestamp: String,
    pub quantity: u32,
}

/// The product catalog, keyed by product id
///
/// A BTreeMap keeps iteration deterministic and the persisted JSON
/// stable across saves.
pub type Catalog = BTreeMap<String, Product>;

/// The transaction ledger, in insertion order
pub type Ledger = Vec<TransactionRecord>;

/// Current local time as an ISO-8601 timestamp string
pub fn now_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Combine a user-supplied date string and time string into one
/// ISO-8601 timestamp
///
/// The date must be `YYYY-MM-DD`; the time `HH:MM:SS` or `HH:MM`.
/// Malformed input is rejected with a parse error carrying a message
/// suitable for showing to the user.
pub fn combine_date_time(date: &str, time: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| InventoryError::Timestamp(format!("invalid date: {:?}", date.trim())))?;
    let time = time.trim();
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| InventoryError::Timestamp(format!("invalid time: {:?}", time)))?;
    Ok(date.and_time(time).format("%Y-%m-%dT%H:%M:%S").to_string())
}
