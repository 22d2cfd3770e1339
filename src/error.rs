//! Error types for inventory_dash

use thiserror::Error;

/// Unified error type for inventory_dash operations
///
/// Only hard failures live here. Expected domain outcomes (unknown
/// product, insufficient stock, missing input) are returned as values
/// with user-facing messages, not as errors.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// File I/O failed (missing directory, permissions, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted JSON file could not be parsed
    #[error("Parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A user-supplied date or time string could not be parsed
    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
}

/// Result alias for inventory_dash operations
pub type Result<T> = std::result::Result<T, InventoryError>;
