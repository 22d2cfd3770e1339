//! Stock mutation: the one invariant-bearing operation
//!
//! A purchase or sale validates its input, checks the catalog, adjusts
//! the product's stock and appends a ledger entry. A sale that would
//! drive stock negative is rejected before any state changes.

use crate::models::{Catalog, Ledger, Operation, TransactionRecord};

/// A raw stock-change request, as supplied by the UI
///
/// Fields arrive as strings/numbers straight from user input and are
/// validated here, once, at the boundary.
#[derive(Debug, Clone)]
pub struct StockChange {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub operation: String,
    pub operator: String,
}

/// Outcome of a stock-change request
///
/// Expected failures are values, not errors: the message is the single
/// source of truth the caller shows to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockOutcome {
    /// Stock adjusted and a ledger entry appended
    Applied {
        operation: Operation,
        new_stock: u32,
    },
    /// A required field was empty, the quantity was not positive, or
    /// the operation was not purchase/sale
    MissingInput,
    /// Product id not in the catalog
    UnknownProduct,
    /// Sale quantity exceeds on-hand stock
    InsufficientStock { on_hand: u32 },
}

impl StockOutcome {
    pub fn success(&self) -> bool {
        matches!(self, StockOutcome::Applied { .. })
    }

    pub fn message(&self) -> String {
        match self {
            StockOutcome::Applied {
                operation,
                new_stock,
            } => format!(
                "Stock updated successfully ({}). On hand: {}.",
                operation, new_stock
            ),
            StockOutcome::MissingInput => "Please input more information.".to_string(),
            StockOutcome::UnknownProduct => {
                "New product - register its category first.".to_string()
            }
            StockOutcome::InsufficientStock { on_hand } => {
                format!("Insufficient stock. On hand: {}.", on_hand)
            }
        }
    }
}

/// Validate and apply a purchase/sale against the catalog, appending a
/// ledger entry on success
///
/// The recorded product name is taken from the catalog at operation
/// time, so later renames or deletes never rewrite history. On any
/// failure outcome neither the catalog nor the ledger is touched.
pub fn apply_stock_change(
    catalog: &mut Catalog,
    ledger: &mut Ledger,
    change: &StockChange,
    timestamp: String,
) -> StockOutcome {
    if change.product_id.trim().is_empty()
        || change.product_name.trim().is_empty()
        || change.operator.trim().is_empty()
    {
        return StockOutcome::MissingInput;
    }
    let quantity = match u32::try_from(change.quantity) {
        Ok(q) if q > 0 => q,
        _ => return StockOutcome::MissingInput,
    };
    let operation = match Operation::parse(&change.operation) {
        Some(op) => op,
        None => return StockOutcome::MissingInput,
    };

    let product = match catalog.get_mut(&change.product_id) {
        Some(p) => p,
        None => return StockOutcome::UnknownProduct,
    };

    match operation {
        Operation::Purchase => {
            product.stock = product.stock.saturating_add(quantity);
        }
        Operation::Sale => {
            if product.stock < quantity {
                return StockOutcome::InsufficientStock {
                    on_hand: product.stock,
                };
            }
            product.stock -= quantity;
        }
    }

    ledger.push(TransactionRecord {
        product_id: product.id.clone(),
        product_name: product.name.clone(),
        operation,
        operator: change.operator.clone(),
        timestamp,
        quantity,
    });

    StockOutcome::Applied {
        operation,
        new_stock: catalog[&change.product_id].stock,
    }
}
