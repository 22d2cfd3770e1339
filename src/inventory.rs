//! The `Inventory` service: domain operations wired to persistence
//!
//! Every user action is one synchronous load-modify-save cycle against
//! the backing store. Mutating operations only persist when the domain
//! outcome is a success, so rejected requests never touch the files.

use std::collections::BTreeMap;

use crate::catalog::{self, DeleteOutcome, UpsertOutcome};
use crate::error::Result;
use crate::ledger::{filter_transactions, TransactionFilter};
use crate::models::{now_timestamp, Product, TransactionRecord};
use crate::report;
use crate::stock::{self, StockChange, StockOutcome};
use crate::store::Storage;

pub struct Inventory<S: Storage> {
    store: S,
}

impl<S: Storage> Inventory<S> {
    pub fn new(store: S) -> Self {
        Inventory { store }
    }

    /// Register a new product (stock 0) or rename an existing one
    pub fn upsert_product(
        &self,
        id: &str,
        name: &str,
        category: &str,
        owner: &str,
    ) -> Result<UpsertOutcome> {
        let mut catalog = self.store.load_catalog()?;
        let outcome = catalog::upsert_product(&mut catalog, id, name, category, owner);
        if outcome.success() {
            self.store.save_catalog(&catalog)?;
            log::info!("product {}: {}", id, outcome.message());
        }
        Ok(outcome)
    }

    /// Delete a product; its transaction history stays in the ledger
    pub fn delete_product(&self, id: &str) -> Result<DeleteOutcome> {
        let mut catalog = self.store.load_catalog()?;
        let outcome = catalog::delete_product(&mut catalog, id);
        if outcome.success() {
            self.store.save_catalog(&catalog)?;
            log::info!("product {} deleted", id);
        }
        Ok(outcome)
    }

    /// All products grouped by category, sorted for display
    pub fn products_overview(&self) -> Result<BTreeMap<String, Vec<Product>>> {
        let catalog = self.store.load_catalog()?;
        Ok(report::products_overview(&catalog))
    }

    /// One category's products, descending by stock
    pub fn category_by_stock(&self, category: &str) -> Result<Vec<Product>> {
        let catalog = self.store.load_catalog()?;
        Ok(catalog::by_category_sorted_by_stock(&catalog, category))
    }

    /// Apply a purchase/sale and record it in the ledger
    ///
    /// On success the catalog is persisted first, then the ledger. The
    /// two writes are each atomic on their own file but not jointly: a
    /// crash between them can leave an updated stock level without its
    /// ledger entry. Known limitation of the two-file layout.
    pub fn apply_stock_change(&self, change: &StockChange) -> Result<StockOutcome> {
        let mut catalog = self.store.load_catalog()?;
        let mut ledger = self.store.load_ledger()?;

        let outcome = stock::apply_stock_change(&mut catalog, &mut ledger, change, now_timestamp());
        match &outcome {
            StockOutcome::Applied {
                operation,
                new_stock,
            } => {
                self.store.save_catalog(&catalog)?;
                self.store.save_ledger(&ledger)?;
                log::info!(
                    "{} of {} x{} by {} -> stock {}",
                    operation,
                    change.product_id,
                    change.quantity,
                    change.operator,
                    new_stock
                );
            }
            rejected => {
                log::warn!(
                    "stock change rejected for {:?}: {}",
                    change.product_id,
                    rejected.message()
                );
            }
        }
        Ok(outcome)
    }

    /// Ledger entries matching the filter, in original ledger order
    pub fn query_transactions(&self, filter: &TransactionFilter) -> Result<Vec<TransactionRecord>> {
        let ledger = self.store.load_ledger()?;
        Ok(filter_transactions(&ledger, filter))
    }

    /// The full ledger, newest first (the display-all view)
    pub fn all_transactions(&self) -> Result<Vec<TransactionRecord>> {
        let ledger = self.store.load_ledger()?;
        Ok(report::transactions_newest_first(&ledger))
    }

    /// Quantity sold per product name over an optional window/category
    pub fn sales_summary(
        &self,
        start: Option<&str>,
        end: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<(String, u64)>> {
        let catalog = self.store.load_catalog()?;
        let ledger = self.store.load_ledger()?;
        Ok(report::sales_summary(&ledger, &catalog, start, end, category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn inventory() -> Inventory<MemoryStore> {
        Inventory::new(MemoryStore::new())
    }

    fn purchase(id: &str, quantity: i64) -> StockChange {
        StockChange {
            product_id: id.to_string(),
            product_name: "Widget".to_string(),
            quantity,
            operation: "purchase".to_string(),
            operator: "alice".to_string(),
        }
    }

    fn sale(id: &str, quantity: i64) -> StockChange {
        StockChange {
            operation: "sale".to_string(),
            ..purchase(id, quantity)
        }
    }

    #[test]
    fn purchase_against_empty_catalog_is_unknown_product() {
        let inv = inventory();
        let outcome = inv.apply_stock_change(&purchase("P1", 5)).unwrap();
        assert_eq!(outcome, StockOutcome::UnknownProduct);
        assert!(inv.all_transactions().unwrap().is_empty());
    }

    #[test]
    fn register_purchase_then_oversell_scenario() {
        let inv = inventory();
        inv.upsert_product("P1", "Widget", "tools", "alice").unwrap();

        let outcome = inv.apply_stock_change(&purchase("P1", 10)).unwrap();
        assert!(outcome.success());
        assert_eq!(inv.category_by_stock("tools").unwrap()[0].stock, 10);
        assert_eq!(inv.all_transactions().unwrap().len(), 1);

        let outcome = inv.apply_stock_change(&sale("P1", 15)).unwrap();
        assert_eq!(outcome, StockOutcome::InsufficientStock { on_hand: 10 });
        assert_eq!(inv.category_by_stock("tools").unwrap()[0].stock, 10);
        assert_eq!(inv.all_transactions().unwrap().len(), 1);
    }

    #[test]
    fn rejected_upsert_is_not_persisted() {
        let inv = inventory();
        let outcome = inv.upsert_product("", "Widget", "tools", "alice").unwrap();
        assert_eq!(outcome, UpsertOutcome::MissingInput);
        assert!(inv.products_overview().unwrap().is_empty());
    }

    #[test]
    fn deleted_product_keeps_queryable_history() {
        let inv = inventory();
        inv.upsert_product("P1", "Widget", "tools", "alice").unwrap();
        inv.apply_stock_change(&purchase("P1", 10)).unwrap();
        inv.apply_stock_change(&sale("P1", 4)).unwrap();

        let outcome = inv.delete_product("P1").unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert!(inv.products_overview().unwrap().is_empty());

        let history = inv
            .query_transactions(&TransactionFilter {
                product_id: Some("P1".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn delete_unknown_product_reports_not_found() {
        let inv = inventory();
        assert_eq!(inv.delete_product("P1").unwrap(), DeleteOutcome::NotFound);
    }

    #[test]
    fn sales_summary_aggregates_over_service() {
        let inv = inventory();
        inv.upsert_product("P1", "Widget", "tools", "alice").unwrap();
        inv.apply_stock_change(&purchase("P1", 20)).unwrap();
        inv.apply_stock_change(&sale("P1", 3)).unwrap();
        inv.apply_stock_change(&sale("P1", 4)).unwrap();

        let summary = inv.sales_summary(None, None, None).unwrap();
        assert_eq!(summary, vec![("Widget".to_string(), 7)]);
    }
}
