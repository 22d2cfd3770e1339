//! Read-side reporting: sales aggregation and the display-all views

use std::collections::{BTreeMap, HashMap};

use crate::catalog::group_by_category;
use crate::models::{Catalog, Ledger, Operation, Product, TransactionRecord};

/// Total quantity sold per product name, ordered descending by total
///
/// Scans the ledger for sale records, applying each time bound
/// inclusively when present and the optional category filter against
/// the *current* catalog. A sale whose product has since been deleted
/// cannot be resolved to a category and is excluded from
/// category-filtered results.
///
/// Aggregation is by product name, not id: two ids sharing a name
/// collide into one row. That mirrors how transactions denormalize the
/// name and is intentional.
pub fn sales_summary(
    ledger: &Ledger,
    catalog: &Catalog,
    start: Option<&str>,
    end: Option<&str>,
    category: Option<&str>,
) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in ledger {
        if record.operation != Operation::Sale {
            continue;
        }
        if let Some(start) = start {
            if record.timestamp.as_str() < start {
                continue;
            }
        }
        if let Some(end) = end {
            if record.timestamp.as_str() > end {
                continue;
            }
        }
        if let Some(category) = category {
            match catalog.get(&record.product_id) {
                Some(product) if product.category == category => {}
                _ => continue,
            }
        }

        match index.get(&record.product_name) {
            Some(&i) => totals[i].1 += u64::from(record.quantity),
            None => {
                index.insert(record.product_name.clone(), totals.len());
                totals.push((record.product_name.clone(), u64::from(record.quantity)));
            }
        }
    }

    // Stable sort keeps first-encountered order for equal totals.
    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals
}

/// All products grouped by category for display: category keys
/// ascending, each group's products descending by stock
pub fn products_overview(catalog: &Catalog) -> BTreeMap<String, Vec<Product>> {
    let mut grouped = group_by_category(catalog);
    for products in grouped.values_mut() {
        products.sort_by(|a, b| b.stock.cmp(&a.stock));
    }
    grouped
}

/// The full ledger, newest first
pub fn transactions_newest_first(ledger: &Ledger) -> Vec<TransactionRecord> {
    let mut records = ledger.clone();
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    records
}
