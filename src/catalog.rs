//! Product catalog operations: add/rename, delete, grouping and sorting
//!
//! All functions here are pure over the in-memory catalog; persistence
//! is the `Inventory` service's job.

use std::collections::BTreeMap;

use crate::models::{Catalog, Product};

/// Outcome of an add-or-rename request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// New product registered with stock 0
    Created,
    /// Existing id; only the name was updated
    Renamed,
    /// A required field (id, name or category) was empty
    MissingInput,
}

impl UpsertOutcome {
    pub fn success(&self) -> bool {
        !matches!(self, UpsertOutcome::MissingInput)
    }

    pub fn message(&self) -> &'static str {
        match self {
            UpsertOutcome::Created => "Product created.",
            UpsertOutcome::Renamed => "Product name updated.",
            UpsertOutcome::MissingInput => "Please input more information.",
        }
    }
}

/// Outcome of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

impl DeleteOutcome {
    pub fn success(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }

    pub fn message(&self) -> &'static str {
        match self {
            DeleteOutcome::Deleted => "Product deleted successfully.",
            DeleteOutcome::NotFound => "Product not found.",
        }
    }
}

/// Add a new product or rename an existing one
///
/// Requires non-empty id, name and category. An existing id has only
/// its name updated; category, stock and owner stay as registered. A
/// new id starts with stock 0.
pub fn upsert_product(
    catalog: &mut Catalog,
    id: &str,
    name: &str,
    category: &str,
    owner: &str,
) -> UpsertOutcome {
    if id.trim().is_empty() || name.trim().is_empty() || category.trim().is_empty() {
        return UpsertOutcome::MissingInput;
    }

    match catalog.get_mut(id) {
        Some(product) => {
            product.name = name.to_string();
            UpsertOutcome::Renamed
        }
        None => {
            catalog.insert(
                id.to_string(),
                Product {
                    id: id.to_string(),
                    name: name.to_string(),
                    category: category.to_string(),
                    stock: 0,
                    owner: owner.to_string(),
                },
            );
            UpsertOutcome::Created
        }
    }
}

/// Remove a product from the catalog
///
/// Ledger entries referencing the product are deliberately left in
/// place; history stays queryable by the deleted id.
pub fn delete_product(catalog: &mut Catalog, id: &str) -> DeleteOutcome {
    if catalog.remove(id).is_some() {
        DeleteOutcome::Deleted
    } else {
        DeleteOutcome::NotFound
    }
}

/// Group all products by category, category keys taken as-is
pub fn group_by_category(catalog: &Catalog) -> BTreeMap<String, Vec<Product>> {
    let mut grouped: BTreeMap<String, Vec<Product>> = BTreeMap::new();
    for product in catalog.values() {
        grouped
            .entry(product.category.clone())
            .or_default()
            .push(product.clone());
    }
    grouped
}

/// Products of one category, sorted descending by stock
///
/// Exact category match, no case normalization. The sort is stable so
/// ties keep catalog iteration order.
pub fn by_category_sorted_by_stock(catalog: &Catalog, category: &str) -> Vec<Product> {
    let mut products: Vec<Product> = catalog
        .values()
        .filter(|p| p.category == category)
        .cloned()
        .collect();
    products.sort_by(|a, b| b.stock.cmp(&a.stock));
    products
}
