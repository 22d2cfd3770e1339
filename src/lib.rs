//! Inventory Dashboard - product catalog, stock movements and sales reporting
//!
//! Tracks products and their stock levels in a JSON-file-backed catalog,
//! records every purchase/sale in an append-only transaction ledger and
//! serves a small browser dashboard for browsing and reporting.

pub mod catalog;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod models;
pub mod report;
pub mod stock;
pub mod store;
pub mod web;

pub use error::{InventoryError, Result};
pub use inventory::Inventory;
pub use models::{Catalog, Ledger, Operation, Product, TransactionRecord};
pub use store::{JsonFileStore, MemoryStore, Storage};
