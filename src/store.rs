//! Persistence for the catalog and ledger
//!
//! The `Storage` trait is the seam between the domain operations and
//! the JSON files on disk: tests run against `MemoryStore`, the server
//! runs against `JsonFileStore`. A future database backend only needs
//! to implement this trait.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;
use crate::models::{Catalog, Ledger};

/// Load/save access to the catalog and the ledger
pub trait Storage: Send {
    fn load_catalog(&self) -> Result<Catalog>;
    fn save_catalog(&self, catalog: &Catalog) -> Result<()>;
    fn load_ledger(&self) -> Result<Ledger>;
    fn save_ledger(&self, ledger: &Ledger) -> Result<()>;
}

/// File-backed store: `products.json` + `transactions.json` in one directory
///
/// Each save replaces the whole file. The write goes to a temp file
/// first and is moved into place with a rename, so a crash mid-write
/// cannot leave a half-written file behind. There is no atomicity
/// *across* the two files; see `Inventory::apply_stock_change`.
pub struct JsonFileStore {
    products_path: PathBuf,
    transactions_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: &Path) -> Self {
        JsonFileStore {
            products_path: data_dir.join("products.json"),
            transactions_path: data_dir.join("transactions.json"),
        }
    }
}

impl Storage for JsonFileStore {
    fn load_catalog(&self) -> Result<Catalog> {
        read_json(&self.products_path)
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        write_json(&self.products_path, catalog)
    }

    fn load_ledger(&self) -> Result<Ledger> {
        read_json(&self.transactions_path)
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        write_json(&self.transactions_path, ledger)
    }
}

/// Read a JSON file, returning the empty container when the file does
/// not exist yet. Malformed content propagates as a parse error.
fn read_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize pretty-printed and replace the file via temp + rename
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// In-memory store for unit tests
#[derive(Default)]
pub struct MemoryStore {
    catalog: Mutex<Catalog>,
    ledger: Mutex<Ledger>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn load_catalog(&self) -> Result<Catalog> {
        Ok(self.catalog.lock().unwrap().clone())
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        *self.catalog.lock().unwrap() = catalog.clone();
        Ok(())
    }

    fn load_ledger(&self) -> Result<Ledger> {
        Ok(self.ledger.lock().unwrap().clone())
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        *self.ledger.lock().unwrap() = ledger.clone();
        Ok(())
    }
}
