//! Inventory Dashboard - product catalog, stock movements and sales reporting
//!
//! Serves a browser dashboard over two flat JSON files: a product
//! catalog keyed by id and an append-only transaction ledger.

use clap::Parser;
use inventory_dash::{web, Inventory, JsonFileStore};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Inventory dashboard server over JSON-file storage
#[derive(Parser, Debug)]
#[command(name = "inventory_dash")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding products.json and transactions.json
    #[arg(short, long, default_value_t = default_data_dir())]
    data_dir: String,

    /// Port for the web UI
    #[arg(short, long, default_value_t = 8050)]
    port: u16,
}

/// Returns the default data directory: ~/.local/share/inventory_dash
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inventory_dash")
        .to_string_lossy()
        .to_string()
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let data_dir = PathBuf::from(&args.data_dir);

    log::info!("Starting inventory_dash...");
    log::info!("Data directory: {}", data_dir.display());

    // Ensure the data directory exists
    if !data_dir.exists() {
        if let Err(e) = std::fs::create_dir_all(&data_dir) {
            log::error!("Failed to create data directory: {}", e);
            std::process::exit(1);
        }
        log::info!("Created directory: {}", data_dir.display());
    }

    let store = JsonFileStore::new(&data_dir);

    // Fail fast on unreadable state instead of serving errors later
    let inventory = Inventory::new(store);
    if let Err(e) = inventory.products_overview() {
        log::error!("Failed to load inventory state: {}", e);
        std::process::exit(1);
    }

    let inv = Arc::new(Mutex::new(inventory));

    if let Err(e) = web::serve(inv, args.port).await {
        log::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
