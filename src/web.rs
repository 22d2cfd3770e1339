//! Web server for the inventory dashboard UI
//!
//! Serves a single embedded HTML page plus REST endpoints for catalog
//! management, stock movements, transaction queries and sales reports.
//! Domain rejections (bad input, unknown product, insufficient stock)
//! come back as `success: false` with the outcome message; only hard
//! failures map to HTTP error codes.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;

use crate::error::InventoryError;
use crate::inventory::Inventory;
use crate::ledger::TransactionFilter;
use crate::models::{combine_date_time, Product, TransactionRecord};
use crate::stock::StockChange;
use crate::store::JsonFileStore;

/// Shared application state
///
/// The mutex is the serialization point for the catalog+ledger pair:
/// concurrent requests take turns, so two stock updates cannot race on
/// the underlying files.
#[derive(Clone)]
struct AppState {
    inv: Arc<Mutex<Inventory<JsonFileStore>>>,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    fn outcome(success: bool, message: String) -> Self {
        if success {
            ApiResponse {
                success: true,
                data: None,
                message: Some(message),
                error: None,
            }
        } else {
            ApiResponse {
                success: false,
                data: None,
                message: None,
                error: Some(message),
            }
        }
    }
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, String)>;

fn internal_error(e: InventoryError) -> (StatusCode, String) {
    log::error!("request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

/// POST /api/products request body
#[derive(Deserialize)]
struct AddProductRequest {
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    owner: String,
}

/// POST /api/stock request body
#[derive(Deserialize)]
struct StockChangeRequest {
    product_id: String,
    product_name: String,
    quantity: i64,
    operation: String,
    operator: String,
}

/// The date/time window shared by the transactions and sales endpoints
///
/// The UI supplies separate date and time strings; they are combined
/// into one ISO-8601 timestamp here, rejecting malformed input with a
/// 400 and a user-facing message. A blank time defaults to the start
/// (or end) of the given day so the window stays inclusive.
#[derive(Default)]
struct Window {
    start_date: String,
    start_time: String,
    end_date: String,
    end_time: String,
}

impl Window {
    fn bounds(&self) -> Result<(Option<String>, Option<String>), (StatusCode, String)> {
        let start = combine_bound(&self.start_date, &self.start_time, "00:00:00")?;
        let end = combine_bound(&self.end_date, &self.end_time, "23:59:59")?;
        Ok((start, end))
    }
}

fn combine_bound(
    date: &str,
    time: &str,
    default_time: &str,
) -> Result<Option<String>, (StatusCode, String)> {
    if date.trim().is_empty() {
        return Ok(None);
    }
    let time = if time.trim().is_empty() {
        default_time
    } else {
        time
    };
    combine_date_time(date, time)
        .map(Some)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// GET / - Serve the dashboard (single HTML page)
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

/// GET /api/products - all products grouped by category
async fn products_handler(
    State(state): State<AppState>,
) -> HandlerResult<BTreeMap<String, Vec<Product>>> {
    let inv = state.inv.lock().unwrap();
    let overview = inv.products_overview().map_err(internal_error)?;
    Ok(Json(ApiResponse::ok(overview)))
}

/// GET /api/categories/{category} - one category, sorted by stock
async fn category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> HandlerResult<Vec<Product>> {
    let inv = state.inv.lock().unwrap();
    let products = inv.category_by_stock(&category).map_err(internal_error)?;
    Ok(Json(ApiResponse::ok(products)))
}

/// POST /api/products - add a product or rename an existing one
async fn add_product_handler(
    State(state): State<AppState>,
    Json(req): Json<AddProductRequest>,
) -> HandlerResult<()> {
    let inv = state.inv.lock().unwrap();
    let outcome = inv
        .upsert_product(&req.id, &req.name, &req.category, &req.owner)
        .map_err(internal_error)?;
    Ok(Json(ApiResponse::outcome(
        outcome.success(),
        outcome.message().to_string(),
    )))
}

/// DELETE /api/products/{id}
async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<()> {
    let inv = state.inv.lock().unwrap();
    let outcome = inv.delete_product(&id).map_err(internal_error)?;
    Ok(Json(ApiResponse::outcome(
        outcome.success(),
        outcome.message().to_string(),
    )))
}

/// POST /api/stock - apply a purchase or sale
async fn stock_handler(
    State(state): State<AppState>,
    Json(req): Json<StockChangeRequest>,
) -> HandlerResult<()> {
    let change = StockChange {
        product_id: req.product_id,
        product_name: req.product_name,
        quantity: req.quantity,
        operation: req.operation,
        operator: req.operator,
    };
    let inv = state.inv.lock().unwrap();
    let outcome = inv.apply_stock_change(&change).map_err(internal_error)?;
    Ok(Json(ApiResponse::outcome(
        outcome.success(),
        outcome.message(),
    )))
}

/// GET /api/transactions query parameters
#[derive(Deserialize, Default)]
#[serde(default)]
struct TransactionParams {
    product_id: String,
    operator: String,
    start_date: String,
    start_time: String,
    end_date: String,
    end_time: String,
}

impl TransactionParams {
    fn window(&self) -> Window {
        Window {
            start_date: self.start_date.clone(),
            start_time: self.start_time.clone(),
            end_date: self.end_date.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

/// GET /api/transactions - query the ledger
///
/// Without any filter this is the display-all view, newest first. With
/// a filter, results keep original ledger order. The asymmetry matches
/// the two dashboard pages that call it.
async fn transactions_handler(
    State(state): State<AppState>,
    Query(params): Query<TransactionParams>,
) -> HandlerResult<Vec<TransactionRecord>> {
    let (start, end) = params.window().bounds()?;
    let filter = TransactionFilter {
        product_id: none_if_blank(&params.product_id),
        operator: none_if_blank(&params.operator),
        start,
        end,
    };

    let inv = state.inv.lock().unwrap();
    let records = if filter.is_empty() {
        inv.all_transactions().map_err(internal_error)?
    } else {
        inv.query_transactions(&filter).map_err(internal_error)?
    };
    Ok(Json(ApiResponse::ok(records)))
}

/// GET /api/sales query parameters
#[derive(Deserialize, Default)]
#[serde(default)]
struct SalesParams {
    category: String,
    start_date: String,
    start_time: String,
    end_date: String,
    end_time: String,
}

impl SalesParams {
    fn window(&self) -> Window {
        Window {
            start_date: self.start_date.clone(),
            start_time: self.start_time.clone(),
            end_date: self.end_date.clone(),
            end_time: self.end_time.clone(),
        }
    }
}

/// One row of the sales summary
#[derive(Serialize)]
struct SalesRow {
    product_name: String,
    total_quantity: u64,
}

/// GET /api/sales - quantity sold per product name, descending
async fn sales_handler(
    State(state): State<AppState>,
    Query(params): Query<SalesParams>,
) -> HandlerResult<Vec<SalesRow>> {
    let (start, end) = params.window().bounds()?;
    let category = none_if_blank(&params.category);

    let inv = state.inv.lock().unwrap();
    let summary = inv
        .sales_summary(start.as_deref(), end.as_deref(), category.as_deref())
        .map_err(internal_error)?;

    let rows = summary
        .into_iter()
        .map(|(product_name, total_quantity)| SalesRow {
            product_name,
            total_quantity,
        })
        .collect();
    Ok(Json(ApiResponse::ok(rows)))
}

/// Build the web server router
pub fn create_router(inv: Arc<Mutex<Inventory<JsonFileStore>>>) -> Router {
    let state = AppState { inv };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/products", get(products_handler).post(add_product_handler))
        .route("/api/products/{id}", axum::routing::delete(delete_product_handler))
        .route("/api/categories/{category}", get(category_handler))
        .route("/api/stock", post(stock_handler))
        .route("/api/transactions", get(transactions_handler))
        .route("/api/sales", get(sales_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the web server (async)
///
/// Binds to 0.0.0.0 (all interfaces) to work with Docker port mapping.
/// Runs until ctrl-c.
pub async fn serve(
    inv: Arc<Mutex<Inventory<JsonFileStore>>>,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(inv);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Dashboard listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
    log::info!("Shutting down");
}
