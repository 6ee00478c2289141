//! WebAssembly module for the Inventory Dashboard
//!
//! Provides client-side computation for:
//! - Product and reorder form validation before submit
//! - Recomputing the dashboard metric tiles from rows already on the page

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use shared::{
    compute_basic_metrics, is_valid_reorder_quantity, validate_product_name, MetricInputs,
    MetricTile, Product, Reorder, StockEntry, DEFAULT_WINDOW_DAYS,
};

/// Check a product name; returns the form message when it is rejected
#[wasm_bindgen]
pub fn check_product_name(name: &str) -> Option<String> {
    validate_product_name(name)
        .err()
        .map(|e| e.message.map_or_else(|| e.code.to_string(), |m| m.to_string()))
}

#[wasm_bindgen]
pub fn check_reorder_quantity(quantity: f64) -> bool {
    quantity.fract() == 0.0 && is_valid_reorder_quantity(quantity as i64)
}

/// Is the stock strictly under the reorder level
#[wasm_bindgen]
pub fn is_below_reorder_level(stock_quantity: i32, reorder_level: i32) -> bool {
    stock_quantity < reorder_level
}

/// Compute metric tiles from JSON arrays of products, stock entries and
/// reorders. A window of zero or less uses the default.
///
/// Returns an array of `[label, value]` pairs in dashboard order.
#[wasm_bindgen]
pub fn compute_metric_tiles(
    supplier_count: u32,
    products_json: &str,
    entries_json: &str,
    reorders_json: &str,
    window_days: i32,
) -> Result<js_sys::Array, JsValue> {
    let tiles = metric_tiles(
        supplier_count,
        products_json,
        entries_json,
        reorders_json,
        window_days,
    )
    .map_err(|e| JsValue::from_str(&e))?;

    Ok(tiles
        .into_iter()
        .map(|tile| {
            let pair = js_sys::Array::new();
            pair.push(&JsValue::from_str(&tile.label));
            pair.push(&JsValue::from_str(&tile.value));
            JsValue::from(pair)
        })
        .collect())
}

fn metric_tiles(
    supplier_count: u32,
    products_json: &str,
    entries_json: &str,
    reorders_json: &str,
    window_days: i32,
) -> Result<Vec<MetricTile>, String> {
    let products: Vec<Product> = parse("products", products_json)?;
    let entries: Vec<StockEntry> = parse("stock entries", entries_json)?;
    let reorders: Vec<Reorder> = parse("reorders", reorders_json)?;

    let window_days = if window_days > 0 {
        i64::from(window_days)
    } else {
        DEFAULT_WINDOW_DAYS
    };

    let metrics = compute_basic_metrics(
        &MetricInputs {
            supplier_count: Some(i64::from(supplier_count)),
            products: Some(&products),
            entries: Some(&entries),
            reorders: Some(&reorders),
        },
        window_days,
    );

    Ok(metrics.tiles())
}

fn parse<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}
