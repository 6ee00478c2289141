//! Dashboard metrics recomputed from raw rows
//!
//! The trailing window ends at the latest `entry_date` across all stock
//! entries, not at today's date, and is inclusive at its lower bound.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::{ChangeType, Product, Reorder, StockEntry};

/// Default trailing window, roughly three months
pub const DEFAULT_WINDOW_DAYS: i64 = 90;

/// The six "Basic Information" metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicMetrics {
    pub total_suppliers: i64,
    pub total_products: i64,
    pub total_categories: i64,
    pub sale_value: Decimal,
    pub restock_value: Decimal,
    pub below_reorder_without_open_reorder: i64,
}

/// A labelled metric ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
}

impl BasicMetrics {
    /// Tiles in dashboard order
    pub fn tiles(&self) -> Vec<MetricTile> {
        let tile = |label: &str, value: String| MetricTile {
            label: label.to_string(),
            value,
        };
        vec![
            tile("Total Suppliers", self.total_suppliers.to_string()),
            tile("Total Products", self.total_products.to_string()),
            tile("Total Categories Dealing", self.total_categories.to_string()),
            tile("Total Sale Value (Last 3 Months)", self.sale_value.to_string()),
            tile(
                "Total Restock Value (Last 3 Months)",
                self.restock_value.to_string(),
            ),
            tile(
                "Below Reorder & No Pending Reorders",
                self.below_reorder_without_open_reorder.to_string(),
            ),
        ]
    }
}

/// Raw collections the metrics are computed from.
///
/// `None` means the fetch failed; every metric depending on it becomes zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricInputs<'a> {
    pub supplier_count: Option<i64>,
    pub products: Option<&'a [Product]>,
    pub entries: Option<&'a [StockEntry]>,
    pub reorders: Option<&'a [Reorder]>,
}

pub fn compute_basic_metrics(inputs: &MetricInputs<'_>, window_days: i64) -> BasicMetrics {
    let products = inputs.products;

    let ledger = |change_type| match (inputs.entries, products) {
        (Some(entries), Some(products)) => ledger_value(entries, products, change_type, window_days),
        _ => Decimal::ZERO,
    };

    BasicMetrics {
        total_suppliers: inputs.supplier_count.unwrap_or(0),
        total_products: products.map_or(0, |p| p.len() as i64),
        total_categories: products.map_or(0, distinct_categories),
        sale_value: ledger(ChangeType::Sale),
        restock_value: ledger(ChangeType::Restock),
        below_reorder_without_open_reorder: match (products, inputs.reorders) {
            (Some(products), Some(reorders)) => {
                count_below_reorder_without_open_reorder(products, reorders)
            }
            _ => 0,
        },
    }
}

pub fn distinct_categories(products: &[Product]) -> i64 {
    products
        .iter()
        .map(|p| p.category.as_str())
        .collect::<HashSet<_>>()
        .len() as i64
}

/// Products strictly under their reorder level with no open reorder
pub fn count_below_reorder_without_open_reorder(products: &[Product], reorders: &[Reorder]) -> i64 {
    let open: HashSet<i64> = reorders
        .iter()
        .filter(|r| r.status.is_open())
        .map(|r| r.product_id)
        .collect();

    products
        .iter()
        .filter(|p| p.is_below_reorder_level() && !open.contains(&p.id))
        .count() as i64
}

/// First date inside the trailing window, or `None` when there are no entries.
///
/// A negative window is treated as zero days. A window reaching past the
/// earliest representable date starts at `NaiveDate::MIN`.
pub fn window_start(entries: &[StockEntry], window_days: i64) -> Option<NaiveDate> {
    let latest = entries.iter().map(|e| e.entry_date).max()?;
    Some(
        Duration::try_days(window_days.max(0))
            .and_then(|span| latest.checked_sub_signed(span))
            .unwrap_or(NaiveDate::MIN),
    )
}

/// Sum of |change_quantity| x price for one change type inside the window,
/// rounded to two decimal places
pub fn ledger_value(
    entries: &[StockEntry],
    products: &[Product],
    change_type: ChangeType,
    window_days: i64,
) -> Decimal {
    let total: Decimal = windowed_values(entries, products, window_days)
        .into_iter()
        .filter(|v| v.change_type == change_type && v.in_window)
        .map(|v| v.value)
        .sum();
    total.round_dp(2)
}

/// Per-entry contribution to the window sums
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowedEntryValue {
    pub entry_id: i64,
    pub product_id: i64,
    pub product_name: Option<String>,
    pub change_type: ChangeType,
    pub entry_date: NaiveDate,
    pub quantity: u32,
    pub price: Decimal,
    pub value: Decimal,
    pub in_window: bool,
}

/// Valuation of every entry; entries whose product is unknown are worth zero
pub fn windowed_values(
    entries: &[StockEntry],
    products: &[Product],
    window_days: i64,
) -> Vec<WindowedEntryValue> {
    let Some(start) = window_start(entries, window_days) else {
        return Vec::new();
    };
    let by_id: HashMap<i64, &Product> = products.iter().map(|p| (p.id, p)).collect();

    entries
        .iter()
        .map(|entry| {
            let product = by_id.get(&entry.product_id);
            let price = product.map_or(Decimal::ZERO, |p| p.price);
            let quantity = entry.magnitude();
            WindowedEntryValue {
                entry_id: entry.id,
                product_id: entry.product_id,
                product_name: product.map(|p| p.name.clone()),
                change_type: entry.change_type,
                entry_date: entry.entry_date,
                quantity,
                price,
                value: Decimal::from(quantity) * price,
                in_window: entry.entry_date >= start,
            }
        })
        .collect()
}
