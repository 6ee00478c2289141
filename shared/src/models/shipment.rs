//! Shipment models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A delivery received from a supplier. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shipment {
    pub id: i64,
    pub product_id: i64,
    pub supplier_id: i64,
    pub quantity_received: i32,
    pub shipment_date: NaiveDate,
    pub reorder_id: Option<i64>,
}
