//! Stock ledger models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Kind of stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// Customer purchase, stored with a negative quantity
    Sale,
    /// Supplier delivery, stored with a positive quantity
    Restock,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Sale => "Sale",
            ChangeType::Restock => "Restock",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sale" => Ok(ChangeType::Sale),
            "Restock" => Ok(ChangeType::Restock),
            other => Err(DomainError::UnknownVariant {
                kind: "change type",
                value: other.to_string(),
            }),
        }
    }
}

/// Append-only ledger entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockEntry {
    pub id: i64,
    pub product_id: i64,
    pub change_quantity: i32,
    pub change_type: ChangeType,
    pub entry_date: NaiveDate,
    /// Set when the entry was written by a reorder receipt
    pub reorder_id: Option<i64>,
}

impl StockEntry {
    /// Absolute size of the movement regardless of sign convention
    pub fn magnitude(&self) -> u32 {
        self.change_quantity.unsigned_abs()
    }
}
