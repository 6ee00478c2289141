//! Product inventory history

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source of a history row
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum HistoryRecordType {
    Shipment,
    #[serde(rename = "Stock Entry")]
    StockEntry,
    Reorder,
}

/// One row of the combined shipment / stock entry / reorder history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    pub product_id: i64,
    pub record_type: HistoryRecordType,
    pub record_date: NaiveDate,
    pub quantity: i32,
    /// Change type for stock entries, status for reorders
    pub detail: Option<String>,
}

impl HistoryRecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRecordType::Shipment => "Shipment",
            HistoryRecordType::StockEntry => "Stock Entry",
            HistoryRecordType::Reorder => "Reorder",
        }
    }
}

impl std::str::FromStr for HistoryRecordType {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Shipment" => Ok(HistoryRecordType::Shipment),
            "Stock Entry" => Ok(HistoryRecordType::StockEntry),
            "Reorder" => Ok(HistoryRecordType::Reorder),
            other => Err(crate::error::DomainError::UnknownVariant {
                kind: "history record type",
                value: other.to_string(),
            }),
        }
    }
}
