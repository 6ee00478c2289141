//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// Output format for tabular views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

/// Row counts per table, shown on the diagnostics view
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableCounts {
    pub suppliers: i64,
    pub products: i64,
    pub shipments: i64,
    pub stock_entries: i64,
    pub reorders: i64,
}

/// Success notice returned by the operational tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notice<T> {
    pub message: String,
    pub data: T,
}

impl<T> Notice<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}
