//! Read-only diagnostics: table sizes, ledger audit and the restock window
//! breakdown behind the dashboard's restock value

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::inventory::InventoryService;
use shared::{audit_reorders, window_start, windowed_values, ChangeType, LedgerAudit, TableCounts, WindowedEntryValue};

#[derive(Clone)]
pub struct DiagnosticsService {
    db: PgPool,
}

#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub table_counts: TableCounts,
    pub ledger: LedgerAudit,
    pub window_days: i64,
    pub window_start: Option<NaiveDate>,
    pub restock_entries: Vec<WindowedEntryValue>,
}

impl DiagnosticsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn report(&self, window_days: i64) -> AppResult<DiagnosticsReport> {
        let inventory = InventoryService::new(self.db.clone());

        let table_counts = inventory.table_counts().await?;
        let products = inventory.list_products().await?;
        let entries = inventory.list_stock_entries().await?;
        let reorders = inventory.list_reorders().await?;
        let shipments = inventory.list_shipments().await?;

        let ledger = audit_reorders(&reorders, &shipments, &entries);
        if !ledger.is_consistent() {
            tracing::warn!(
                violations = ledger.violations.len(),
                "Ledger audit found inconsistent reorders"
            );
        }

        let restock_entries = windowed_values(&entries, &products, window_days)
            .into_iter()
            .filter(|v| v.change_type == ChangeType::Restock)
            .collect();

        Ok(DiagnosticsReport {
            table_counts,
            ledger,
            window_days,
            window_start: window_start(&entries, window_days),
            restock_entries,
        })
    }
}
