//! Dashboard handlers: metrics and the detail tables

use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};

use super::{render_rows, ExportQuery};
use crate::error::AppResult;
use crate::extract::AppPath;
use crate::services::dashboard::{DashboardMetrics, DashboardTable, DashboardTables};
use crate::services::DashboardService;
use crate::AppState;

/// Get the six basic metrics
pub async fn get_metrics(State(state): State<AppState>) -> Json<DashboardMetrics> {
    let service = DashboardService::new(state.db.clone());
    Json(service.get_metrics(state.config.dashboard.window_days).await)
}

/// Get all three detail tables
pub async fn get_tables(State(state): State<AppState>) -> AppResult<Json<DashboardTables>> {
    let service = DashboardService::new(state.db.clone());
    let tables = service.get_tables().await?;
    Ok(Json(tables))
}

/// Get one detail table, optionally as CSV
pub async fn get_table(
    State(state): State<AppState>,
    AppPath(table): AppPath<DashboardTable>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let service = DashboardService::new(state.db.clone());
    let file_name = table.file_name();

    match table {
        DashboardTable::SupplierContacts => {
            render_rows(service.supplier_contacts().await?, query.format, file_name)
        }
        DashboardTable::ProductStock => {
            render_rows(service.product_stock().await?, query.format, file_name)
        }
        DashboardTable::NeedingReorder => {
            render_rows(service.products_needing_reorder().await?, query.format, file_name)
        }
    }
}
