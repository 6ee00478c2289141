//! Diagnostics handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::diagnostics::DiagnosticsReport;
use crate::services::DiagnosticsService;
use crate::AppState;

pub async fn get_diagnostics(State(state): State<AppState>) -> AppResult<Json<DiagnosticsReport>> {
    let service = DiagnosticsService::new(state.db.clone());
    let report = service.report(state.config.dashboard.window_days).await?;
    Ok(Json(report))
}
