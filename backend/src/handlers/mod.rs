//! HTTP handlers for the Inventory Dashboard API

pub mod dashboard;
pub mod diagnostics;
pub mod health;
pub mod products;
pub mod reorders;

pub use dashboard::*;
pub use diagnostics::*;
pub use health::*;
pub use products::*;
pub use reorders::*;

use axum::{
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::ExportFormat;

use crate::error::AppResult;
use crate::services::export_to_csv;

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    pub format: Option<ExportFormat>,
}

/// Render rows as JSON, or as a CSV attachment when `?format=csv` is given
pub(crate) fn render_rows<T: Serialize>(
    rows: Vec<T>,
    format: Option<ExportFormat>,
    file_name: &str,
) -> AppResult<Response> {
    match format.unwrap_or_default() {
        ExportFormat::Csv => {
            let csv = export_to_csv(&rows)?;
            let disposition = format!("attachment; filename=\"{}\"", file_name);
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                csv,
            )
                .into_response())
        }
        ExportFormat::Json => Ok(Json(rows).into_response()),
    }
}
