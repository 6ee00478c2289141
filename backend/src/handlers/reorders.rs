//! Reorder handlers

use axum::{extract::State, http::StatusCode, Json};
use shared::{Notice, OpenReorder, PlaceReorderInput};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::services::reorder::{PlacedReorder, ReceivedReorder};
use crate::services::ReorderService;
use crate::AppState;

/// Place a reorder
pub async fn place_reorder(
    State(state): State<AppState>,
    AppJson(input): AppJson<PlaceReorderInput>,
) -> AppResult<(StatusCode, Json<Notice<PlacedReorder>>)> {
    let service = ReorderService::new(state.db.clone());
    let placed = service.place_reorder(input).await?;

    let message = format!(
        "Order placed for {} with quantity {}",
        placed.product_name, placed.reorder.quantity
    );
    Ok((StatusCode::CREATED, Json(Notice::new(message, placed))))
}

/// Reorders that are still Pending or Ordered
pub async fn list_open_reorders(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OpenReorder>>> {
    let service = ReorderService::new(state.db.clone());
    let reorders = service.list_open_reorders().await?;
    Ok(Json(reorders))
}

/// Mark a reorder as received
pub async fn receive_reorder(
    State(state): State<AppState>,
    AppPath(reorder_id): AppPath<i64>,
) -> AppResult<Json<Notice<ReceivedReorder>>> {
    let service = ReorderService::new(state.db.clone());
    let received = service.mark_received(reorder_id).await?;

    let message = format!("Reorder ID {} marked as received", received.reorder.id);
    Ok(Json(Notice::new(message, received)))
}
