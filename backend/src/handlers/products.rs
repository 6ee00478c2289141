//! Product handlers: form options, creation and history

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use shared::{NewProductInput, Notice, ProductOption, SupplierOption};

use super::{render_rows, ExportQuery};
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::services::product::CreatedProduct;
use crate::services::ProductService;
use crate::AppState;

/// Distinct product categories for the category selector
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let service = ProductService::new(state.db.clone());
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

pub async fn list_suppliers(State(state): State<AppState>) -> AppResult<Json<Vec<SupplierOption>>> {
    let service = ProductService::new(state.db.clone());
    let suppliers = service.list_supplier_options().await?;
    Ok(Json(suppliers))
}

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductOption>>> {
    let service = ProductService::new(state.db.clone());
    let products = service.list_product_options().await?;
    Ok(Json(products))
}

/// Add a product with its starting stock
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(input): AppJson<NewProductInput>,
) -> AppResult<(StatusCode, Json<Notice<CreatedProduct>>)> {
    let service = ProductService::new(state.db.clone());
    let created = service.add_product(input).await?;

    let message = format!("Product {} Added Successfully", created.product.name);
    Ok((StatusCode::CREATED, Json(Notice::new(message, created))))
}

/// Inventory history for one product, optionally as CSV
pub async fn get_product_history(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<i64>,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let service = ProductService::new(state.db.clone());
    let history = service.get_history(product_id).await?;

    let file_name = format!("product_{}_history.csv", product_id);
    render_rows(history, query.format, &file_name)
}
