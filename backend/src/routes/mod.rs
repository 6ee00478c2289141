//! Route definitions for the Inventory Dashboard

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/dashboard", dashboard_routes())
        .route("/categories", get(handlers::list_categories))
        .route("/suppliers", get(handlers::list_suppliers))
        .nest("/products", product_routes())
        .nest("/reorders", reorder_routes())
        .route("/diagnostics", get(handlers::get_diagnostics))
}

/// Basic information screen
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(handlers::get_metrics))
        .route("/tables", get(handlers::get_tables))
        .route("/tables/:table", get(handlers::get_table))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/:id/history", get(handlers::get_product_history))
}

fn reorder_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::place_reorder))
        .route("/open", get(handlers::list_open_reorders))
        .route("/:id/receive", post(handlers::receive_reorder))
}
