//! Ledger tests against a real PostgreSQL database
//!
//! Each test gets a fresh database with the migrations applied. They need
//! `DATABASE_URL` pointing at a server the test user can create databases on,
//! and are run with `cargo test -- --ignored`.
//!
//! Tests for the transactional writes including:
//! - Product creation records one shipment and one restock entry
//! - Receiving a reorder leaves the ledger audit clean
//! - A second receipt is a conflict and writes nothing
//! - A failed insert rolls the whole receipt back

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tower::ServiceExt;

use inventory_backend::config::{DashboardConfig, DatabaseConfig, ServerConfig};
use inventory_backend::error::AppError;
use inventory_backend::services::{InventoryService, ProductService, ReorderService};
use inventory_backend::{create_app, AppState, Config};
use shared::{audit_reorders, ChangeType, NewProductInput, PlaceReorderInput, ReorderStatus};

async fn seed_supplier(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO suppliers (supplier_name, contact_name) VALUES ('Acme', 'Ann') RETURNING supplier_id",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn seed_product(pool: &PgPool, stock: i32) -> i64 {
    let supplier_id = seed_supplier(pool).await;
    let created = ProductService::new(pool.clone())
        .add_product(NewProductInput {
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            price: Decimal::new(250, 2),
            stock_quantity: stock,
            reorder_level: 5,
            supplier_id,
        })
        .await
        .unwrap();
    created.product.id
}

async fn count(pool: &PgPool, sql: &str, id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn stock_of(pool: &PgPool, product_id: i64) -> i32 {
    InventoryService::new(pool.clone())
        .get_product(product_id)
        .await
        .unwrap()
        .stock_quantity
}

fn app(pool: PgPool) -> axum::Router {
    let config = Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 2,
            min_connections: 0,
            acquire_timeout_secs: 5,
        },
        dashboard: DashboardConfig::default(),
    };
    create_app(AppState {
        db: pool,
        config: Arc::new(config),
    })
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_product_creation_records_initial_stock(pool: PgPool) {
    let product_id = seed_product(&pool, 12).await;

    let inventory = InventoryService::new(pool.clone());
    let shipments = inventory.list_shipments().await.unwrap();
    let entries = inventory.list_stock_entries().await.unwrap();

    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments[0].product_id, product_id);
    assert_eq!(shipments[0].quantity_received, 12);
    assert_eq!(shipments[0].reorder_id, None);

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].change_type, ChangeType::Restock);
    assert_eq!(entries[0].change_quantity, 12);
    assert_eq!(stock_of(&pool, product_id).await, 12);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_missing_supplier_writes_nothing(pool: PgPool) {
    let result = ProductService::new(pool.clone())
        .add_product(NewProductInput {
            name: "Orphan".to_string(),
            category: "Tools".to_string(),
            price: Decimal::new(100, 2),
            stock_quantity: 3,
            reorder_level: 1,
            supplier_id: 999,
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    let counts = InventoryService::new(pool.clone()).table_counts().await.unwrap();
    assert_eq!(counts.products, 0);
    assert_eq!(counts.shipments, 0);
    assert_eq!(counts.stock_entries, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_received_reorder_balances_ledger(pool: PgPool) {
    let product_id = seed_product(&pool, 3).await;
    let reorders = ReorderService::new(pool.clone());

    let placed = reorders
        .place_reorder(PlaceReorderInput {
            product_id: Some(product_id),
            quantity: 20,
        })
        .await
        .unwrap();
    assert_eq!(placed.reorder.status, ReorderStatus::Ordered);

    let today: chrono::NaiveDate = sqlx::query_scalar("SELECT CURRENT_DATE")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(placed.reorder.reorder_date, today);

    let received = reorders.mark_received(placed.reorder.id).await.unwrap();
    assert_eq!(received.new_stock_quantity, 23);
    assert_eq!(received.shipment.reorder_id, Some(placed.reorder.id));
    assert_eq!(received.stock_entry.entry_date, today);
    assert_eq!(stock_of(&pool, product_id).await, 23);
    assert!(reorders.list_open_reorders().await.unwrap().is_empty());

    let inventory = InventoryService::new(pool.clone());
    let audit = audit_reorders(
        &inventory.list_reorders().await.unwrap(),
        &inventory.list_shipments().await.unwrap(),
        &inventory.list_stock_entries().await.unwrap(),
    );
    assert_eq!(audit.reorders_checked, 1);
    assert!(audit.is_consistent(), "violations: {:?}", audit.violations);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_pending_reorder_can_be_received(pool: PgPool) {
    let product_id = seed_product(&pool, 0).await;
    let reorder_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reorders (product_id, reorder_quantity, status) VALUES ($1, 7, 'Pending') RETURNING reorder_id",
    )
    .bind(product_id)
    .fetch_one(&pool)
    .await
    .unwrap();

    let received = ReorderService::new(pool.clone())
        .mark_received(reorder_id)
        .await
        .unwrap();

    assert_eq!(received.reorder.status, ReorderStatus::Received);
    assert_eq!(stock_of(&pool, product_id).await, 7);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_second_receipt_is_conflict(pool: PgPool) {
    let product_id = seed_product(&pool, 3).await;
    let placed = ReorderService::new(pool.clone())
        .place_reorder(PlaceReorderInput {
            product_id: Some(product_id),
            quantity: 10,
        })
        .await
        .unwrap();
    let uri = format!("/api/v1/reorders/{}/receive", placed.reorder.id);
    let receive = || {
        Request::builder()
            .method("POST")
            .uri(uri.as_str())
            .body(Body::empty())
            .unwrap()
    };

    let first = app(pool.clone()).oneshot(receive()).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app(pool.clone()).oneshot(receive()).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let id = placed.reorder.id;
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM shipments WHERE reorder_id = $1", id).await, 1);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM stock_entries WHERE reorder_id = $1", id).await, 1);
    assert_eq!(stock_of(&pool, product_id).await, 13);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn test_failed_insert_rolls_back_receipt(pool: PgPool) {
    let product_id = seed_product(&pool, 4).await;
    let placed = ReorderService::new(pool.clone())
        .place_reorder(PlaceReorderInput {
            product_id: Some(product_id),
            quantity: 10,
        })
        .await
        .unwrap();
    let id = placed.reorder.id;

    // Occupies the one shipment slot the unique index allows per reorder
    sqlx::query(
        r#"
        INSERT INTO shipments (product_id, supplier_id, quantity_received, shipment_date, reorder_id)
        SELECT product_id, supplier_id, 10, CURRENT_DATE, $1 FROM products WHERE product_id = $2
        "#,
    )
    .bind(id)
    .bind(product_id)
    .execute(&pool)
    .await
    .unwrap();

    let result = ReorderService::new(pool.clone()).mark_received(id).await;
    assert!(matches!(result, Err(AppError::Integrity { .. })));

    let status: String = sqlx::query_scalar("SELECT status FROM reorders WHERE reorder_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(status, "Ordered");
    assert_eq!(stock_of(&pool, product_id).await, 4);
    assert_eq!(count(&pool, "SELECT COUNT(*) FROM stock_entries WHERE reorder_id = $1", id).await, 0);
}
