//! Reorder workflow: placing reorders and marking them as received

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::inventory::{
    convert_rows, current_date, insert_shipment, insert_stock_entry, InventoryService, ProductRow, ReorderRow,
    PRODUCT_COLUMNS, REORDER_COLUMNS,
};
use shared::{
    DomainError, OpenReorder, PlaceReorderInput, Product, ReceiptPlan, Reorder, ReorderStatus,
    Shipment, StockEntry,
};

/// Reorder service for the "Place Reorder" and "Receive Reorder" tasks
#[derive(Clone)]
pub struct ReorderService {
    db: PgPool,
}

/// A newly placed reorder and the product it is for
#[derive(Debug, Clone, Serialize)]
pub struct PlacedReorder {
    pub reorder: Reorder,
    pub product_name: String,
}

/// Everything written when a reorder is received
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedReorder {
    pub reorder: Reorder,
    pub product_id: i64,
    pub new_stock_quantity: i32,
    pub shipment: Shipment,
    pub stock_entry: StockEntry,
}

/// Row for the open reorder selector
#[derive(Debug, FromRow)]
struct OpenReorderRow {
    reorder_id: i64,
    product_id: i64,
    product_name: String,
    reorder_quantity: i32,
    reorder_date: NaiveDate,
    status: String,
}

impl TryFrom<OpenReorderRow> for OpenReorder {
    type Error = DomainError;

    fn try_from(row: OpenReorderRow) -> Result<Self, Self::Error> {
        Ok(OpenReorder {
            id: row.reorder_id,
            product_id: row.product_id,
            product_name: row.product_name,
            quantity: row.reorder_quantity,
            reorder_date: row.reorder_date,
            status: row.status.parse()?,
        })
    }
}

impl ReorderService {
    /// Create a new ReorderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Place a reorder in the `Ordered` state, dated by the database.
    ///
    /// Invalid input is rejected before anything is written.
    pub async fn place_reorder(&self, input: PlaceReorderInput) -> AppResult<PlacedReorder> {
        input.validate()?;
        let product_id = input
            .product_id
            .ok_or_else(|| AppError::validation("product_id", "Please select a product"))?;

        let product = InventoryService::new(self.db.clone())
            .get_product(product_id)
            .await?;

        let row = sqlx::query_as::<_, ReorderRow>(&format!(
            r#"
            INSERT INTO reorders (product_id, reorder_quantity, status)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            REORDER_COLUMNS
        ))
        .bind(product.id)
        .bind(input.quantity)
        .bind(ReorderStatus::Ordered.as_str())
        .fetch_one(&self.db)
        .await?;

        let reorder = Reorder::try_from(row)?;

        tracing::info!(
            reorder_id = reorder.id,
            product_id = product.id,
            quantity = reorder.quantity,
            "Reorder placed"
        );

        Ok(PlacedReorder {
            reorder,
            product_name: product.name,
        })
    }

    /// Reorders that can still be received
    pub async fn list_open_reorders(&self) -> AppResult<Vec<OpenReorder>> {
        let rows = sqlx::query_as::<_, OpenReorderRow>(
            r#"
            SELECT r.reorder_id, r.product_id, p.product_name, r.reorder_quantity,
                   r.reorder_date, r.status
            FROM reorders r
            JOIN products p ON p.product_id = r.product_id
            WHERE r.status IN ('Pending', 'Ordered')
            ORDER BY r.reorder_id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        convert_rows(rows)
    }

    /// Mark a reorder as received.
    ///
    /// The reorder and product rows are locked, the receipt plan is computed,
    /// and the status change, stock increase, shipment and restock entry are
    /// written in one transaction. Any failure after the first write rolls
    /// everything back.
    pub async fn mark_received(&self, reorder_id: i64) -> AppResult<ReceivedReorder> {
        const OPERATION: &str = "reorder receipt";

        let mut tx = self.db.begin().await?;

        let reorder: Reorder = sqlx::query_as::<_, ReorderRow>(&format!(
            "SELECT {} FROM reorders WHERE reorder_id = $1 FOR UPDATE",
            REORDER_COLUMNS
        ))
        .bind(reorder_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Reorder".to_string()))?
        .try_into()?;

        let product: Product = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE product_id = $1 FOR UPDATE",
            PRODUCT_COLUMNS
        ))
        .bind(reorder.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?
        .into();

        let today = current_date(&mut *tx).await?;

        // Nothing has been written yet; an error here drops the transaction
        let plan = ReceiptPlan::build(&reorder, &product, today)?;

        let updated = sqlx::query(
            "UPDATE reorders SET status = $1 WHERE reorder_id = $2 AND status <> $1",
        )
        .bind(plan.new_status.as_str())
        .bind(plan.reorder_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::integrity(OPERATION, e))?;

        if updated.rows_affected() != 1 {
            return Err(AppError::integrity(
                OPERATION,
                format!("reorder {} changed while it was being received", plan.reorder_id),
            ));
        }

        sqlx::query("UPDATE products SET stock_quantity = $1 WHERE product_id = $2")
            .bind(plan.new_stock_quantity)
            .bind(plan.product_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::integrity(OPERATION, e))?;

        let shipment = insert_shipment(&mut *tx, &plan.shipment)
            .await
            .map_err(|e| AppError::integrity(OPERATION, e))?;

        let stock_entry = insert_stock_entry(&mut *tx, &plan.stock_entry)
            .await
            .map_err(|e| AppError::integrity(OPERATION, e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::integrity(OPERATION, e))?;

        tracing::info!(
            reorder_id = plan.reorder_id,
            product_id = plan.product_id,
            new_stock_quantity = plan.new_stock_quantity,
            "Reorder received"
        );

        Ok(ReceivedReorder {
            reorder: Reorder {
                status: plan.new_status,
                ..reorder
            },
            product_id: plan.product_id,
            new_stock_quantity: plan.new_stock_quantity,
            shipment,
            stock_entry,
        })
    }
}
