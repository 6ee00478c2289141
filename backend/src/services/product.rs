//! Product tasks: form options, product creation and inventory history

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::inventory::{
    convert_rows, current_date, insert_shipment, insert_stock_entry, InventoryService, ProductRow,
    PRODUCT_COLUMNS,
};
use shared::{
    DomainError, HistoryRecord, InitialStockPlan, NewProductInput, Product, ProductOption,
    Shipment, StockEntry, SupplierOption,
};

/// Product service for the "Add new Product" and "Product History" tasks
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// A product together with the ledger rows written for its starting stock
#[derive(Debug, Clone, serde::Serialize)]
pub struct CreatedProduct {
    pub product: Product,
    pub shipment: Shipment,
    pub stock_entry: StockEntry,
}

/// Row from the product_inventory_history view
#[derive(Debug, FromRow)]
struct HistoryRow {
    product_id: i64,
    record_type: String,
    record_date: NaiveDate,
    quantity: i32,
    detail: Option<String>,
}

impl TryFrom<HistoryRow> for HistoryRecord {
    type Error = DomainError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(HistoryRecord {
            product_id: row.product_id,
            record_type: row.record_type.parse()?,
            record_date: row.record_date,
            quantity: row.quantity,
            detail: row.detail,
        })
    }
}

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Distinct categories, ascending
    pub async fn list_categories(&self) -> AppResult<Vec<String>> {
        let categories = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM products ORDER BY category ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(categories)
    }

    pub async fn list_supplier_options(&self) -> AppResult<Vec<SupplierOption>> {
        let suppliers = InventoryService::new(self.db.clone()).list_suppliers().await?;
        Ok(suppliers.iter().map(SupplierOption::from).collect())
    }

    pub async fn list_product_options(&self) -> AppResult<Vec<ProductOption>> {
        let rows = sqlx::query_as::<_, (i64, String)>(
            "SELECT product_id, product_name FROM products ORDER BY product_name ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| ProductOption { id, name })
            .collect())
    }

    /// Create a product with its initial shipment and restock entry.
    ///
    /// All three rows are written in one transaction.
    pub async fn add_product(&self, input: NewProductInput) -> AppResult<CreatedProduct> {
        const OPERATION: &str = "product creation";

        input.validate()?;

        let inventory = InventoryService::new(self.db.clone());
        if !inventory.supplier_exists(input.supplier_id).await? {
            return Err(AppError::NotFound("Supplier".to_string()));
        }

        let mut tx = self.db.begin().await?;

        let today = current_date(&mut *tx).await?;
        let plan = InitialStockPlan::for_input(&input, today)?;

        let product: Product = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (product_name, category, price, stock_quantity, reorder_level, supplier_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(input.name.trim())
        .bind(&input.category)
        .bind(input.price)
        .bind(input.stock_quantity)
        .bind(input.reorder_level)
        .bind(input.supplier_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::integrity(OPERATION, e))?
        .into();

        let shipment = insert_shipment(&mut *tx, &plan.shipment(product.id))
            .await
            .map_err(|e| AppError::integrity(OPERATION, e))?;

        let stock_entry = insert_stock_entry(&mut *tx, &plan.stock_entry(product.id))
            .await
            .map_err(|e| AppError::integrity(OPERATION, e))?;

        tx.commit()
            .await
            .map_err(|e| AppError::integrity(OPERATION, e))?;

        tracing::info!(
            product_id = product.id,
            initial_stock = plan.quantity,
            "Product {} added",
            product.name
        );

        Ok(CreatedProduct {
            product,
            shipment,
            stock_entry,
        })
    }

    /// Inventory history for a product, newest first
    pub async fn get_history(&self, product_id: i64) -> AppResult<Vec<HistoryRecord>> {
        if !InventoryService::new(self.db.clone())
            .product_exists(product_id)
            .await?
        {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT product_id, record_type, record_date, quantity, detail
            FROM product_inventory_history
            WHERE product_id = $1
            ORDER BY record_date DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        convert_rows(rows)
    }
}
