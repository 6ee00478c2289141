//! Raw data access for the inventory tables
//!
//! Every read the dashboard, task and diagnostics services need goes
//! through here, along with the row inserts shared by the transactional
//! writes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection, PgPool};

use crate::error::{AppError, AppResult};
use shared::{
    DomainError, NewShipment, NewStockEntry, Product, Reorder, Shipment, StockEntry, Supplier,
    TableCounts,
};

/// Read access to the inventory tables
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Database row for a product
#[derive(Debug, FromRow)]
pub(crate) struct ProductRow {
    product_id: i64,
    product_name: String,
    category: String,
    price: Decimal,
    stock_quantity: i32,
    reorder_level: i32,
    supplier_id: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.product_id,
            name: row.product_name,
            category: row.category,
            price: row.price,
            stock_quantity: row.stock_quantity,
            reorder_level: row.reorder_level,
            supplier_id: row.supplier_id,
        }
    }
}

/// Database row for a supplier
#[derive(Debug, FromRow)]
struct SupplierRow {
    supplier_id: i64,
    supplier_name: String,
    contact_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Supplier {
            id: row.supplier_id,
            name: row.supplier_name,
            contact_name: row.contact_name,
            email: row.email,
            phone: row.phone,
        }
    }
}

/// Database row for a stock entry
#[derive(Debug, FromRow)]
pub(crate) struct StockEntryRow {
    entry_id: i64,
    product_id: i64,
    change_quantity: i32,
    change_type: String,
    entry_date: NaiveDate,
    reorder_id: Option<i64>,
}

impl TryFrom<StockEntryRow> for StockEntry {
    type Error = DomainError;

    fn try_from(row: StockEntryRow) -> Result<Self, Self::Error> {
        Ok(StockEntry {
            id: row.entry_id,
            product_id: row.product_id,
            change_quantity: row.change_quantity,
            change_type: row.change_type.parse()?,
            entry_date: row.entry_date,
            reorder_id: row.reorder_id,
        })
    }
}

/// Database row for a reorder
#[derive(Debug, FromRow)]
pub(crate) struct ReorderRow {
    reorder_id: i64,
    product_id: i64,
    reorder_quantity: i32,
    reorder_date: NaiveDate,
    status: String,
}

impl TryFrom<ReorderRow> for Reorder {
    type Error = DomainError;

    fn try_from(row: ReorderRow) -> Result<Self, Self::Error> {
        Ok(Reorder {
            id: row.reorder_id,
            product_id: row.product_id,
            quantity: row.reorder_quantity,
            reorder_date: row.reorder_date,
            status: row.status.parse()?,
        })
    }
}

/// Database row for a shipment
#[derive(Debug, FromRow)]
pub(crate) struct ShipmentRow {
    shipment_id: i64,
    product_id: i64,
    supplier_id: i64,
    quantity_received: i32,
    shipment_date: NaiveDate,
    reorder_id: Option<i64>,
}

impl From<ShipmentRow> for Shipment {
    fn from(row: ShipmentRow) -> Self {
        Shipment {
            id: row.shipment_id,
            product_id: row.product_id,
            supplier_id: row.supplier_id,
            quantity_received: row.quantity_received,
            shipment_date: row.shipment_date,
            reorder_id: row.reorder_id,
        }
    }
}

pub(crate) const PRODUCT_COLUMNS: &str =
    "product_id, product_name, category, price, stock_quantity, reorder_level, supplier_id";

pub(crate) const REORDER_COLUMNS: &str =
    "reorder_id, product_id, reorder_quantity, reorder_date, status";

/// Convert rows whose text columns must parse into domain enums
pub(crate) fn convert_rows<R, T>(rows: Vec<R>) -> AppResult<Vec<T>>
where
    T: TryFrom<R, Error = DomainError>,
{
    rows.into_iter()
        .map(|row| T::try_from(row).map_err(AppError::from))
        .collect()
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn count_suppliers(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    /// Suppliers ordered by name
    pub async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        let rows = sqlx::query_as::<_, SupplierRow>(
            r#"
            SELECT supplier_id, supplier_name, contact_name, email, phone
            FROM suppliers
            ORDER BY supplier_name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    pub async fn supplier_exists(&self, supplier_id: i64) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM suppliers WHERE supplier_id = $1)",
        )
        .bind(supplier_id)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }

    /// Products ordered by name
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products ORDER BY product_name ASC",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn get_product(&self, product_id: i64) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE product_id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    pub async fn product_exists(&self, product_id: i64) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM products WHERE product_id = $1)",
        )
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;
        Ok(exists)
    }

    /// Full stock ledger, oldest first
    pub async fn list_stock_entries(&self) -> AppResult<Vec<StockEntry>> {
        let rows = sqlx::query_as::<_, StockEntryRow>(
            r#"
            SELECT entry_id, product_id, change_quantity, change_type, entry_date, reorder_id
            FROM stock_entries
            ORDER BY entry_date ASC, entry_id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        convert_rows(rows)
    }

    pub async fn list_reorders(&self) -> AppResult<Vec<Reorder>> {
        let rows = sqlx::query_as::<_, ReorderRow>(&format!(
            "SELECT {} FROM reorders ORDER BY reorder_id ASC",
            REORDER_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        convert_rows(rows)
    }

    pub async fn list_shipments(&self) -> AppResult<Vec<Shipment>> {
        let rows = sqlx::query_as::<_, ShipmentRow>(
            r#"
            SELECT shipment_id, product_id, supplier_id, quantity_received, shipment_date, reorder_id
            FROM shipments
            ORDER BY shipment_id ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Shipment::from).collect())
    }

    pub async fn table_counts(&self) -> AppResult<TableCounts> {
        let (suppliers, products, shipments, stock_entries, reorders) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
                r#"
                SELECT (SELECT COUNT(*) FROM suppliers),
                       (SELECT COUNT(*) FROM products),
                       (SELECT COUNT(*) FROM shipments),
                       (SELECT COUNT(*) FROM stock_entries),
                       (SELECT COUNT(*) FROM reorders)
                "#,
            )
            .fetch_one(&self.db)
            .await?;

        Ok(TableCounts {
            suppliers,
            products,
            shipments,
            stock_entries,
            reorders,
        })
    }
}

// ============================================================================
// Row inserts used inside transactions
// ============================================================================

/// Today's date by the database clock, the same clock the column defaults use
pub(crate) async fn current_date(conn: &mut PgConnection) -> Result<NaiveDate, sqlx::Error> {
    sqlx::query_scalar::<_, NaiveDate>("SELECT CURRENT_DATE")
        .fetch_one(&mut *conn)
        .await
}

pub(crate) async fn insert_shipment(
    conn: &mut PgConnection,
    shipment: &NewShipment,
) -> Result<Shipment, sqlx::Error> {
    let row = sqlx::query_as::<_, ShipmentRow>(
        r#"
        INSERT INTO shipments (product_id, supplier_id, quantity_received, shipment_date, reorder_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING shipment_id, product_id, supplier_id, quantity_received, shipment_date, reorder_id
        "#,
    )
    .bind(shipment.product_id)
    .bind(shipment.supplier_id)
    .bind(shipment.quantity_received)
    .bind(shipment.shipment_date)
    .bind(shipment.reorder_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(row.into())
}

pub(crate) async fn insert_stock_entry(
    conn: &mut PgConnection,
    entry: &NewStockEntry,
) -> Result<StockEntry, sqlx::Error> {
    let row = sqlx::query_as::<_, (i64,)>(
        r#"
        INSERT INTO stock_entries (product_id, change_quantity, change_type, entry_date, reorder_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING entry_id
        "#,
    )
    .bind(entry.product_id)
    .bind(entry.change_quantity)
    .bind(entry.change_type.as_str())
    .bind(entry.entry_date)
    .bind(entry.reorder_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(StockEntry {
        id: row.0,
        product_id: entry.product_id,
        change_quantity: entry.change_quantity,
        change_type: entry.change_type,
        entry_date: entry.entry_date,
        reorder_id: entry.reorder_id,
    })
}
