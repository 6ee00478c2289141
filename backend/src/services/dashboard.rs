//! Dashboard service for the "Basic Information" screen
//!
//! Metrics are recomputed from raw rows. Each collection is fetched on its
//! own; a failed fetch zeroes the metrics that depend on it and adds a
//! warning instead of failing the whole screen.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::inventory::InventoryService;
use shared::{
    compute_basic_metrics, BasicMetrics, MetricInputs, MetricTile, ProductStock, ReorderNeed,
    SupplierContact,
};

/// Dashboard service
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// Metrics with their display tiles and any fetch warnings
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub metrics: BasicMetrics,
    pub tiles: Vec<MetricTile>,
    pub window_days: i64,
    pub warnings: Vec<String>,
}

/// The three detail tables shown under the metrics
#[derive(Debug, Serialize)]
pub struct DashboardTables {
    pub suppliers_contact_details: Vec<SupplierContact>,
    pub products_with_supplier_and_stock: Vec<ProductStock>,
    pub products_needing_reorder: Vec<ReorderNeed>,
}

/// Addressable detail table
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardTable {
    SupplierContacts,
    ProductStock,
    NeedingReorder,
}

impl DashboardTable {
    pub fn file_name(&self) -> &'static str {
        match self {
            DashboardTable::SupplierContacts => "supplier_contacts.csv",
            DashboardTable::ProductStock => "product_stock.csv",
            DashboardTable::NeedingReorder => "products_needing_reorder.csv",
        }
    }
}

/// Keep a fetched collection, or record why it is missing
fn keep<T>(what: &str, result: AppResult<T>, warnings: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("Failed to load {} for dashboard metrics: {}", what, err);
            warnings.push(format!("Could not load {}: {}", what, err));
            None
        }
    }
}

impl DashboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Compute the six basic metrics over a trailing window
    pub async fn get_metrics(&self, window_days: i64) -> DashboardMetrics {
        let inventory = InventoryService::new(self.db.clone());

        let (suppliers, products, entries, reorders) = tokio::join!(
            inventory.count_suppliers(),
            inventory.list_products(),
            inventory.list_stock_entries(),
            inventory.list_reorders(),
        );

        let mut warnings = Vec::new();
        let supplier_count = keep("suppliers", suppliers, &mut warnings);
        let products = keep("products", products, &mut warnings);
        let entries = keep("stock entries", entries, &mut warnings);
        let reorders = keep("reorders", reorders, &mut warnings);

        let metrics = compute_basic_metrics(
            &MetricInputs {
                supplier_count,
                products: products.as_deref(),
                entries: entries.as_deref(),
                reorders: reorders.as_deref(),
            },
            window_days,
        );

        DashboardMetrics {
            tiles: metrics.tiles(),
            metrics,
            window_days,
            warnings,
        }
    }

    pub async fn get_tables(&self) -> AppResult<DashboardTables> {
        Ok(DashboardTables {
            suppliers_contact_details: self.supplier_contacts().await?,
            products_with_supplier_and_stock: self.product_stock().await?,
            products_needing_reorder: self.products_needing_reorder().await?,
        })
    }

    pub async fn supplier_contacts(&self) -> AppResult<Vec<SupplierContact>> {
        let suppliers = InventoryService::new(self.db.clone()).list_suppliers().await?;

        Ok(suppliers
            .into_iter()
            .map(|s| SupplierContact {
                supplier_name: s.name,
                contact_name: s.contact_name,
                email: s.email,
                phone: s.phone,
            })
            .collect())
    }

    /// Products joined with their supplier, ordered by product name
    pub async fn product_stock(&self) -> AppResult<Vec<ProductStock>> {
        let rows = sqlx::query_as::<_, (String, String, i32, i32)>(
            r#"
            SELECT p.product_name, s.supplier_name, p.stock_quantity, p.reorder_level
            FROM products p
            JOIN suppliers s ON p.supplier_id = s.supplier_id
            ORDER BY p.product_name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProductStock {
                product_name: r.0,
                supplier_name: r.1,
                stock_quantity: r.2,
                reorder_level: r.3,
            })
            .collect())
    }

    /// Products at or under their reorder level
    pub async fn products_needing_reorder(&self) -> AppResult<Vec<ReorderNeed>> {
        let products = InventoryService::new(self.db.clone()).list_products().await?;

        Ok(products
            .iter()
            .filter(|p| p.needs_reorder())
            .map(ReorderNeed::from)
            .collect())
    }
}
