//! Product models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{validate_category, validate_non_negative_price, validate_product_name};

/// A stocked product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    /// Never negative
    pub stock_quantity: i32,
    pub reorder_level: i32,
    pub supplier_id: i64,
}

impl Product {
    /// Strictly under the reorder level (dashboard metric)
    pub fn is_below_reorder_level(&self) -> bool {
        self.stock_quantity < self.reorder_level
    }

    /// At or under the reorder level ("Products Needing Reorder" table)
    pub fn needs_reorder(&self) -> bool {
        self.stock_quantity <= self.reorder_level
    }
}

/// Product entry for form selectors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductOption {
    pub id: i64,
    pub name: String,
}

/// Input for the "Add new Product" task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProductInput {
    #[validate(custom = "validate_product_name")]
    pub name: String,
    #[validate(custom = "validate_category")]
    pub category: String,
    #[validate(custom = "validate_non_negative_price")]
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock quantity cannot be negative"))]
    pub stock_quantity: i32,
    #[validate(range(min = 0, message = "Reorder level cannot be negative"))]
    pub reorder_level: i32,
    pub supplier_id: i64,
}

/// Row of the "Products with Supplier and Stock" table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductStock {
    pub product_name: String,
    pub supplier_name: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
}

/// Row of the "Products Needing Reorder" table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReorderNeed {
    pub product_name: String,
    pub stock_quantity: i32,
    pub reorder_level: i32,
}

impl From<&Product> for ReorderNeed {
    fn from(product: &Product) -> Self {
        Self {
            product_name: product.name.clone(),
            stock_quantity: product.stock_quantity,
            reorder_level: product.reorder_level,
        }
    }
}
