//! Write plans for the multi-row operations
//!
//! A plan holds every row a receipt or product creation will write. The
//! backend computes the plan first, then applies all of it inside one
//! transaction, so the ledger rows always match the stock change.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::DomainError;
use crate::models::{ChangeType, NewProductInput, Product, Reorder, ReorderStatus};

/// Shipment row to insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewShipment {
    pub product_id: i64,
    pub supplier_id: i64,
    pub quantity_received: i32,
    pub shipment_date: NaiveDate,
    pub reorder_id: Option<i64>,
}

/// Stock entry row to insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStockEntry {
    pub product_id: i64,
    pub change_quantity: i32,
    pub change_type: ChangeType,
    pub entry_date: NaiveDate,
    pub reorder_id: Option<i64>,
}

/// Everything marking a reorder as received writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptPlan {
    pub reorder_id: i64,
    pub product_id: i64,
    pub new_status: ReorderStatus,
    pub new_stock_quantity: i32,
    pub shipment: NewShipment,
    pub stock_entry: NewStockEntry,
}

impl ReceiptPlan {
    pub fn build(
        reorder: &Reorder,
        product: &Product,
        received_on: NaiveDate,
    ) -> Result<Self, DomainError> {
        if reorder.product_id != product.id {
            return Err(DomainError::ProductMismatch {
                reorder_id: reorder.id,
                expected: reorder.product_id,
                actual: product.id,
            });
        }

        let mut next = reorder.clone();
        next.receive()?;

        let new_stock_quantity = product
            .stock_quantity
            .checked_add(reorder.quantity)
            .filter(|q| *q >= 0)
            .ok_or(DomainError::StockOutOfRange {
                product_id: product.id,
            })?;

        Ok(Self {
            reorder_id: reorder.id,
            product_id: product.id,
            new_status: next.status,
            new_stock_quantity,
            shipment: NewShipment {
                product_id: product.id,
                supplier_id: product.supplier_id,
                quantity_received: reorder.quantity,
                shipment_date: received_on,
                reorder_id: Some(reorder.id),
            },
            stock_entry: NewStockEntry {
                product_id: product.id,
                change_quantity: reorder.quantity,
                change_type: ChangeType::Restock,
                entry_date: received_on,
                reorder_id: Some(reorder.id),
            },
        })
    }
}

/// Initial stock recorded when a product is created.
///
/// The product id only exists after the insert, so the rows are produced
/// from it afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitialStockPlan {
    pub supplier_id: i64,
    pub quantity: i32,
    pub received_on: NaiveDate,
}

impl InitialStockPlan {
    pub fn for_input(input: &NewProductInput, received_on: NaiveDate) -> Result<Self, DomainError> {
        if input.stock_quantity < 0 {
            return Err(DomainError::StockOutOfRange { product_id: 0 });
        }
        Ok(Self {
            supplier_id: input.supplier_id,
            quantity: input.stock_quantity,
            received_on,
        })
    }

    pub fn shipment(&self, product_id: i64) -> NewShipment {
        NewShipment {
            product_id,
            supplier_id: self.supplier_id,
            quantity_received: self.quantity,
            shipment_date: self.received_on,
            reorder_id: None,
        }
    }

    pub fn stock_entry(&self, product_id: i64) -> NewStockEntry {
        NewStockEntry {
            product_id,
            change_quantity: self.quantity,
            change_type: ChangeType::Restock,
            entry_date: self.received_on,
            reorder_id: None,
        }
    }
}
