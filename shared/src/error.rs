//! Domain errors raised by the pure inventory logic

use thiserror::Error;

use crate::models::ReorderStatus;

/// Errors produced before anything touches the data store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Reorder cannot move from {from} to {to}")]
    InvalidTransition {
        from: ReorderStatus,
        to: ReorderStatus,
    },

    #[error("Reorder {reorder_id} is for product {expected}, not product {actual}")]
    ProductMismatch {
        reorder_id: i64,
        expected: i64,
        actual: i64,
    },

    #[error("Stock quantity for product {product_id} would leave the valid range")]
    StockOutOfRange { product_id: i64 },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}
