//! Validation utilities for inventory input
//!
//! Field rules are attached to the input types with `validator` derives; the
//! custom rules and the error flattening used by the HTTP layer live here.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::{ValidationError, ValidationErrors};

// ============================================================================
// Custom field validators
// ============================================================================

/// Product names must contain something other than whitespace
pub fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(error("blank", "Please enter the Product Name"));
    }
    Ok(())
}

/// Categories must contain something other than whitespace
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        return Err(error("blank", "Please select a category"));
    }
    Ok(())
}

/// Exclusive upper bound of a stored price, `NUMERIC(10, 2)`
const MAX_PRICE_EXCLUSIVE: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Prices are stored as `NUMERIC(10, 2)`: non-negative, under 10^8, at most
/// two decimal places (trailing zeros do not count)
pub fn validate_non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(error("negative", "Price cannot be negative"));
    }
    if *price >= MAX_PRICE_EXCLUSIVE {
        return Err(error("too_large", "Price must be less than 100000000"));
    }
    if price.normalize().scale() > 2 {
        return Err(error("precision", "Price can have at most 2 decimal places"));
    }
    Ok(())
}

/// Reorder quantities are positive integers
pub fn is_valid_reorder_quantity(quantity: i64) -> bool {
    quantity > 0 && quantity <= i64::from(i32::MAX)
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// ============================================================================
// Error flattening
// ============================================================================

/// A single user-facing validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Pick the first failing field (alphabetical, so the answer is stable)
pub fn first_violation(errors: &ValidationErrors) -> Option<FieldViolation> {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    fields.into_iter().find_map(|field| {
        field_errors.get(field).and_then(|errs| errs.first()).map(|err| FieldViolation {
            field: field.to_string(),
            message: err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value for {}", field)),
        })
    })
}
