//! Supplier models

use serde::{Deserialize, Serialize};

/// A supplier of products. Read-only in this system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Supplier entry for form selectors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplierOption {
    pub id: i64,
    pub name: String,
}

impl From<&Supplier> for SupplierOption {
    fn from(supplier: &Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name.clone(),
        }
    }
}

/// Row of the "Suppliers Contact Details" table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SupplierContact {
    pub supplier_name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}
