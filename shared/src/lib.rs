//! Shared types and logic for the inventory dashboard
//!
//! This crate contains the domain models, metric computation, reorder state
//! machine and write plans shared by the backend and the WASM module.

pub mod error;
pub mod ledger;
pub mod metrics;
pub mod models;
pub mod plan;
pub mod types;
pub mod validation;

pub use error::*;
pub use ledger::*;
pub use metrics::*;
pub use models::*;
pub use plan::*;
pub use types::*;
pub use validation::*;
