//! Business logic services for the Inventory Dashboard

pub mod dashboard;
pub mod diagnostics;
pub mod export;
pub mod inventory;
pub mod product;
pub mod reorder;

pub use dashboard::DashboardService;
pub use diagnostics::DiagnosticsService;
pub use export::export_to_csv;
pub use inventory::InventoryService;
pub use product::ProductService;
pub use reorder::ReorderService;
