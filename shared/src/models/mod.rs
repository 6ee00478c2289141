//! Domain models for the inventory dashboard

mod history;
mod product;
mod reorder;
mod shipment;
mod stock;
mod supplier;

pub use history::*;
pub use product::*;
pub use reorder::*;
pub use shipment::*;
pub use stock::*;
pub use supplier::*;
