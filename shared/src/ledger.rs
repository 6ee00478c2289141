//! Ledger consistency audit
//!
//! Every received reorder must have exactly one shipment and one restock
//! entry linked to it, both for the reorder's quantity. Open reorders must
//! have none.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{ChangeType, Reorder, Shipment, StockEntry};

/// A broken link between a reorder and its ledger rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerViolation {
    MissingShipment { reorder_id: i64 },
    DuplicateShipments { reorder_id: i64, count: usize },
    ShipmentQuantityMismatch { reorder_id: i64, expected: i32, actual: i32 },
    MissingRestock { reorder_id: i64 },
    DuplicateRestocks { reorder_id: i64, count: usize },
    RestockQuantityMismatch { reorder_id: i64, expected: i32, actual: i32 },
    ReceivedRowsOnOpenReorder { reorder_id: i64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAudit {
    pub reorders_checked: usize,
    pub violations: Vec<LedgerViolation>,
}

impl LedgerAudit {
    pub fn is_consistent(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn audit_reorders(
    reorders: &[Reorder],
    shipments: &[Shipment],
    entries: &[StockEntry],
) -> LedgerAudit {
    let mut shipments_by_reorder: HashMap<i64, Vec<&Shipment>> = HashMap::new();
    for shipment in shipments {
        if let Some(reorder_id) = shipment.reorder_id {
            shipments_by_reorder.entry(reorder_id).or_default().push(shipment);
        }
    }

    let mut restocks_by_reorder: HashMap<i64, Vec<&StockEntry>> = HashMap::new();
    for entry in entries.iter().filter(|e| e.change_type == ChangeType::Restock) {
        if let Some(reorder_id) = entry.reorder_id {
            restocks_by_reorder.entry(reorder_id).or_default().push(entry);
        }
    }

    let mut violations = Vec::new();
    for reorder in reorders {
        let linked_shipments = shipments_by_reorder.get(&reorder.id).map_or(&[][..], Vec::as_slice);
        let linked_restocks = restocks_by_reorder.get(&reorder.id).map_or(&[][..], Vec::as_slice);

        if !reorder.status.is_terminal() {
            if !linked_shipments.is_empty() || !linked_restocks.is_empty() {
                violations.push(LedgerViolation::ReceivedRowsOnOpenReorder {
                    reorder_id: reorder.id,
                });
            }
            continue;
        }

        match linked_shipments {
            [] => violations.push(LedgerViolation::MissingShipment {
                reorder_id: reorder.id,
            }),
            [shipment] if shipment.quantity_received != reorder.quantity => {
                violations.push(LedgerViolation::ShipmentQuantityMismatch {
                    reorder_id: reorder.id,
                    expected: reorder.quantity,
                    actual: shipment.quantity_received,
                })
            }
            [_] => {}
            many => violations.push(LedgerViolation::DuplicateShipments {
                reorder_id: reorder.id,
                count: many.len(),
            }),
        }

        match linked_restocks {
            [] => violations.push(LedgerViolation::MissingRestock {
                reorder_id: reorder.id,
            }),
            [entry] if entry.change_quantity != reorder.quantity => {
                violations.push(LedgerViolation::RestockQuantityMismatch {
                    reorder_id: reorder.id,
                    expected: reorder.quantity,
                    actual: entry.change_quantity,
                })
            }
            [_] => {}
            many => violations.push(LedgerViolation::DuplicateRestocks {
                reorder_id: reorder.id,
                count: many.len(),
            }),
        }
    }

    LedgerAudit {
        reorders_checked: reorders.len(),
        violations,
    }
}
