//! Reorder workflow tests
//!
//! Tests for placing and receiving reorders including:
//! - Reorder quantities must be positive
//! - Receipt plans keep stock, shipments and restock entries balanced
//! - Received is terminal

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use validator::Validate;

use shared::{
    audit_reorders, ChangeType, DomainError, PlaceReorderInput, Product, ReceiptPlan, Reorder,
    ReorderStatus, Shipment, StockEntry,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn product(stock: i32) -> Product {
    Product {
        id: 7,
        name: "Widget".to_string(),
        category: "Tools".to_string(),
        price: Decimal::new(250, 2),
        stock_quantity: stock,
        reorder_level: 5,
        supplier_id: 3,
    }
}

/// In-memory ledger that applies receipt plans the way the service does
#[derive(Default)]
struct Ledger {
    products: Vec<Product>,
    reorders: Vec<Reorder>,
    shipments: Vec<Shipment>,
    entries: Vec<StockEntry>,
}

impl Ledger {
    fn place(&mut self, product_id: i64, quantity: i32, status: ReorderStatus) -> i64 {
        let id = self.reorders.len() as i64 + 1;
        self.reorders.push(Reorder {
            id,
            product_id,
            quantity,
            reorder_date: date(2024, 1, 1),
            status,
        });
        id
    }

    fn receive(&mut self, reorder_id: i64) -> Result<(), DomainError> {
        let reorder = self.reorders.iter().find(|r| r.id == reorder_id).unwrap().clone();
        let product = self.products.iter().find(|p| p.id == reorder.product_id).unwrap().clone();

        let plan = ReceiptPlan::build(&reorder, &product, date(2024, 2, 1))?;

        for r in self.reorders.iter_mut().filter(|r| r.id == plan.reorder_id) {
            r.status = plan.new_status;
        }
        for p in self.products.iter_mut().filter(|p| p.id == plan.product_id) {
            p.stock_quantity = plan.new_stock_quantity;
        }
        self.shipments.push(Shipment {
            id: self.shipments.len() as i64 + 1,
            product_id: plan.shipment.product_id,
            supplier_id: plan.shipment.supplier_id,
            quantity_received: plan.shipment.quantity_received,
            shipment_date: plan.shipment.shipment_date,
            reorder_id: plan.shipment.reorder_id,
        });
        self.entries.push(StockEntry {
            id: self.entries.len() as i64 + 1,
            product_id: plan.stock_entry.product_id,
            change_quantity: plan.stock_entry.change_quantity,
            change_type: plan.stock_entry.change_type,
            entry_date: plan.stock_entry.entry_date,
            reorder_id: plan.stock_entry.reorder_id,
        });
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_receiving_ordered_reorder() {
        let mut ledger = Ledger {
            products: vec![product(10)],
            ..Default::default()
        };
        let id = ledger.place(7, 50, ReorderStatus::Ordered);

        ledger.receive(id).unwrap();

        assert_eq!(ledger.products[0].stock_quantity, 60);
        assert_eq!(ledger.reorders[0].status, ReorderStatus::Received);
        assert_eq!(ledger.shipments[0].quantity_received, 50);
        assert_eq!(ledger.shipments[0].supplier_id, 3);
        assert_eq!(ledger.entries[0].change_type, ChangeType::Restock);
        assert_eq!(ledger.entries[0].change_quantity, 50);
        assert!(audit_reorders(&ledger.reorders, &ledger.shipments, &ledger.entries).is_consistent());
    }

    #[test]
    fn test_pending_reorder_can_be_received() {
        let mut ledger = Ledger {
            products: vec![product(0)],
            ..Default::default()
        };
        let id = ledger.place(7, 5, ReorderStatus::Pending);

        assert!(ledger.receive(id).is_ok());
        assert_eq!(ledger.products[0].stock_quantity, 5);
    }

    #[test]
    fn test_second_receipt_rejected_without_writes() {
        let mut ledger = Ledger {
            products: vec![product(10)],
            ..Default::default()
        };
        let id = ledger.place(7, 50, ReorderStatus::Ordered);
        ledger.receive(id).unwrap();

        let err = ledger.receive(id).unwrap_err();

        assert!(matches!(err, DomainError::InvalidTransition { .. }));
        assert_eq!(ledger.products[0].stock_quantity, 60);
        assert_eq!(ledger.shipments.len(), 1);
        assert_eq!(ledger.entries.len(), 1);
    }

    #[test]
    fn test_overflowing_stock_rejected() {
        let mut ledger = Ledger {
            products: vec![product(i32::MAX - 1)],
            ..Default::default()
        };
        let id = ledger.place(7, 5, ReorderStatus::Ordered);

        assert!(matches!(
            ledger.receive(id),
            Err(DomainError::StockOutOfRange { .. })
        ));
        assert!(ledger.shipments.is_empty());
    }

    #[test]
    fn test_missing_product_selection_rejected() {
        let input = PlaceReorderInput {
            product_id: None,
            quantity: 5,
        };
        assert!(input.validate().is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Zero and negative reorder quantities never validate
    #[test]
    fn prop_non_positive_quantity_rejected(quantity in i32::MIN..=0) {
        let input = PlaceReorderInput { product_id: Some(1), quantity };
        prop_assert!(input.validate().is_err());
    }

    #[test]
    fn prop_positive_quantity_accepted(quantity in 1i32..=i32::MAX) {
        let input = PlaceReorderInput { product_id: Some(1), quantity };
        prop_assert!(input.validate().is_ok());
    }

    /// Stock grows by exactly the received quantities and the ledger audit
    /// stays clean after any sequence of placements and receipts
    #[test]
    fn prop_receipts_keep_ledger_balanced(
        start in 0i32..1000,
        orders in prop::collection::vec((1i32..500, any::<bool>(), any::<bool>()), 1..15),
    ) {
        let mut ledger = Ledger { products: vec![product(start)], ..Default::default() };
        let mut expected = start;

        for (quantity, pending, receive) in orders {
            let status = if pending { ReorderStatus::Pending } else { ReorderStatus::Ordered };
            let id = ledger.place(7, quantity, status);
            if receive {
                ledger.receive(id).unwrap();
                expected += quantity;
            }
        }

        prop_assert_eq!(ledger.products[0].stock_quantity, expected);
        prop_assert_eq!(ledger.shipments.len(), ledger.entries.len());

        let audit = audit_reorders(&ledger.reorders, &ledger.shipments, &ledger.entries);
        prop_assert!(audit.is_consistent(), "violations: {:?}", audit.violations);
    }
}
