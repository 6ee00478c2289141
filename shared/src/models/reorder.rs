//! Reorder models and the reorder state machine
//!
//! A reorder is created `Ordered` and moves exactly once to `Received`.
//! `Pending` only appears on rows imported from older data; it counts as open
//! and may be received like `Ordered`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;

use crate::error::DomainError;

/// Lifecycle status of a reorder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReorderStatus {
    Pending,
    Ordered,
    Received,
}

impl ReorderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReorderStatus::Pending => "Pending",
            ReorderStatus::Ordered => "Ordered",
            ReorderStatus::Received => "Received",
        }
    }

    /// Open reorders block the "below reorder level" metric for their product
    pub fn is_open(&self) -> bool {
        matches!(self, ReorderStatus::Pending | ReorderStatus::Ordered)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReorderStatus::Received)
    }

    pub fn can_transition_to(&self, next: ReorderStatus) -> bool {
        matches!(
            (self, next),
            (ReorderStatus::Pending, ReorderStatus::Ordered)
                | (ReorderStatus::Pending, ReorderStatus::Received)
                | (ReorderStatus::Ordered, ReorderStatus::Received)
        )
    }
}

impl std::fmt::Display for ReorderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReorderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ReorderStatus::Pending),
            "Ordered" => Ok(ReorderStatus::Ordered),
            "Received" => Ok(ReorderStatus::Received),
            other => Err(DomainError::UnknownVariant {
                kind: "reorder status",
                value: other.to_string(),
            }),
        }
    }
}

/// A request to replenish a product's stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reorder {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub reorder_date: NaiveDate,
    pub status: ReorderStatus,
}

impl Reorder {
    /// Move to `next`, rejecting anything the state machine does not allow
    pub fn transition(&mut self, next: ReorderStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    pub fn receive(&mut self) -> Result<(), DomainError> {
        self.transition(ReorderStatus::Received)
    }
}

/// Open reorder with its product name, for the "Receive Reorder" selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenReorder {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub reorder_date: NaiveDate,
    pub status: ReorderStatus,
}

impl OpenReorder {
    pub fn label(&self) -> String {
        format!("ID {} - {}", self.id, self.product_name)
    }
}

/// Input for the "Place Reorder" task
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceReorderInput {
    #[validate(required(message = "Please select a product"))]
    pub product_id: Option<i64>,
    #[validate(range(min = 1, message = "Reorder quantity must be greater than 0"))]
    pub quantity: i32,
}
