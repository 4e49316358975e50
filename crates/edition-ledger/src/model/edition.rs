//! Results reported by reconciliation, revocation and verification.

use crate::model::{LineItemId, OrderId, ProductId};
use serde::{Deserialize, Serialize};

/// A single computed numbering write for one active line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionUpdate {
    pub line_item_id: LineItemId,
    pub edition_number: u32,
    pub edition_total: u32,
}

/// Outcome of one successful assigner run for a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub product_id: ProductId,
    /// Active items after the run (the final edition total `N`).
    pub total: u32,
    /// Rows the run had to write.
    pub writes: usize,
}

impl Reconciliation {
    pub fn empty(product_id: ProductId) -> Self {
        Self {
            product_id,
            total: 0,
            writes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RevokeOutcome {
    Revoked(Reconciliation),
    AlreadyRemoved,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReinstateOutcome {
    Reinstated(Reconciliation),
    AlreadyActive,
    NotFound,
}

/// Outcome of cancelling or refunding a whole order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRevocation {
    pub order_id: OrderId,
    pub revoked: Vec<LineItemId>,
    /// One entry per product touched by the order.
    pub reconciled: Vec<Reconciliation>,
}

/// Outcome of ingesting an order's line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIngestion {
    pub order_id: OrderId,
    pub line_items: Vec<LineItemId>,
    pub reconciled: Vec<Reconciliation>,
}

/// One way a stored line item deviates from the expected numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drift {
    MissingNumber {
        line_item_id: LineItemId,
        expected: u32,
    },
    WrongNumber {
        line_item_id: LineItemId,
        expected: u32,
        stored: u32,
    },
    WrongTotal {
        line_item_id: LineItemId,
        expected: u32,
        stored: Option<u32>,
    },
    NumberedWhileRemoved {
        line_item_id: LineItemId,
        stored: u32,
    },
}

/// Verification result for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAudit {
    pub product_id: ProductId,
    pub active: u32,
    pub drift: Vec<Drift>,
}

impl ProductAudit {
    pub fn is_consistent(&self) -> bool {
        self.drift.is_empty()
    }
}

/// Verification result across products; only drifted products are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub checked: usize,
    pub drifted: Vec<ProductAudit>,
}

impl AuditReport {
    pub fn is_consistent(&self) -> bool {
        self.drifted.is_empty()
    }
}
