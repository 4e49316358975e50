use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// Type-safe identifier for line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineItemId(pub u32);

impl From<u32> for LineItemId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for LineItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line_item_{}", self.0)
    }
}

/// Identifier of a (limited-edition) product.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the order a line item was purchased in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a line item is eligible for an edition number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemStatus {
    Active,
    Removed,
}

/// One purchased unit of a product within an order.
///
/// # Table Actor
/// This struct implements the [`TableRecord`](table_actor::TableRecord) trait,
/// partitioned by [`ProductId`], so a
/// [`TableActor`](table_actor::TableActor) can serve it as the line-item table.
///
/// See [`crate::line_item_store`] for the patch rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub status: LineItemStatus,
    pub edition_number: Option<u32>,
    pub edition_total: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates an active, unnumbered line item.
    pub fn new(
        id: LineItemId,
        order_id: OrderId,
        product_id: ProductId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            order_id,
            product_id,
            status: LineItemStatus::Active,
            edition_number: None,
            edition_total: None,
            created_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LineItemStatus::Active
    }

    /// Order in which edition numbers are handed out: earliest purchase first,
    /// ties broken by id.
    pub fn edition_order(a: &LineItem, b: &LineItem) -> Ordering {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.id.cmp(&b.id))
    }
}

/// Payload for ingesting a new line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLineItem {
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub created_at: DateTime<Utc>,
}

/// A single mutation of a stored line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemPatch {
    /// Store an edition number and the product's edition total.
    Edition { number: u32, total: u32 },
    /// Void the item and clear its numbering.
    Remove,
    /// Make a removed item eligible for numbering again.
    Restore,
}
