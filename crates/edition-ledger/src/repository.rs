//! The narrow interface between edition logic and the system of record.
//!
//! Reconciliation never reaches for a global connection; it is handed something that
//! implements [`LineItemRepository`]. The in-process implementation is
//! [`LineItemClient`](crate::clients::LineItemClient); a hosted database would be a
//! second implementation of the same trait.

use crate::error::RepositoryError;
use crate::model::{
    EditionUpdate, LineItem, LineItemId, LineItemStatus, NewLineItem, OrderId, ProductId,
};
use async_trait::async_trait;

#[async_trait]
pub trait LineItemRepository: Send + Sync {
    /// A single line item, or `None` when the id is unknown.
    async fn line_item(&self, id: LineItemId) -> Result<Option<LineItem>, RepositoryError>;

    /// Every line item of a product, in any status and in no particular order.
    async fn product_items(&self, product_id: &ProductId)
        -> Result<Vec<LineItem>, RepositoryError>;

    /// Every line item of an order, in any status.
    async fn order_items(&self, order_id: &OrderId) -> Result<Vec<LineItem>, RepositoryError>;

    /// Every product that has at least one line item.
    async fn product_ids(&self) -> Result<Vec<ProductId>, RepositoryError>;

    async fn insert(&self, item: NewLineItem) -> Result<LineItemId, RepositoryError>;

    /// Moves an item into `status`. Moving to `Removed` also clears its numbering.
    async fn set_status(
        &self,
        id: LineItemId,
        status: LineItemStatus,
    ) -> Result<LineItem, RepositoryError>;

    /// Writes edition numbers in order, stopping at the first failure.
    ///
    /// Returns the number of rows written. A failure part way reports
    /// [`RepositoryError::Aborted`] with the count that went through.
    async fn write_editions(&self, updates: &[EditionUpdate]) -> Result<usize, RepositoryError>;

    /// Active line items of a product in edition order (`created_at`, then id).
    async fn active_items(&self, product_id: &ProductId) -> Result<Vec<LineItem>, RepositoryError> {
        let mut items: Vec<LineItem> = self
            .product_items(product_id)
            .await?
            .into_iter()
            .filter(LineItem::is_active)
            .collect();
        items.sort_by(LineItem::edition_order);
        Ok(items)
    }
}
