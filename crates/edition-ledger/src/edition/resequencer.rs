//! # Revocation & Resequencing
//!
//! Moves line items into or out of `active` and immediately reruns the assigner for
//! the affected product so the remaining numbers close (or open) the gap.
//!
//! Numbers always follow purchase time: revoking a later buyer never renumbers an
//! earlier one, revoking an earlier buyer shifts every later buyer down by one, and
//! reinstating an earlier buyer shifts them back up.

use super::assigner::assign_editions;
use crate::error::EditionError;
use crate::model::{
    LineItemId, LineItemStatus, OrderId, OrderRevocation, ProductId, ReinstateOutcome,
    RevokeOutcome,
};
use crate::repository::LineItemRepository;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Revokes one line item: marks it removed, clears its number, and resequences its
/// product.
///
/// Revoking an unknown or already-removed item changes nothing. The removal is
/// stored before the resequence runs, so if this returns an error (for example
/// [`EditionError::WriteAborted`] with its `product_id`) a retry reports
/// `AlreadyRemoved`; finish the job with
/// [`assign_editions`](super::assign_editions) for that product instead.
#[instrument(skip(repo))]
pub async fn revoke_line_item<R>(
    repo: &R,
    line_item_id: LineItemId,
) -> Result<RevokeOutcome, EditionError>
where
    R: LineItemRepository + ?Sized,
{
    let Some(item) = repo.line_item(line_item_id).await? else {
        debug!("Unknown line item, nothing to revoke");
        return Ok(RevokeOutcome::NotFound);
    };
    if !item.is_active() {
        debug!("Line item already removed");
        return Ok(RevokeOutcome::AlreadyRemoved);
    }

    repo.set_status(line_item_id, LineItemStatus::Removed)
        .await?;
    info!(product_id = %item.product_id, edition_number = ?item.edition_number, "Line item revoked");

    let run = assign_editions(repo, &item.product_id).await?;
    Ok(RevokeOutcome::Revoked(run))
}

/// Returns a removed line item to `active` and resequences its product.
///
/// Reinstating an unknown or already-active item changes nothing.
#[instrument(skip(repo))]
pub async fn reinstate_line_item<R>(
    repo: &R,
    line_item_id: LineItemId,
) -> Result<ReinstateOutcome, EditionError>
where
    R: LineItemRepository + ?Sized,
{
    let Some(item) = repo.line_item(line_item_id).await? else {
        debug!("Unknown line item, nothing to reinstate");
        return Ok(ReinstateOutcome::NotFound);
    };
    if item.is_active() {
        debug!("Line item already active");
        return Ok(ReinstateOutcome::AlreadyActive);
    }

    repo.set_status(line_item_id, LineItemStatus::Active)
        .await?;
    info!(product_id = %item.product_id, "Line item reinstated");

    let run = assign_editions(repo, &item.product_id).await?;
    Ok(ReinstateOutcome::Reinstated(run))
}

/// Revokes every active line item of an order, then resequences each product the
/// order touched once.
///
/// Every product the order ever touched is resequenced, including ones whose items
/// were already removed, so retrying a cancellation that failed part way converges.
/// An unknown order yields an empty result.
#[instrument(skip(repo))]
pub async fn revoke_order<R>(repo: &R, order_id: &OrderId) -> Result<OrderRevocation, EditionError>
where
    R: LineItemRepository + ?Sized,
{
    let items = repo.order_items(order_id).await?;

    let mut revoked = Vec::new();
    let mut products: BTreeSet<ProductId> = BTreeSet::new();
    for item in &items {
        products.insert(item.product_id.clone());
        if item.is_active() {
            repo.set_status(item.id, LineItemStatus::Removed).await?;
            revoked.push(item.id);
        }
    }
    revoked.sort();

    let mut reconciled = Vec::with_capacity(products.len());
    for product_id in &products {
        reconciled.push(assign_editions(repo, product_id).await?);
    }

    info!(revoked = revoked.len(), products = reconciled.len(), "Order revoked");
    Ok(OrderRevocation {
        order_id: order_id.clone(),
        revoked,
        reconciled,
    })
}
