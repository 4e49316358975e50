//! # Edition Assigner
//!
//! Recomputes the contiguous numbering `1..=N` of one product's active line items,
//! ordered by purchase time (ties by id), and writes only the rows that differ.
//!
//! The run is a read followed by a batched write; it is not atomic across rows. A
//! failed write aborts the rest of the batch and leaves the product partially
//! renumbered. That is acceptable because every run recomputes from scratch: the next
//! successful run, whether a retry or the next trigger for the product, converges.
//!
//! A store outage surfaces as [`EditionError::Repository`] so callers can retry it;
//! only writes the store took and then refused surface as
//! [`EditionError::WriteAborted`].

use super::plan::plan_editions;
use crate::error::{EditionError, RepositoryError};
use crate::model::{ProductId, Reconciliation};
use crate::repository::LineItemRepository;
use tracing::{debug, info, instrument, warn};

/// Runs the assigner for one product.
///
/// An unknown product, or one without active items, is a successful no-op with
/// `total == 0`.
#[instrument(skip(repo, product_id), fields(product_id = %product_id))]
pub async fn assign_editions<R>(
    repo: &R,
    product_id: &ProductId,
) -> Result<Reconciliation, EditionError>
where
    R: LineItemRepository + ?Sized,
{
    let items = repo.active_items(product_id).await?;
    let plan = plan_editions(&items);

    if plan.updates.is_empty() {
        debug!(total = plan.total, "Numbering already contiguous");
        return Ok(Reconciliation {
            product_id: product_id.clone(),
            total: plan.total,
            writes: 0,
        });
    }

    let planned = plan.updates.len();
    match repo.write_editions(&plan.updates).await {
        Ok(writes) => {
            info!(total = plan.total, writes, "Editions assigned");
            Ok(Reconciliation {
                product_id: product_id.clone(),
                total: plan.total,
                writes,
            })
        }
        Err(RepositoryError::Unavailable(reason)) => {
            warn!(planned, %reason, "Store unavailable, no edition writes applied");
            Err(RepositoryError::Unavailable(reason).into())
        }
        Err(e) => {
            let (applied, source) = match e {
                RepositoryError::Aborted { applied, source } => (applied, *source),
                other => (0, other),
            };
            warn!(applied, planned, error = %source, "Edition writes aborted");
            Err(EditionError::WriteAborted {
                product_id: product_id.clone(),
                applied,
                planned,
                source,
            })
        }
    }
}

/// Runs the assigner for every product, stopping at the first failure.
#[instrument(skip(repo))]
pub async fn assign_all<R>(repo: &R) -> Result<Vec<Reconciliation>, EditionError>
where
    R: LineItemRepository + ?Sized,
{
    let products = repo.product_ids().await?;
    let mut runs = Vec::with_capacity(products.len());
    for product_id in &products {
        runs.push(assign_editions(repo, product_id).await?);
    }
    info!(products = runs.len(), "Reconciled all products");
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::LineItemClient;
    use crate::model::{LineItem, LineItemId, LineItemPatch, OrderId};
    use chrono::{TimeZone, Utc};
    use table_actor::mock::MockTable;
    use table_actor::{PatchReport, TableError};

    fn item(id: u32, minute: u32, number: Option<u32>) -> LineItem {
        let mut item = LineItem::new(
            LineItemId(id),
            OrderId::new(format!("order_{}", id)),
            ProductId::new("print"),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
        );
        item.edition_number = number;
        item.edition_total = number.map(|_| 3);
        item
    }

    #[tokio::test]
    async fn test_only_differing_rows_are_written() {
        let mut mock = MockTable::<LineItem>::new();
        mock.expect_scan().return_ok(vec![
            item(1, 0, Some(1)),
            item(2, 1, None),
            item(3, 2, Some(3)),
        ]);
        mock.expect_patch_many().return_ok(PatchReport {
            applied: 1,
            changed: 1,
        });
        let repo = LineItemClient::new(mock.client());

        let run = assign_editions(&repo, &ProductId::new("print")).await.unwrap();
        assert_eq!(run.total, 3);
        assert_eq!(run.writes, 1);

        let batches = mock.take_patch_batches();
        assert_eq!(
            batches,
            vec![vec![(
                LineItemId(2),
                LineItemPatch::Edition {
                    number: 2,
                    total: 3
                }
            )]]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_contiguous_product_performs_no_write() {
        let mut mock = MockTable::<LineItem>::new();
        mock.expect_scan().return_ok(vec![
            item(1, 0, Some(1)),
            item(2, 1, Some(2)),
            item(3, 2, Some(3)),
        ]);
        let repo = LineItemClient::new(mock.client());

        let run = assign_editions(&repo, &ProductId::new("print")).await.unwrap();
        assert_eq!((run.total, run.writes), (3, 0));
        assert!(mock.take_patch_batches().is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_aborted_batch_reports_progress() {
        let mut mock = MockTable::<LineItem>::new();
        mock.expect_scan()
            .return_ok(vec![item(1, 0, None), item(2, 1, None), item(3, 2, None)]);
        mock.expect_patch_many().return_err(TableError::Aborted {
            applied: 1,
            source: Box::new(TableError::NotFound("line_item_2".into())),
        });
        let repo = LineItemClient::new(mock.client());

        let err = assign_editions(&repo, &ProductId::new("print"))
            .await
            .unwrap_err();
        match err {
            EditionError::WriteAborted {
                applied,
                planned,
                source,
                ..
            } => {
                assert_eq!((applied, planned), (1, 3));
                assert!(matches!(source, RepositoryError::NotFound(_)));
            }
            other => panic!("expected WriteAborted, got {:?}", other),
        }
        mock.verify();
    }

    #[tokio::test]
    async fn test_outage_during_write_is_not_an_abort() {
        let mut mock = MockTable::<LineItem>::new();
        mock.expect_scan()
            .return_ok(vec![item(1, 0, None), item(2, 1, None)]);
        mock.expect_patch_many().return_err(TableError::ActorClosed);
        let repo = LineItemClient::new(mock.client());

        let err = assign_editions(&repo, &ProductId::new("print"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EditionError::Repository(RepositoryError::Unavailable(_))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_unavailable_store_surfaces_error() {
        let mut mock = MockTable::<LineItem>::new();
        mock.expect_scan().return_err(TableError::ActorClosed);
        let repo = LineItemClient::new(mock.client());

        let err = assign_editions(&repo, &ProductId::new("print"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EditionError::Repository(RepositoryError::Unavailable(_))
        ));
    }
}
