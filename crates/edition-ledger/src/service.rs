//! # Edition Service
//!
//! The trigger surface. Order ingestion, cancellations and refunds, operator actions
//! and scheduled sweeps all enter through [`EditionService`], which delegates to the
//! stateless functions in [`crate::edition`].
//!
//! The service owns nothing but a handle to the repository, so it is cheap to clone
//! and safe to call from many tasks at once. Concurrent calls on the same product are
//! not serialized here; any later run for the product converges the numbering.

use crate::edition;
use crate::error::EditionError;
use crate::model::{
    AuditReport, IncomingOrder, LineItemId, OrderId, OrderIngestion, OrderRevocation,
    ProductAudit, ProductId, Reconciliation, ReinstateOutcome, RevokeOutcome,
};
use crate::repository::LineItemRepository;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct EditionService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for EditionService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> EditionService<R>
where
    R: LineItemRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Records one line item per purchased unit, then numbers every product the
    /// order touched.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn on_order_ingested(
        &self,
        order: IncomingOrder,
    ) -> Result<OrderIngestion, EditionError> {
        let units = order.units();
        info!(units = units.len(), "Ingesting order");

        let mut line_items = Vec::with_capacity(units.len());
        let mut products = BTreeSet::new();
        for unit in units {
            products.insert(unit.product_id.clone());
            line_items.push(self.repo.insert(unit).await?);
        }

        let mut reconciled = Vec::with_capacity(products.len());
        for product_id in &products {
            reconciled.push(edition::assign_editions(self.repository(), product_id).await?);
        }

        Ok(OrderIngestion {
            order_id: order.order_id,
            line_items,
            reconciled,
        })
    }

    /// Cancellation or full refund of an order.
    pub async fn on_order_cancelled(
        &self,
        order_id: &OrderId,
    ) -> Result<OrderRevocation, EditionError> {
        edition::revoke_order(self.repository(), order_id).await
    }

    /// Partial refund or manual removal of a single unit.
    ///
    /// On error the unit may already be removed, in which case a retry reports
    /// `AlreadyRemoved`. Follow a failure with
    /// [`reconcile_product`](Self::reconcile_product) for the unit's product.
    pub async fn revoke_line_item(&self, id: LineItemId) -> Result<RevokeOutcome, EditionError> {
        edition::revoke_line_item(self.repository(), id).await
    }

    pub async fn reinstate_line_item(
        &self,
        id: LineItemId,
    ) -> Result<ReinstateOutcome, EditionError> {
        edition::reinstate_line_item(self.repository(), id).await
    }

    pub async fn reconcile_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Reconciliation, EditionError> {
        edition::assign_editions(self.repository(), product_id).await
    }

    /// Sweep over every product; the scheduled backstop for missed triggers.
    pub async fn reconcile_all(&self) -> Result<Vec<Reconciliation>, EditionError> {
        edition::assign_all(self.repository()).await
    }

    pub async fn audit_product(&self, product_id: &ProductId) -> Result<ProductAudit, EditionError> {
        edition::audit_product(self.repository(), product_id).await
    }

    pub async fn audit_all(&self) -> Result<AuditReport, EditionError> {
        edition::audit_all(self.repository()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::LineItemClient;
    use crate::error::RepositoryError;
    use crate::model::{LineItem, LineItemPatch, OrderLine};
    use chrono::{TimeZone, Utc};
    use table_actor::mock::MockTable;
    use table_actor::{PatchReport, TableError};

    fn service(mock: &MockTable<LineItem>) -> EditionService<LineItemClient> {
        EditionService::new(Arc::new(LineItemClient::new(mock.client())))
    }

    #[tokio::test]
    async fn test_ingestion_numbers_each_product_once() {
        let placed_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let order = IncomingOrder {
            order_id: OrderId::new("1001"),
            placed_at,
            lines: vec![
                OrderLine {
                    product_id: ProductId::new("tide"),
                    quantity: 2,
                },
                OrderLine {
                    product_id: ProductId::new("dunes"),
                    quantity: 1,
                },
            ],
        };
        let stored = |id: u32, product: &str| {
            LineItem::new(LineItemId(id), OrderId::new("1001"), ProductId::new(product), placed_at)
        };

        let mut mock = MockTable::<LineItem>::new();
        mock.expect_insert().return_ok(LineItemId(1));
        mock.expect_insert().return_ok(LineItemId(2));
        mock.expect_insert().return_ok(LineItemId(3));
        // products are reconciled in id order: dunes, then tide
        mock.expect_scan().return_ok(vec![stored(3, "dunes")]);
        mock.expect_patch_many().return_ok(PatchReport {
            applied: 1,
            changed: 1,
        });
        mock.expect_scan()
            .return_ok(vec![stored(2, "tide"), stored(1, "tide")]);
        mock.expect_patch_many().return_ok(PatchReport {
            applied: 2,
            changed: 2,
        });

        let ingestion = service(&mock).on_order_ingested(order).await.unwrap();
        assert_eq!(
            ingestion.line_items,
            vec![LineItemId(1), LineItemId(2), LineItemId(3)]
        );
        let totals: Vec<(String, u32)> = ingestion
            .reconciled
            .iter()
            .map(|r| (r.product_id.0.clone(), r.total))
            .collect();
        assert_eq!(totals, vec![("dunes".into(), 1), ("tide".into(), 2)]);

        let batches = mock.take_patch_batches();
        assert_eq!(
            batches[1],
            vec![
                (
                    LineItemId(1),
                    LineItemPatch::Edition {
                        number: 1,
                        total: 2
                    }
                ),
                (
                    LineItemId(2),
                    LineItemPatch::Edition {
                        number: 2,
                        total: 2
                    }
                ),
            ]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_cancelling_unknown_order_is_empty() {
        let mut mock = MockTable::<LineItem>::new();
        mock.expect_scan().return_ok(vec![]);

        let revocation = service(&mock)
            .on_order_cancelled(&OrderId::new("missing"))
            .await
            .unwrap();
        assert!(revocation.revoked.is_empty());
        assert!(revocation.reconciled.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_failed_insert_stops_ingestion() {
        let mut mock = MockTable::<LineItem>::new();
        mock.expect_insert().return_err(TableError::ActorClosed);

        let order = IncomingOrder {
            order_id: OrderId::new("1002"),
            placed_at: Utc::now(),
            lines: vec![OrderLine {
                product_id: ProductId::new("tide"),
                quantity: 3,
            }],
        };
        let err = service(&mock).on_order_ingested(order).await.unwrap_err();
        assert!(matches!(
            err,
            EditionError::Repository(RepositoryError::Unavailable(_))
        ));
        mock.verify();
    }
}
