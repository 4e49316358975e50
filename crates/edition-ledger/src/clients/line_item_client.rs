//! # Line Item Client
//!
//! [`LineItemRepository`] backed by the in-process line-item table. It wraps a
//! `TableClient<LineItem>` and translates repository calls into table requests.
use crate::error::RepositoryError;
use crate::model::{
    EditionUpdate, LineItem, LineItemId, LineItemPatch, LineItemStatus, NewLineItem, OrderId,
    ProductId,
};
use crate::repository::LineItemRepository;
use async_trait::async_trait;
use table_actor::{TableAccess, TableClient, TableError};
use tracing::{debug, instrument};

/// Client for interacting with the line-item table actor.
#[derive(Clone)]
pub struct LineItemClient {
    inner: TableClient<LineItem>,
}

impl LineItemClient {
    pub fn new(inner: TableClient<LineItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<LineItem> for LineItemClient {
    type Error = RepositoryError;

    fn inner(&self) -> &TableClient<LineItem> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        RepositoryError::from(e)
    }
}

#[async_trait]
impl LineItemRepository for LineItemClient {
    async fn line_item(&self, id: LineItemId) -> Result<Option<LineItem>, RepositoryError> {
        self.fetch(id).await
    }

    async fn product_items(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<LineItem>, RepositoryError> {
        self.scan_partition(product_id.clone()).await
    }

    #[instrument(skip(self))]
    async fn order_items(&self, order_id: &OrderId) -> Result<Vec<LineItem>, RepositoryError> {
        debug!("Scanning table for order");
        let items = self.inner.scan_all().await?;
        Ok(items
            .into_iter()
            .filter(|item| &item.order_id == order_id)
            .collect())
    }

    #[instrument(skip(self))]
    async fn product_ids(&self) -> Result<Vec<ProductId>, RepositoryError> {
        debug!("Sending request");
        let mut ids = self.inner.partitions().await?;
        ids.sort();
        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn insert(&self, item: NewLineItem) -> Result<LineItemId, RepositoryError> {
        debug!("Sending request");
        Ok(self.inner.insert(item).await?)
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        id: LineItemId,
        status: LineItemStatus,
    ) -> Result<LineItem, RepositoryError> {
        let patch = match status {
            LineItemStatus::Active => LineItemPatch::Restore,
            LineItemStatus::Removed => LineItemPatch::Remove,
        };
        debug!(?patch, "Sending request");
        Ok(self.inner.patch(id, patch).await?)
    }

    #[instrument(skip(self, updates), fields(count = updates.len()))]
    async fn write_editions(&self, updates: &[EditionUpdate]) -> Result<usize, RepositoryError> {
        if updates.is_empty() {
            return Ok(0);
        }
        debug!("Sending request");
        let patches = updates
            .iter()
            .map(|u| {
                (
                    u.line_item_id,
                    LineItemPatch::Edition {
                        number: u.edition_number,
                        total: u.edition_total,
                    },
                )
            })
            .collect();
        let report = self.inner.patch_many(patches).await?;
        Ok(report.applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;
    use chrono::{TimeZone, Utc};
    use table_actor::mock::{
        create_mock_table, expect_get, expect_patch_many, expect_scan, MockTable,
    };

    fn item(id: u32, product: &str, minute: u32) -> LineItem {
        LineItem::new(
            LineItemId(id),
            OrderId::new(format!("order_{}", id)),
            ProductId::new(product),
            Utc.with_ymd_and_hms(2024, 5, 1, 12, minute, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_active_items_sorted_and_filtered() {
        let (table, mut receiver) = create_mock_table::<LineItem>(10);
        let client = LineItemClient::new(table);

        let task = tokio::spawn(async move {
            client.active_items(&ProductId::new("print")).await
        });

        let (partition, responder) = expect_scan(&mut receiver)
            .await
            .expect("Expected Scan request");
        assert_eq!(partition, Some(ProductId::new("print")));

        let mut removed = item(4, "print", 0);
        removed.status = LineItemStatus::Removed;
        responder
            .send(Ok(vec![
                item(3, "print", 5),
                removed,
                item(2, "print", 5),
                item(1, "print", 9),
            ]))
            .unwrap();

        let items = task.await.unwrap().unwrap();
        let ids: Vec<u32> = items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_line_item_fetches_by_id() {
        let (table, mut receiver) = create_mock_table::<LineItem>(10);
        let client = LineItemClient::new(table);

        let task = tokio::spawn(async move { client.line_item(LineItemId(5)).await });

        let (id, responder) = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        assert_eq!(id, LineItemId(5));
        responder.send(Ok(Some(item(5, "print", 0)))).unwrap();

        let fetched = task.await.unwrap().unwrap().expect("Line item not found");
        assert_eq!(fetched.product_id, ProductId::new("print"));
    }

    #[tokio::test]
    async fn test_write_editions_sends_one_batch() {
        let (table, mut receiver) = create_mock_table::<LineItem>(10);
        let client = LineItemClient::new(table);

        let updates = vec![
            EditionUpdate {
                line_item_id: LineItemId(7),
                edition_number: 1,
                edition_total: 2,
            },
            EditionUpdate {
                line_item_id: LineItemId(9),
                edition_number: 2,
                edition_total: 2,
            },
        ];
        let task = tokio::spawn(async move { client.write_editions(&updates).await });

        let (patches, responder) = expect_patch_many(&mut receiver)
            .await
            .expect("Expected PatchMany request");
        assert_eq!(
            patches,
            vec![
                (
                    LineItemId(7),
                    LineItemPatch::Edition {
                        number: 1,
                        total: 2
                    }
                ),
                (
                    LineItemId(9),
                    LineItemPatch::Edition {
                        number: 2,
                        total: 2
                    }
                ),
            ]
        );
        responder
            .send(Ok(table_actor::PatchReport {
                applied: 2,
                changed: 2,
            }))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 2);
    }

    #[tokio::test]
    async fn test_empty_write_skips_the_table() {
        let mock = MockTable::<LineItem>::new();
        let client = LineItemClient::new(mock.client());

        assert_eq!(client.write_editions(&[]).await.unwrap(), 0);
        mock.verify();
        assert!(mock.take_patch_batches().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_maps_to_repository_error() {
        let mut mock = MockTable::<LineItem>::new();
        mock.expect_partitions().return_err(TableError::ActorClosed);
        let client = LineItemClient::new(mock.client());

        let err = client.product_ids().await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
        mock.verify();
    }
}
