//! # TableAccess Trait
//!
//! Shared plumbing for domain-specific wrappers around a [`TableClient`]. A wrapper
//! supplies its inner client and an error mapping, and inherits traced `fetch` and
//! `scan_partition` calls returning its own error type.
use crate::{TableClient, TableError, TableRecord};
use async_trait::async_trait;

/// Trait for table wrappers to inherit standard read operations.
///
/// # Example
///
/// ```rust
/// use table_actor::{TableAccess, TableClient, TableError, TableRecord};
///
/// #[derive(Clone, Debug)] struct Row { id: u32, group: u8 }
/// #[derive(Debug)] struct RowInsert;
/// #[derive(Debug)] struct RowPatch;
/// #[derive(Debug, thiserror::Error)] #[error("row error")] struct RowError;
///
/// impl TableRecord for Row {
///     type Id = u32; type Partition = u8; type Insert = RowInsert;
///     type Patch = RowPatch; type Error = RowError;
///     fn from_insert(id: u32, _: RowInsert) -> Result<Self, RowError> { Ok(Self { id, group: 0 }) }
///     fn partition(&self) -> &u8 { &self.group }
///     fn apply(&mut self, _: &RowPatch) -> Result<bool, RowError> { Ok(false) }
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("store: {0}")]
/// struct StoreError(String);
///
/// struct Rows { inner: TableClient<Row> }
///
/// impl TableAccess<Row> for Rows {
///     type Error = StoreError;
///     fn inner(&self) -> &TableClient<Row> { &self.inner }
///     fn map_error(e: TableError) -> StoreError { StoreError(e.to_string()) }
/// }
///
/// async fn usage(rows: Rows) {
///     // fetch() and scan_partition() are provided automatically
///     let _ = rows.fetch(1).await;
///     let _ = rows.scan_partition(0).await;
/// }
/// ```
#[async_trait]
pub trait TableAccess<T: TableRecord>: Send + Sync {
    /// The wrapper-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &TableClient<T>;

    /// Map table errors to the wrapper's error type.
    fn map_error(e: TableError) -> Self::Error;

    /// Fetch a row by id.
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every row of a partition.
    #[tracing::instrument(skip(self))]
    async fn scan_partition(&self, partition: T::Partition) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().scan(partition).await.map_err(Self::map_error)
    }
}
