//! # Table Messages
//!
//! Request types sent from a [`TableClient`](crate::TableClient) to a
//! [`TableActor`](crate::TableActor). Each request carries a oneshot sender for its
//! reply, so every request is answered exactly once.

use crate::error::TableError;
use crate::record::TableRecord;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, TableError>>;

/// Message type sent to the actor to request an operation.
///
/// The actor processes requests one at a time, so each variant executes atomically
/// against the table. A sequence of requests does not: another client may interleave
/// between a `Scan` and the `PatchMany` built from it.
///
/// - **Insert**: create a row from [`TableRecord::Insert`], returning the generated id.
/// - **Get**: fetch a single row by id.
/// - **Scan**: fetch every row of one partition, or of the whole table.
/// - **Partitions**: list the partitions that currently hold at least one row.
/// - **Patch**: apply one [`TableRecord::Patch`] and return the updated row.
/// - **PatchMany**: apply patches in order, stopping at the first rejection.
#[derive(Debug)]
pub enum TableRequest<T: TableRecord> {
    Insert {
        params: T::Insert,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Scan {
        partition: Option<T::Partition>,
        respond_to: Response<Vec<T>>,
    },
    Partitions {
        respond_to: Response<Vec<T::Partition>>,
    },
    Patch {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    PatchMany {
        patches: Vec<(T::Id, T::Patch)>,
        respond_to: Response<PatchReport>,
    },
}

/// Outcome of a successful `PatchMany`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Patches the actor applied.
    pub applied: usize,
    /// Applied patches that actually changed their row.
    pub changed: usize,
}
