//! # TableRecord Trait
//!
//! The `TableRecord` trait is the contract a row type implements to be stored in a
//! [`TableActor`](crate::TableActor). It names the row's identifier, the partition it
//! belongs to, the payload used to insert it, and the patch used to mutate it.
//!
//! # Partitions
//! Every row belongs to exactly one partition (for line items, the product). The actor
//! can scan a single partition or the whole table, and reports the set of partitions it
//! currently holds. Partitioning is what lets callers read "every row of product X"
//! without the actor knowing anything about products.
//!
//! # Patches
//! Rows are never replaced wholesale. A `Patch` describes one mutation, and the row
//! decides whether it accepts it. Rejected patches surface to the caller as
//! [`TableError::Record`](crate::TableError::Record) and leave the row untouched.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any row type must implement to be stored by a `TableActor`.
///
/// # Identifiers
/// The actor generates identifiers itself from a monotonically increasing `u32`
/// counter, so `Id` must be constructible from one. `Id` is also `Ord` so callers
/// can use it as a deterministic tie-break when sorting rows.
pub trait TableRecord: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this row.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The key rows are grouped by (e.g. a product id).
    type Partition: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to insert a new row.
    type Insert: Send + Sync + Debug;

    /// A single mutation applied to an existing row.
    type Patch: Send + Sync + Debug;

    /// The error a row reports when it rejects an insert or a patch.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the full row from its generated id and the insert payload.
    fn from_insert(id: Self::Id, params: Self::Insert) -> Result<Self, Self::Error>;

    /// The partition this row belongs to.
    fn partition(&self) -> &Self::Partition;

    /// Apply a patch in place.
    ///
    /// Returns `Ok(true)` when the row changed and `Ok(false)` when the patch was a
    /// no-op. On `Err` the row must be left exactly as it was.
    fn apply(&mut self, patch: &Self::Patch) -> Result<bool, Self::Error>;
}
