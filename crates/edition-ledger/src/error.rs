//! Error types for the edition ledger.
//!
//! Errors are layered: the table reports [`TableError`], the repository turns it into
//! [`RepositoryError`], and reconciliation wraps that in [`EditionError`]. Nothing here
//! is fatal to the host process; every error is scoped to one invocation and the
//! invocation is safe to retry.

use crate::model::ProductId;
use table_actor::TableError;
use thiserror::Error;

/// Failures of the line-item store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store cannot be reached. Retry once it is back.
    #[error("Line item store unavailable: {0}")]
    Unavailable(String),

    /// A write targeted a row that no longer exists.
    #[error("Line item not found: {0}")]
    NotFound(String),

    /// A row refused a write, typically because it changed since it was read.
    #[error("Write rejected: {0}")]
    Rejected(String),

    /// A batch stopped part way; `applied` writes went through before the failure.
    #[error("Batch aborted after {applied} writes: {source}")]
    Aborted {
        applied: usize,
        #[source]
        source: Box<RepositoryError>,
    },
}

impl From<TableError> for RepositoryError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::ActorClosed | TableError::ActorDropped => {
                RepositoryError::Unavailable(e.to_string())
            }
            TableError::NotFound(id) => RepositoryError::NotFound(id),
            TableError::Record { .. } | TableError::IdsExhausted => {
                RepositoryError::Rejected(e.to_string())
            }
            TableError::Aborted { applied, source } => RepositoryError::Aborted {
                applied,
                source: Box::new(RepositoryError::from(*source)),
            },
        }
    }
}

/// Failures of an assign, revoke, reinstate or verify invocation.
#[derive(Debug, Error)]
pub enum EditionError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The numbering writes for `product_id` stopped part way. The product may be
    /// partially renumbered until the next successful run.
    #[error("Numbering of {product_id} aborted after {applied} of {planned} writes: {source}")]
    WriteAborted {
        product_id: ProductId,
        applied: usize,
        planned: usize,
        #[source]
        source: RepositoryError,
    },
}

/// Invalid environment configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}
