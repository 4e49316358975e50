//! # Table Errors
//!
//! Common error type shared by the table actor, its client and the mock.

/// Errors that can occur while talking to a table actor.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table actor closed")]
    ActorClosed,
    #[error("Table actor dropped response channel")]
    ActorDropped,
    #[error("Table has no ids left to assign")]
    IdsExhausted,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Row {id} rejected write: {source}")]
    Record {
        id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("Batch aborted after {applied} patches: {source}")]
    Aborted {
        applied: usize,
        #[source]
        source: Box<TableError>,
    },
}

impl TableError {
    /// True when the actor is gone and no request can succeed until it is restarted.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, TableError::ActorClosed | TableError::ActorDropped)
    }
}
