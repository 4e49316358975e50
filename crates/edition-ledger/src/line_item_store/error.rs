//! Errors a stored line item reports when it rejects a patch.

use crate::model::LineItemId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// Removed items hold no edition number.
    #[error("{0} is removed and cannot hold an edition number")]
    NotActive(LineItemId),

    /// Edition numbers are 1-based and never exceed the edition total.
    #[error("{id}: edition number {number} is outside 1..={total}")]
    InvalidEditionNumber {
        id: LineItemId,
        number: u32,
        total: u32,
    },
}
