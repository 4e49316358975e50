//! Edition numbering: assignment, revocation/resequencing and verification.
//!
//! Every function here takes the store as `&R where R: LineItemRepository`, holds no
//! state between calls, and is safe to rerun.

pub mod assigner;
pub mod plan;
pub mod resequencer;
pub mod verify;

pub use assigner::{assign_all, assign_editions};
pub use plan::{expected_numbers, plan_editions, EditionPlan};
pub use resequencer::{reinstate_line_item, revoke_line_item, revoke_order};
pub use verify::{audit_all, audit_items, audit_product};
