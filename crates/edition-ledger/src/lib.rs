//! # Edition Ledger
//!
//! Sequential edition numbers for limited-edition products.
//!
//! Every purchased unit of a limited-edition product is a line item. Its edition number
//! is its position among the product's active line items ordered by purchase time, and
//! its edition total is how many active items the product has. When a unit is
//! refunded, cancelled or removed, the remaining buyers are renumbered to stay
//! contiguous (`1..=N`, no gaps, no duplicates).
//!
//! ## Modules
//!
//! - **[model]**: line items, ids, and the results operations report.
//! - **[repository]**: [`LineItemRepository`](repository::LineItemRepository), the
//!   store seam every operation is generic over.
//! - **[line_item_store]** / **[clients]**: the in-process store (a
//!   [`table_actor::TableActor`]) and its repository client.
//! - **[edition]**: assign, revoke/reinstate, verify.
//! - **[service]**: [`EditionService`](service::EditionService), the trigger surface.
//! - **[lifecycle]**: [`EditionSystem`](lifecycle::EditionSystem) wiring and tracing.
//! - **[config]**: [`LedgerConfig`](config::LedgerConfig).
//!
//! ## Testing
//!
//! Unit tests script the store with [`table_actor::mock::MockTable`]; `tests/` runs
//! whole flows against a live table.

pub mod clients;
pub mod config;
pub mod edition;
pub mod error;
pub mod lifecycle;
pub mod line_item_store;
pub mod model;
pub mod repository;
pub mod service;
