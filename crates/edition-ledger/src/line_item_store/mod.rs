//! # Line Item Store
//!
//! The in-process line-item table: a [`TableActor`] over [`LineItem`] rows,
//! partitioned by product.
//!
//! ## Structure
//!
//! - [`record`] - [`TableRecord`](table_actor::TableRecord) implementation for [`LineItem`]
//! - [`error`] - [`LineItemError`], the reasons a row rejects a patch
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use edition_ledger::clients::LineItemClient;
//! use edition_ledger::line_item_store;
//! use edition_ledger::model::{NewLineItem, OrderId, ProductId};
//! use edition_ledger::repository::LineItemRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, table) = line_item_store::new(32);
//!     tokio::spawn(actor.run());
//!     let client = LineItemClient::new(table);
//!
//!     let id = client
//!         .insert(NewLineItem {
//!             order_id: OrderId::new("1001"),
//!             product_id: ProductId::new("harbor-at-dusk"),
//!             created_at: chrono::Utc::now(),
//!         })
//!         .await?;
//!     assert!(client.line_item(id).await?.is_some());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod record;

pub use error::*;

use crate::model::LineItem;
use table_actor::{TableActor, TableClient};

/// Creates a new line-item table actor and its client.
pub fn new(buffer_size: usize) -> (TableActor<LineItem>, TableClient<LineItem>) {
    TableActor::new(buffer_size)
}
