//! Type-safe wrappers around [`TableClient`](table_actor::TableClient).

pub mod line_item_client;

pub use line_item_client::*;
