//! # Table Actor
//!
//! An in-process, partitioned record table served by a single Tokio task.
//!
//! The crate stands in for a relational table wherever the real system of record is out
//! of reach (demos, tests, local tooling). It keeps the property callers rely on from a
//! database: every individual request is applied atomically, because one task owns the
//! rows and handles requests one at a time. It deliberately does **not** offer
//! multi-request transactions; a read followed by a write can interleave with other
//! clients, exactly as two autocommit statements would.
//!
//! ## Architecture Overview
//!
//! 1. **Record Layer** ([`TableRecord`]): the row type, its id, partition key, insert
//!    payload and patch type. Rows validate their own patches.
//! 2. **Runtime Layer** ([`TableActor`]): owns the `HashMap` and the request loop.
//! 3. **Interface Layer** ([`TableClient`], [`TableAccess`]): cloneable async handle,
//!    plus a trait for domain wrappers that want traced reads with their own error type.
//!
//! ## Batched writes
//!
//! [`TableClient::patch_many`] applies patches in order and stops at the first one a
//! row rejects (or whose row is missing). Patches before the failure stay applied; the
//! error reports how many went through ([`TableError::Aborted`]).
//!
//! ## Testing
//!
//! [`mock::MockTable`] answers a real `TableClient` from scripted expectations and
//! records every patch it receives. See the [`mock`] module.

pub mod access;
pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

pub use access::TableAccess;
pub use actor::TableActor;
pub use client::TableClient;
pub use error::TableError;
pub use message::{PatchReport, Response, TableRequest};
pub use record::TableRecord;
