//! # System Lifecycle
//!
//! Starting, wiring and stopping the ledger.
//!
//! The ledger has a single actor, the line-item table. [`EditionSystem::new`] spawns
//! it and hands its client to an [`EditionService`](crate::service::EditionService);
//! [`EditionSystem::shutdown`] drops the clients so the table's receiver closes, then
//! awaits the actor task.
//!
//! Shutdown relies on channel closure: the actor processes the requests still queued,
//! logs `Shutdown`, and exits. A clone of the service that outlives the system keeps
//! the table running.
//!
//! [`setup_tracing`] installs the `tracing` subscriber for binaries.

pub mod edition_system;
pub mod tracing;

pub use edition_system::*;
pub use self::tracing::*;
