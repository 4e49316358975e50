//! # Observability & Tracing
//!
//! Structured logging for the ledger. Spans come from `#[instrument]` on the
//! repository client and the edition functions, so a single revocation reads as
//! `revoke_line_item:assign_editions:write_editions` in the compact output.
//!
//! ```bash
//! RUST_LOG=info cargo run                      # one line per run
//! RUST_LOG=debug cargo run                     # every table request
//! RUST_LOG=edition_ledger=debug,table_actor=warn cargo run
//! ```
//!
//! Without `RUST_LOG`, the filter passed to [`setup_tracing`] applies (see
//! [`LedgerConfig::log_filter`](crate::config::LedgerConfig)).

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Call once, from the binary.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
