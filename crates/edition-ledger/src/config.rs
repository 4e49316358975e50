//! Runtime configuration.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `EDITION_LEDGER_STORE_BUFFER` | `store_buffer` | `32` |
//! | `EDITION_LEDGER_LOG` | `log_filter` | `info` |
//!
//! `RUST_LOG`, when set, still wins over `log_filter`.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const STORE_BUFFER_VAR: &str = "EDITION_LEDGER_STORE_BUFFER";
pub const LOG_FILTER_VAR: &str = "EDITION_LEDGER_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Request queue capacity of the line-item table actor.
    pub store_buffer: usize,
    /// Fallback tracing filter.
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            store_buffer: 32,
            log_filter: "info".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(STORE_BUFFER_VAR) {
            config.store_buffer = match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: STORE_BUFFER_VAR,
                        value,
                    })
                }
            };
        }
        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        Ok(config)
    }
}
