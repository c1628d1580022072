//! Mutation engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the bitemporal mutation engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum rows per multi-row INSERT. 0 means unlimited.
    pub insert_batch_size: usize,
    /// Maximum identities in one `identity IN (...)` group. Each identity
    /// renders as one `OR` branch and SQLite caps expression depth at 1000.
    /// 0 means unlimited.
    pub identity_chunk_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            insert_batch_size: 500,
            identity_chunk_size: 500,
        }
    }
}
