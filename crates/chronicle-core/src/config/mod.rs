pub mod compiler_config;
pub mod engine_config;
pub mod logging_config;

use serde::{Deserialize, Serialize};

pub use compiler_config::{CompilerConfig, DecimalLiterals};
pub use engine_config::EngineConfig;
pub use logging_config::LoggingConfig;

use crate::errors::{ChronicleError, ChronicleResult};

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ChronicleConfig {
    pub compiler: CompilerConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

impl ChronicleConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> ChronicleResult<Self> {
        toml::from_str(toml_str).map_err(|e| ChronicleError::Config(e.to_string()))
    }
}
