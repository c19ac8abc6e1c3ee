//! Configuration System
//!
//! Layered configuration: built-in defaults, the user's global config file,
//! `reprocheck.toml` in the working directory, then `REPROCHECK__*`
//! environment variables.

use crate::digest::DigestOptions;
use crate::error::ReproError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge_policy;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReprocheckConfig {
    /// Digesting options
    #[serde(default)]
    pub digest: DigestOptions,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ReprocheckConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ReproError> {
        let errors: Vec<String> = [
            self.digest.validate().map_err(|e| format!("digest: {}", e)),
            self.logging.validate().map_err(|e| format!("logging: {}", e)),
        ]
        .into_iter()
        .filter_map(Result::err)
        .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ReproError::Config(format!(
                "Configuration validation failed:\n{}",
                errors.join("\n")
            )))
        }
    }
}
