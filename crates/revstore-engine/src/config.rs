//! Engine configuration
//!
//! ```toml
//! repository_id = "repo"
//!
//! [logging]
//! profile = "development"
//!
//! [limits]
//! max_transaction_commands = 1024
//! ```
//!
//! Every section and key is optional; missing ones take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use revstore_core::logging_facility::{self, Profile};
use revstore_core::{Id, Limits, Result, StoreError};

pub const DEFAULT_REPOSITORY_ID: &str = "repo";
pub const DEFAULT_MAX_TRANSACTION_COMMANDS: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Id of the single repository served by the engine
    pub repository_id: String,
    pub logging: LoggingConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub max_transaction_commands: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_transaction_commands: DEFAULT_MAX_TRANSACTION_COMMANDS,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            repository_id: DEFAULT_REPOSITORY_ID.to_string(),
            logging: LoggingConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration serving `repository_id`
    pub fn new(repository_id: impl Into<String>) -> Self {
        Self {
            repository_id: repository_id.into(),
            ..Self::default()
        }
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// Returns `Config` for malformed TOML, unknown keys, an invalid
    /// repository id or a zero transaction limit.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| StoreError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    /// Returns `Config` if the file cannot be read or does not parse.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::Config {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    /// Returns `Config` for an invalid repository id or a zero transaction limit.
    pub fn validate(&self) -> Result<()> {
        self.repository()?;
        if self.limits.max_transaction_commands == 0 {
            return Err(StoreError::Config {
                message: "limits.max_transaction_commands must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The configured repository id
    ///
    /// # Errors
    /// Returns `Config` if `repository_id` is not a valid id.
    pub fn repository(&self) -> Result<Id> {
        Id::new(self.repository_id.as_str()).map_err(|e| StoreError::Config {
            message: format!("repository_id: {}", e),
        })
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_transaction_commands: self.limits.max_transaction_commands,
        }
    }

    /// Install the global subscriber for the configured profile
    pub fn init_logging(&self) {
        logging_facility::init(self.logging.profile);
    }
}
