//! Raw configuration data types
//!
//! These structs represent the exact structure of the config file (TOML or
//! YAML). They are deserialized directly and use domain types where
//! appropriate.

mod discovery;
mod execution;
mod providers;

pub use discovery::{DEFAULT_MAX_INSTANCES, FileDiscoveryConfig, FileHintConfig};
pub use execution::FileExecutionConfig;
pub use providers::{ENV_AUTH_SCHEME, FileMethodConfig, FileProviderConfig, parse_env_auth};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("providers[{index}]: import cannot be empty")]
    EmptyImport { index: usize },

    #[error("provider '{provider}': construct cannot be empty")]
    EmptyConstruct { provider: String },

    #[error("provider '{provider}': auth '{auth}' must use the 'env:NAME' scheme")]
    InvalidAuth { provider: String, auth: String },

    #[error("provider '{provider}': method name cannot be empty")]
    EmptyMethodName { provider: String },

    #[error("discovery.max_instances must be greater than 0")]
    InvalidMaxInstances,

    #[error("discovery.hints.{package}: construct cannot be empty")]
    EmptyHintConstruct { package: String },
}

/// Complete file configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Reflective discovery settings
    pub discovery: FileDiscoveryConfig,
    /// Executor settings
    pub execution: FileExecutionConfig,
    /// Declared providers, applied after reflective discovery
    pub providers: Vec<FileProviderConfig>,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.discovery.max_instances == 0 {
            return Err(ConfigValidationError::InvalidMaxInstances);
        }

        for (package, hint) in &self.discovery.hints {
            if hint.construct.trim().is_empty() {
                return Err(ConfigValidationError::EmptyHintConstruct {
                    package: package.clone(),
                });
            }
        }

        for (index, provider) in self.providers.iter().enumerate() {
            if provider.import.trim().is_empty() {
                return Err(ConfigValidationError::EmptyImport { index });
            }
            if provider.construct.trim().is_empty() {
                return Err(ConfigValidationError::EmptyConstruct {
                    provider: provider.import.clone(),
                });
            }
            if let Some(auth) = &provider.auth
                && parse_env_auth(auth).is_none()
            {
                return Err(ConfigValidationError::InvalidAuth {
                    provider: provider.import.clone(),
                    auth: auth.clone(),
                });
            }
            if provider.methods.iter().any(|m| m.name.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyMethodName {
                    provider: provider.import.clone(),
                });
            }
        }

        Ok(())
    }

    /// Whether any provider or package is configured
    pub fn has_sources(&self) -> bool {
        !self.providers.is_empty() || !self.discovery.packages.is_empty()
    }
}
