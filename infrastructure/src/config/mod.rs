//! Configuration file loading for sdk-bridge
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SDK_BRIDGE_*` environment variables
//! 2. `--config <path>` specified file (TOML, or YAML by extension)
//! 3. Project root: `./sdk-bridge.toml` or `./.sdk-bridge.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/sdk-bridge/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_MAX_INSTANCES, ENV_AUTH_SCHEME, FileConfig,
    FileDiscoveryConfig, FileExecutionConfig, FileHintConfig, FileMethodConfig,
    FileProviderConfig, parse_env_auth,
};
pub use loader::{ConfigLoader, ConfigSource, ENV_PREFIX};
