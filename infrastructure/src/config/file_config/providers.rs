//! Provider configuration (`[[providers]]` array)
//!
//! Each provider names a library import path, a dotted constructor path and
//! the methods to expose:
//!
//! ```toml
//! [[providers]]
//! import = "github"
//! construct = "Github"
//! auth = "env:GITHUB_TOKEN"
//!
//! [[providers.methods]]
//! name = "get_user"
//! rename = "gh_get_user"
//! args = { login = { type = "string" } }
//!
//! [[providers.methods]]
//! name = "create_issue"
//! mode = "write"
//! ```

use bridge_domain::{ArgHints, Mode};
use serde::{Deserialize, Serialize};

/// Scheme prefix for credential references
pub const ENV_AUTH_SCHEME: &str = "env:";

/// Extract the variable name from an `env:NAME` reference.
///
/// Whitespace around the name is ignored, so `env: GITHUB_TOKEN` works.
/// Any other scheme, or an empty name, yields `None`.
pub fn parse_env_auth(auth: &str) -> Option<&str> {
    auth.trim()
        .strip_prefix(ENV_AUTH_SCHEME)
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// One declared provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileProviderConfig {
    /// Library import path, e.g. `github` or `azure.storage.blob`
    pub import: String,
    /// Dotted path to the constructor (or singleton) within the library
    pub construct: String,
    /// Credential reference, `env:NAME`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    #[serde(default)]
    pub methods: Vec<FileMethodConfig>,
}

/// One exposed method of a provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMethodConfig {
    /// Method name on the constructed client
    pub name: String,
    /// Tool name to publish instead of `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
    #[serde(default)]
    pub mode: Mode,
    /// Informational argument hints (`type`, `description`)
    #[serde(default)]
    pub args: ArgHints,
}

impl FileMethodConfig {
    pub fn tool_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }
}
