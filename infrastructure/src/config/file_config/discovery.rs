//! Reflective discovery configuration (`[discovery]` section)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default bound on opportunistic zero-argument instantiations per package
pub const DEFAULT_MAX_INSTANCES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscoveryConfig {
    /// Library import paths to scan
    pub packages: Vec<String>,
    /// Maximum zero-argument classes instantiated per package
    pub max_instances: usize,
    /// Client construction hints, merged over the built-in table
    pub hints: BTreeMap<String, FileHintConfig>,
}

impl Default for FileDiscoveryConfig {
    fn default() -> Self {
        Self {
            packages: Vec::new(),
            max_instances: DEFAULT_MAX_INSTANCES,
            hints: BTreeMap::new(),
        }
    }
}

/// How to build the primary client of a package
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHintConfig {
    /// Zero-argument function called before construction, failures ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<String>,
    pub construct: String,
    /// `env:NAME` credential reference, used when `auth_env` is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
    /// Candidate credential variables, first non-empty wins
    pub auth_env: Vec<String>,
}
