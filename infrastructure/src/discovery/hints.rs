//! Client construction hints
//!
//! A hint tells reflective discovery how to build a package's primary
//! client: an optional setup hook, the constructor path and where its
//! credential comes from.

use crate::config::{FileHintConfig, parse_env_auth};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHint {
    pub setup: Option<String>,
    pub construct: String,
    pub auth: Option<String>,
    pub auth_env: Vec<String>,
}

impl ClientHint {
    pub fn new(construct: impl Into<String>) -> Self {
        Self {
            setup: None,
            construct: construct.into(),
            auth: None,
            auth_env: Vec::new(),
        }
    }

    pub fn with_setup(mut self, setup: impl Into<String>) -> Self {
        self.setup = Some(setup.into());
        self
    }

    pub fn with_auth(mut self, auth: impl Into<String>) -> Self {
        self.auth = Some(auth.into());
        self
    }

    pub fn with_auth_env(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.auth_env = names.into_iter().map(Into::into).collect();
        self
    }

    /// Credential variables to try, in order.
    ///
    /// `auth_env` wins when non-empty; otherwise the `env:` reference in
    /// `auth`, if any.
    pub fn candidate_env(&self) -> Vec<String> {
        if !self.auth_env.is_empty() {
            return self.auth_env.clone();
        }
        self.auth
            .as_deref()
            .and_then(parse_env_auth)
            .map(|name| vec![name.to_string()])
            .unwrap_or_default()
    }

    /// First segment of the constructor path, i.e. the class it claims
    pub fn claimed_class(&self) -> &str {
        self.construct.split('.').next().unwrap_or_default()
    }
}

impl From<&FileHintConfig> for ClientHint {
    fn from(config: &FileHintConfig) -> Self {
        Self {
            setup: config.setup.clone(),
            construct: config.construct.clone(),
            auth: config.auth.clone(),
            auth_env: config.auth_env.clone(),
        }
    }
}

/// Package import path → hint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintTable {
    hints: BTreeMap<String, ClientHint>,
}

impl HintTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Hints for well-known client libraries
    pub fn defaults() -> Self {
        Self::empty()
            .with_hint("github", ClientHint::new("Github").with_auth("env: GITHUB_TOKEN"))
            .with_hint(
                "kubernetes",
                ClientHint::new("client.CoreV1Api").with_setup("config.load_kube_config"),
            )
            .with_hint(
                "azure.storage.blob",
                ClientHint::new("BlobServiceClient.from_connection_string")
                    .with_auth_env(["AZURE_STORAGE_CONNECTION_STRING"]),
            )
    }

    pub fn with_hint(mut self, package: impl Into<String>, hint: ClientHint) -> Self {
        self.hints.insert(package.into(), hint);
        self
    }

    /// Overlay configured hints; a configured package replaces its default
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, FileHintConfig>) -> Self {
        for (package, config) in overrides {
            self.hints.insert(package.clone(), ClientHint::from(config));
        }
        self
    }

    pub fn get(&self, package: &str) -> Option<&ClientHint> {
        self.hints.get(package)
    }
}
