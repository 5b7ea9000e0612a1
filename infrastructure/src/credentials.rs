//! Credential sources
//!
//! [`EnvCredentialSource`] reads secrets from the process environment.
//! [`StaticCredentials`] holds a fixed in-memory map, for tests and for
//! embedding the bridge in a host that manages its own secrets.

use bridge_application::CredentialSource;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

/// Reads credentials from environment variables
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvCredentialSource;

impl CredentialSource for EnvCredentialSource {
    fn lookup(&self, name: &str) -> Option<SecretString> {
        std::env::var(name)
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecretString::from)
    }
}

/// Fixed name → secret map
#[derive(Default)]
pub struct StaticCredentials {
    secrets: HashMap<String, SecretString>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, secret: impl Into<String>) -> Self {
        self.secrets
            .insert(name.into(), SecretString::from(secret.into()));
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn lookup(&self, name: &str) -> Option<SecretString> {
        self.secrets
            .get(name)
            .filter(|secret| !secret.expose_secret().is_empty())
            .cloned()
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.secrets.keys().collect();
        names.sort();
        f.debug_struct("StaticCredentials")
            .field("names", &names)
            .finish()
    }
}
