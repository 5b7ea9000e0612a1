//! Discovery strategy port
//!
//! A [`DiscoveryStrategy`] produces a batch of [`MethodSpec`]s. Two families
//! exist in infrastructure: configuration-driven discovery (declared
//! providers and methods) and reflective discovery (scanning a library's
//! registered surface).

use bridge_domain::{CallError, MethodSpec, ResolveError};
use thiserror::Error;

/// Configuration error raised while discovering a provider.
///
/// These abort the whole catalog build: a misconfigured provider makes every
/// one of its methods unusable, so it is surfaced at startup.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("No module named '{module}' (available: {})", .available.join(", "))]
    ModuleNotFound {
        module: String,
        available: Vec<String>,
    },

    #[error("Provider '{provider}': {source}")]
    Resolve {
        provider: String,
        source: ResolveError,
    },

    #[error("Provider '{provider}': invalid auth '{auth}', expected 'env:NAME'")]
    InvalidAuth { provider: String, auth: String },

    #[error("Provider '{provider}': construction failed: {source}")]
    Construction { provider: String, source: CallError },

    #[error("Provider '{provider}': construction produced a {found} value, not a client object")]
    NotAnObject { provider: String, found: String },

    #[error("Provider '{provider}': client has no method '{method}'")]
    MethodNotFound { provider: String, method: String },
}

/// Source of method specs
pub trait DiscoveryStrategy: Send + Sync {
    /// Identifier for logs, e.g. `config` or `reflect:github`
    fn id(&self) -> &str;

    /// Produce this strategy's batch.
    ///
    /// Order matters: within one batch, a later spec replaces an earlier one
    /// with the same tool name.
    fn discover(&self) -> Result<Vec<MethodSpec>, DiscoveryError>;
}
