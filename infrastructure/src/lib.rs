//! Infrastructure layer for sdk-bridge
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading,
//! discovery strategies and the built-in client libraries.

pub mod config;
pub mod credentials;
pub mod discovery;
pub mod libraries;
pub mod logging;
pub mod schema;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDiscoveryConfig, FileExecutionConfig,
    FileHintConfig, FileMethodConfig, FileProviderConfig,
};
pub use credentials::{EnvCredentialSource, StaticCredentials};
pub use discovery::{
    ClientHint, ConfigDiscovery, HintTable, ReflectiveDiscovery, SurfaceScan, default_pipeline,
};
pub use libraries::LibraryCatalog;
pub use logging::JsonlCallJournal;
pub use schema::JsonSchemaToolConverter;
