//! Application layer for sdk-bridge
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    call_journal::{CallEvent, CallJournal, NoCallJournal},
    credentials::{CredentialSource, NoCredentials},
    discovery::{DiscoveryError, DiscoveryStrategy},
    library_resolver::LibraryResolver,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::build_catalog::{BuildCatalogError, CatalogBuilder, CatalogHandle};
pub use use_cases::execute_method::{
    CONFIRM_KEY, ControlFlags, DRY_RUN_KEY, ExecuteMethodUseCase, WRITE_GATE_MESSAGE, truthy,
};
pub use use_cases::normalize::{
    DEFAULT_RAW_ATTRIBUTES, NativeJson, RawAttribute, ResultConverter, ResultNormalizer,
};
