//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod call_journal;
pub mod credentials;
pub mod discovery;
pub mod library_resolver;
pub mod tool_schema;
