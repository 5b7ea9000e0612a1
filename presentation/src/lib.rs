//! Presentation layer for sdk-bridge
//!
//! This crate contains the CLI definitions, console output formatting and
//! the stdio JSON-RPC tool server.

pub mod cli;
pub mod output;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Commands, ModeFilter};
pub use output::console::ConsoleFormatter;
pub use server::{RpcError, ToolCall, ToolServer};
