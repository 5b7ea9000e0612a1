//! Stdio tool server
//!
//! Serves the catalog over newline-delimited JSON-RPC 2.0: `initialize`,
//! `ping`, `tools/list` and `tools/call`.

pub mod protocol;
pub mod stdio;

pub use protocol::{RpcError, ToolCall};
pub use stdio::ToolServer;
