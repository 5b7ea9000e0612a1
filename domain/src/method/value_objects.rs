//! Execution outcome value objects
//!
//! Every call produces exactly one [`Outcome`]. The enum keeps the failure
//! category typed for Rust callers, while [`Outcome::to_json`] produces the
//! flat wire shapes that remote callers inspect:
//!
//! | Variant | Wire shape |
//! |---------|------------|
//! | `Refused`, `BindingFailed`, `InvocationFailed` | `{"error": "..."}` |
//! | `DryRun` | `{"dry_run": true, "tool": "...", "would_call": "..."}` |
//! | `Success` | `{"ok": true, "data": ...}` |
//! | `Degraded` | `{"ok": true, "data": "...", "warning": "..."}` |

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

/// Result of executing one method spec
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Write-mode call without `confirm` or `dry_run`
    Refused { message: String },
    /// Payload did not match the signature
    BindingFailed { message: String },
    /// The wrapped callable raised
    InvocationFailed { category: String, message: String },
    /// Binding-only preview
    DryRun { tool: String, would_call: String },
    /// Normalized JSON result
    Success { data: Value },
    /// Result rendered as text because no JSON form was available
    Degraded { data: String, warning: String },
}

impl Outcome {
    pub fn refused(message: impl Into<String>) -> Self {
        Outcome::Refused {
            message: message.into(),
        }
    }

    pub fn binding_failed(message: impl Into<String>) -> Self {
        Outcome::BindingFailed {
            message: message.into(),
        }
    }

    pub fn invocation_failed(category: impl Into<String>, message: impl Into<String>) -> Self {
        Outcome::InvocationFailed {
            category: category.into(),
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success { .. } | Outcome::Degraded { .. })
    }

    pub fn is_error(&self) -> bool {
        self.error_message().is_some()
    }

    /// Short status label for logs and journals
    pub fn status(&self) -> &'static str {
        match self {
            Outcome::Refused { .. } => "refused",
            Outcome::BindingFailed { .. } => "binding_failed",
            Outcome::InvocationFailed { .. } => "invocation_failed",
            Outcome::DryRun { .. } => "dry_run",
            Outcome::Success { .. } => "ok",
            Outcome::Degraded { .. } => "degraded",
        }
    }

    /// The `error` field of the wire shape, if any
    pub fn error_message(&self) -> Option<String> {
        match self {
            Outcome::Refused { message } => Some(message.clone()),
            Outcome::BindingFailed { message } => {
                Some(format!("Argument binding failed: {}", message))
            }
            Outcome::InvocationFailed { category, message } => {
                Some(format!("SDK call raised: {}: {}", category, message))
            }
            _ => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            Outcome::Degraded { warning, .. } => Some(warning),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Outcome::Refused { .. }
            | Outcome::BindingFailed { .. }
            | Outcome::InvocationFailed { .. } => {
                json!({ "error": self.error_message() })
            }
            Outcome::DryRun { tool, would_call } => json!({
                "dry_run": true,
                "tool": tool,
                "would_call": would_call,
            }),
            Outcome::Success { data } => json!({ "ok": true, "data": data }),
            Outcome::Degraded { data, warning } => json!({
                "ok": true,
                "data": data,
                "warning": warning,
            }),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
