//! Method spec entities

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::signature::Signature;
use crate::surface::callable::Invocable;

/// Mutation classification of an operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Read-only operation, invoked directly
    #[default]
    Read,
    /// State-mutating operation, requires `confirm` or `dry_run`
    Write,
}

impl Mode {
    pub fn as_str(&self) -> &str {
        match self {
            Mode::Read => "read",
            Mode::Write => "write",
        }
    }

    pub fn requires_confirmation(&self) -> bool {
        matches!(self, Mode::Write)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-parameter informational metadata (`type`, `description`, ...)
pub type ArgHints = BTreeMap<String, Value>;

/// One invocable operation in the catalog.
///
/// Immutable once built; the catalog shares specs as `Arc<MethodSpec>`.
#[derive(Clone)]
pub struct MethodSpec {
    tool_name: String,
    target: Arc<dyn Invocable>,
    signature: Signature,
    doc: Option<String>,
    mode: Mode,
    arg_hints: ArgHints,
}

impl MethodSpec {
    /// Create a read-mode spec; signature and doc are taken from the target
    pub fn new(tool_name: impl Into<String>, target: Arc<dyn Invocable>) -> Self {
        let signature = target.signature().clone();
        let doc = target.doc().map(str::to_string);
        Self {
            tool_name: tool_name.into(),
            target,
            signature,
            doc,
            mode: Mode::default(),
            arg_hints: ArgHints::new(),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn with_arg_hints(mut self, arg_hints: ArgHints) -> Self {
        self.arg_hints = arg_hints;
        self
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn target(&self) -> &Arc<dyn Invocable> {
        &self.target
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn arg_hints(&self) -> &ArgHints {
        &self.arg_hints
    }

    pub fn is_write(&self) -> bool {
        self.mode.requires_confirmation()
    }

    pub fn listing(&self) -> ToolListing {
        ToolListing {
            tool_name: self.tool_name.clone(),
            doc: self.doc.clone(),
            mode: self.mode,
        }
    }
}

impl fmt::Debug for MethodSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodSpec")
            .field("tool_name", &self.tool_name)
            .field("target", &self.target.qualname())
            .field("signature", &self.signature)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

/// Catalog listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolListing {
    pub tool_name: String,
    pub doc: Option<String>,
    pub mode: Mode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::callable::{NativeFunction, Returned};
    use serde_json::json;

    fn greet() -> Arc<dyn Invocable> {
        NativeFunction::new(
            "Greeter.greet",
            Signature::new().optional("name", "world"),
            |_| Ok(Returned::null()),
        )
        .with_doc("Say hello")
        .into_arc()
    }

    #[test]
    fn test_mode_defaults_to_read() {
        assert_eq!(Mode::default(), Mode::Read);
        assert!(!Mode::Read.requires_confirmation());
        assert!(Mode::Write.requires_confirmation());
    }

    #[test]
    fn test_mode_deserialize() {
        let mode: Mode = serde_json::from_value(json!("write")).unwrap();
        assert_eq!(mode, Mode::Write);
        assert!(serde_json::from_value::<Mode>(json!("delete")).is_err());
    }

    #[test]
    fn test_method_spec_takes_signature_and_doc_from_target() {
        let spec = MethodSpec::new("greet", greet());

        assert_eq!(spec.tool_name(), "greet");
        assert_eq!(spec.doc(), Some("Say hello"));
        assert_eq!(spec.mode(), Mode::Read);
        assert_eq!(spec.signature().parameters().len(), 1);
        assert!(spec.arg_hints().is_empty());
    }

    #[test]
    fn test_method_spec_builder_overrides() {
        let mut hints = ArgHints::new();
        hints.insert("name".into(), json!({"type": "string"}));

        let spec = MethodSpec::new("say_hi", greet())
            .with_mode(Mode::Write)
            .with_doc("Overridden")
            .with_arg_hints(hints);

        assert!(spec.is_write());
        assert_eq!(spec.doc(), Some("Overridden"));
        assert_eq!(spec.arg_hints()["name"]["type"], "string");
        assert_eq!(
            spec.listing(),
            ToolListing {
                tool_name: "say_hi".into(),
                doc: Some("Overridden".into()),
                mode: Mode::Write,
            }
        );
    }
}
