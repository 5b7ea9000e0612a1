//! Execute Method use case
//!
//! Runs one payload against one [`MethodSpec`]:
//!
//! ```text
//! received ─▶ gate-check ─┬─▶ refused
//!                         └─▶ bind ─┬─▶ binding_failed
//!                                   └─▶ bind-ok ─┬─▶ dry-run report
//!                                                └─▶ invoke ─┬─▶ normalize ─▶ ok / degraded
//!                                                            └─▶ invocation_failed
//! ```
//!
//! Every path ends in an [`Outcome`]; nothing here returns `Err` or lets a
//! panic in a wrapped callable escape.

use crate::ports::call_journal::{CallEvent, CallJournal, NoCallJournal};
use crate::use_cases::normalize::ResultNormalizer;
use bridge_domain::{CallError, MethodSpec, Outcome};
use serde_json::{Map, Value, json};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reserved payload key requesting a binding-only preview
pub const DRY_RUN_KEY: &str = "dry_run";
/// Reserved payload key acknowledging a write-mode call
pub const CONFIRM_KEY: &str = "confirm";

/// Message returned when a write-mode call arrives without a control flag
pub const WRITE_GATE_MESSAGE: &str =
    "This tool is 'write' mode. Provide {'confirm': true} (or 'dry_run': true) to proceed.";

/// Control flags stripped from a payload before binding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlFlags {
    pub dry_run: bool,
    pub confirm: bool,
}

impl ControlFlags {
    /// Split the reserved keys off a payload.
    ///
    /// Returns the flags and a copy of the payload without them.
    pub fn extract(payload: &Map<String, Value>) -> (Self, Map<String, Value>) {
        let mut rest = payload.clone();
        let dry_run = rest.remove(DRY_RUN_KEY).is_some_and(|v| truthy(&v));
        let confirm = rest.remove(CONFIRM_KEY).is_some_and(|v| truthy(&v));
        (Self { dry_run, confirm }, rest)
    }
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are false
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Use case for executing a payload against a method spec
pub struct ExecuteMethodUseCase {
    normalizer: ResultNormalizer,
    journal: Arc<dyn CallJournal>,
}

impl ExecuteMethodUseCase {
    pub fn new() -> Self {
        Self {
            normalizer: ResultNormalizer::default(),
            journal: Arc::new(NoCallJournal),
        }
    }

    pub fn with_normalizer(mut self, normalizer: ResultNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_journal(mut self, journal: Arc<dyn CallJournal>) -> Self {
        self.journal = journal;
        self
    }

    pub fn execute(&self, spec: &MethodSpec, payload: &Map<String, Value>) -> Outcome {
        let (flags, arguments) = ControlFlags::extract(payload);
        let outcome = self.run(spec, flags, &arguments);

        match &outcome {
            Outcome::InvocationFailed { category, .. } => {
                warn!(tool = spec.tool_name(), category = %category, "Call raised");
            }
            other => {
                info!(tool = spec.tool_name(), status = other.status(), "Call finished");
            }
        }

        self.journal.record(CallEvent::new(
            "tool_call",
            json!({
                "tool": spec.tool_name(),
                "mode": spec.mode().as_str(),
                "status": outcome.status(),
                "dry_run": flags.dry_run,
                "argument_names": arguments.keys().collect::<Vec<_>>(),
            }),
        ));

        outcome
    }

    fn run(&self, spec: &MethodSpec, flags: ControlFlags, arguments: &Map<String, Value>) -> Outcome {
        if spec.mode().requires_confirmation() && !flags.dry_run && !flags.confirm {
            debug!(tool = spec.tool_name(), "Write call refused without confirmation");
            return Outcome::refused(WRITE_GATE_MESSAGE);
        }

        let bound = match spec.signature().bind(arguments) {
            Ok(bound) => bound,
            Err(e) => return Outcome::binding_failed(e.to_string()),
        };

        let target = spec.target();
        if flags.dry_run {
            return Outcome::DryRun {
                tool: spec.tool_name().to_string(),
                would_call: format!("{}({})", target.qualname(), bound.render()),
            };
        }

        debug!(tool = spec.tool_name(), qualname = target.qualname(), "Invoking target");
        let result = panic::catch_unwind(AssertUnwindSafe(|| target.invoke(&bound)))
            .unwrap_or_else(|payload| Err(CallError::new("Panic", panic_message(&*payload))));

        match result {
            Ok(value) => self.normalizer.normalize(&value),
            Err(e) => Outcome::invocation_failed(e.category, e.message),
        }
    }
}

impl Default for ExecuteMethodUseCase {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "target panicked".to_string()
    }
}
