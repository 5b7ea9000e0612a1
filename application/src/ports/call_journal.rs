//! Port for structured call journaling.
//!
//! Defines the [`CallJournal`] trait for recording one event per execution
//! (tool, mode, status, argument names) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while the journal is a machine-readable audit
//! trail of which tools were called and how each call ended. Argument
//! *values* are never recorded.

use serde_json::Value;

/// A structured call event.
pub struct CallEvent {
    /// Event type identifier (e.g., "tool_call", "catalog_built").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl CallEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for journaling call events.
///
/// The `record` method is synchronous and non-fallible so that journaling
/// can never change the outcome of a call; write failures are ignored.
pub trait CallJournal: Send + Sync {
    fn record(&self, event: CallEvent);
}

/// No-op implementation for tests and when journaling is disabled.
pub struct NoCallJournal;

impl CallJournal for NoCallJournal {
    fn record(&self, _event: CallEvent) {}
}
