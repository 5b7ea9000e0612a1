//! Logging infrastructure: structured call journaling.
//!
//! Provides [`JsonlCallJournal`], a JSONL file writer that implements
//! the [`CallJournal`](bridge_application::CallJournal) port.

mod jsonl_journal;

pub use jsonl_journal::JsonlCallJournal;
