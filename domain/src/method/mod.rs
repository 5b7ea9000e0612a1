//! Method domain module
//!
//! This module defines the catalog side of the bridge: how a library
//! operation becomes a named, schema-bound, gated tool.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Catalog      │───▶│ MethodSpec   │───▶│ Outcome      │
//! │ (by name)    │    │ (one op)     │    │ (one call)   │
//! └──────────────┘    └──────┬───────┘    └──────────────┘
//!                            │
//!                            ├─ target:    Arc<dyn Invocable>
//!                            ├─ signature: [name, kind, default]
//!                            └─ mode:      read | write
//! ```
//!
//! # Mode-Based Gating
//!
//! | Mode | Direct invocation | Needs `confirm` / `dry_run` |
//! |------|-------------------|-----------------------------|
//! | **Read** | Yes | No |
//! | **Write** | No | Yes |
//!
//! Reflected operations are always `Read`: mutation intent cannot be inferred
//! from a signature, so only configuration can mark an operation `Write`.
//!
//! # Key Types
//!
//! - [`MethodSpec`]: one operation (name, target, signature, doc, mode, hints)
//! - [`Catalog`]: merged name-keyed specs, last insert wins
//! - [`Signature`] / [`BoundArguments`]: descriptor list and binding result
//! - [`Outcome`]: structured result of one execution

pub mod catalog;
pub mod entities;
pub mod naming;
pub mod signature;
pub mod value_objects;

pub use catalog::Catalog;
pub use entities::{ArgHints, MethodSpec, Mode, ToolListing};
pub use signature::{BindError, BoundArguments, Parameter, ParameterKind, Signature};
pub use value_objects::Outcome;
