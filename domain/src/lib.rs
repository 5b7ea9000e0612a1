//! Domain layer for sdk-bridge
//!
//! This crate contains the catalog entities, the library surface model and
//! the pure payload binding logic. It has no dependencies on configuration,
//! transport or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Method Spec
//!
//! A [`MethodSpec`] is one operation of a wrapped client library exposed as a
//! named tool. Specs are produced by discovery strategies and merged into a
//! [`Catalog`].
//!
//! ## Library Surface
//!
//! Libraries register their callable surface as data ([`Module`], [`Class`],
//! [`ClientObject`], [`Invocable`]) so that discovery can enumerate
//! operations and their parameter lists without runtime reflection.

pub mod method;
pub mod surface;

// Re-export commonly used types
pub use method::{
    ArgHints, BindError, BoundArguments, Catalog, MethodSpec, Mode, Outcome, Parameter,
    ParameterKind, Signature, ToolListing,
    naming::{is_public, tool_name},
};
pub use surface::{
    CallError, Class, ClientObject, Instance, Invocable, Member, Module, NativeFunction,
    ResolveError, Returned,
};
