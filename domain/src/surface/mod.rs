//! Library surface model
//!
//! Wrapped client libraries describe their callable surface as data: a
//! [`Module`] holds functions, classes, submodules and plain values; a
//! [`Class`] carries a constructor; constructed clients are
//! [`ClientObject`]s whose methods are [`Invocable`]s.
//!
//! ```text
//! Module "github"
//!   ├─ Class  Github(login_or_token=None, base_url=...)
//!   │     └─ construct ─▶ ClientObject "Github"
//!   │                        ├─ get_user(login=None)
//!   │                        └─ get_repo(full_name)
//!   └─ Function  api_status()
//! ```
//!
//! Discovery strategies walk this model instead of reflecting over live
//! objects, so every operation's parameter list is known up front.

pub mod callable;
pub mod module;
pub mod object;

pub use callable::{CallError, Invocable, NativeFunction, Returned};
pub use module::{Class, Member, Module, ResolveError};
pub use object::{ClientObject, Instance};
