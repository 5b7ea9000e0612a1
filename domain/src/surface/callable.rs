//! Callables and their return values

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::object::ClientObject;
use crate::method::signature::{BoundArguments, Signature};

/// Failure raised by a wrapped callable.
///
/// `category` plays the role of an exception class name (`ValueError`,
/// `HttpError`, ...) and is reported verbatim in invocation outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{category}: {message}")]
pub struct CallError {
    pub category: String,
    pub message: String,
}

impl CallError {
    pub fn new(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: message.into(),
        }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new("TypeError", message)
    }

    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new("ValueError", message)
    }

    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new("RuntimeError", message)
    }
}

/// Value produced by a callable
#[derive(Clone)]
pub enum Returned {
    /// Natively JSON-encodable value
    Json(Value),
    /// Library object with no inherent JSON form
    Object(Arc<dyn ClientObject>),
}

impl Returned {
    pub fn object(object: impl ClientObject + 'static) -> Self {
        Returned::Object(Arc::new(object))
    }

    pub fn null() -> Self {
        Returned::Json(Value::Null)
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Returned::Json(value) => Some(value),
            Returned::Object(_) => None,
        }
    }

    pub fn as_object(&self) -> Option<&Arc<dyn ClientObject>> {
        match self {
            Returned::Object(object) => Some(object),
            Returned::Json(_) => None,
        }
    }

    /// Type label used in logs and warnings
    pub fn type_name(&self) -> &str {
        match self {
            Returned::Json(_) => "json",
            Returned::Object(object) => object.type_name(),
        }
    }

    /// Textual representation, the last-resort rendering of a result
    pub fn repr(&self) -> String {
        match self {
            Returned::Json(value) => value.to_string(),
            Returned::Object(object) => object.repr(),
        }
    }
}

impl From<Value> for Returned {
    fn from(value: Value) -> Self {
        Returned::Json(value)
    }
}

impl fmt::Debug for Returned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Returned::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Returned::Object(object) => f.debug_tuple("Object").field(&object.repr()).finish(),
        }
    }
}

/// Anything that can be invoked with bound keyword arguments
pub trait Invocable: Send + Sync {
    /// Qualified name, e.g. `Github.get_user`
    fn qualname(&self) -> &str;

    fn signature(&self) -> &Signature;

    fn doc(&self) -> Option<&str> {
        None
    }

    fn invoke(&self, args: &BoundArguments) -> Result<Returned, CallError>;
}

type NativeFn = dyn Fn(&BoundArguments) -> Result<Returned, CallError> + Send + Sync;

/// Closure-backed [`Invocable`]
#[derive(Clone)]
pub struct NativeFunction {
    qualname: String,
    signature: Signature,
    doc: Option<String>,
    body: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(qualname: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(&BoundArguments) -> Result<Returned, CallError> + Send + Sync + 'static,
    {
        Self {
            qualname: qualname.into(),
            signature,
            doc: None,
            body: Arc::new(body),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn into_arc(self) -> Arc<dyn Invocable> {
        Arc::new(self)
    }
}

impl Invocable for NativeFunction {
    fn qualname(&self) -> &str {
        &self.qualname
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    fn invoke(&self, args: &BoundArguments) -> Result<Returned, CallError> {
        (self.body)(args)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("qualname", &self.qualname)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
