//! Modules and classes: the registered surface of a library

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use thiserror::Error;

use super::callable::{CallError, Invocable, NativeFunction, Returned};
use crate::method::signature::{BoundArguments, Signature};

/// Error resolving a dotted attribute path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("'{owner}' has no attribute '{attribute}'")]
    NoAttribute { owner: String, attribute: String },

    #[error("'{0}' is not callable")]
    NotCallable(String),
}

/// A class: a named constructor plus associated members
#[derive(Clone)]
pub struct Class {
    name: String,
    doc: Option<String>,
    constructor: Arc<dyn Invocable>,
    associated: IndexMap<String, Member>,
}

impl Class {
    /// Build a class whose constructor produces an object from bound arguments
    pub fn new<F>(name: impl Into<String>, signature: Signature, construct: F) -> Self
    where
        F: Fn(&BoundArguments) -> Result<Returned, CallError> + Send + Sync + 'static,
    {
        let name = name.into();
        let constructor = NativeFunction::new(name.clone(), signature, construct);
        Self {
            name,
            doc: None,
            constructor: Arc::new(constructor),
            associated: IndexMap::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Attach a static/class-level member, e.g. an alternate constructor
    pub fn with_associated(mut self, name: impl Into<String>, member: Member) -> Self {
        self.associated.insert(name.into(), member);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn signature(&self) -> &Signature {
        self.constructor.signature()
    }

    pub fn constructor(&self) -> Arc<dyn Invocable> {
        Arc::clone(&self.constructor)
    }

    pub fn associated(&self, name: &str) -> Option<&Member> {
        self.associated.get(name)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("signature", self.signature())
            .finish_non_exhaustive()
    }
}

/// One named member of a module or class
#[derive(Clone)]
pub enum Member {
    Function(Arc<dyn Invocable>),
    Class(Arc<Class>),
    Module(Arc<Module>),
    /// Non-callable value, e.g. a preconfigured module-level client
    Value(Returned),
}

impl Member {
    /// Callable view of the member: functions as-is, classes via their constructor
    pub fn as_callable(&self) -> Option<Arc<dyn Invocable>> {
        match self {
            Member::Function(function) => Some(Arc::clone(function)),
            Member::Class(class) => Some(class.constructor()),
            Member::Module(_) | Member::Value(_) => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Member::Function(_) => "function",
            Member::Class(_) => "class",
            Member::Module(_) => "module",
            Member::Value(_) => "value",
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Function(function) => write!(f, "Function({})", function.qualname()),
            Member::Class(class) => write!(f, "Class({})", class.name()),
            Member::Module(module) => write!(f, "Module({})", module.path()),
            Member::Value(value) => write!(f, "Value({:?})", value),
        }
    }
}

/// An importable library module
#[derive(Clone, Debug)]
pub struct Module {
    path: String,
    doc: Option<String>,
    members: IndexMap<String, Member>,
}

impl Module {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            doc: None,
            members: IndexMap::new(),
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Register a function under the last segment of its qualname
    pub fn with_function(mut self, function: NativeFunction) -> Self {
        let name = function
            .qualname()
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        self.members
            .insert(name, Member::Function(Arc::new(function)));
        self
    }

    pub fn with_class(mut self, class: Class) -> Self {
        self.members
            .insert(class.name().to_string(), Member::Class(Arc::new(class)));
        self
    }

    /// Register a submodule under the last segment of its path
    pub fn with_submodule(mut self, module: Module) -> Self {
        let name = module
            .path()
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        self.members.insert(name, Member::Module(Arc::new(module)));
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: Returned) -> Self {
        self.members.insert(name.into(), Member::Value(value));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Functions defined directly on this module, in registration order
    pub fn functions(&self) -> impl Iterator<Item = (&str, &Arc<dyn Invocable>)> {
        self.members.iter().filter_map(|(name, member)| match member {
            Member::Function(function) => Some((name.as_str(), function)),
            _ => None,
        })
    }

    /// Classes defined directly on this module, in registration order
    pub fn classes(&self) -> impl Iterator<Item = &Arc<Class>> {
        self.members.values().filter_map(|member| match member {
            Member::Class(class) => Some(class),
            _ => None,
        })
    }

    /// Resolve a dotted path such as `client.CoreV1Api` or
    /// `BlobServiceClient.from_connection_string`.
    ///
    /// Walks submodules, class associated members and object methods or
    /// attributes.
    pub fn resolve(&self, dotted: &str) -> Result<Member, ResolveError> {
        let mut parts = dotted.split('.');
        let first = parts.next().unwrap_or_default();
        let mut current = self
            .member(first)
            .cloned()
            .ok_or_else(|| ResolveError::NoAttribute {
                owner: self.path.clone(),
                attribute: first.to_string(),
            })?;
        let mut owner = format!("{}.{}", self.path, first);

        for part in parts {
            let next = match &current {
                Member::Module(module) => module.member(part).cloned(),
                Member::Class(class) => class.associated(part).cloned(),
                Member::Value(Returned::Object(object)) => object
                    .method(part)
                    .map(Member::Function)
                    .or_else(|| object.attribute(part).map(Member::Value)),
                Member::Function(_) | Member::Value(Returned::Json(_)) => None,
            };
            current = next.ok_or_else(|| ResolveError::NoAttribute {
                owner: format!("{} ({})", owner, current.kind()),
                attribute: part.to_string(),
            })?;
            owner = format!("{}.{}", owner, part);
        }

        Ok(current)
    }

    /// Resolve a dotted path that must end in something callable
    pub fn resolve_callable(&self, dotted: &str) -> Result<Arc<dyn Invocable>, ResolveError> {
        self.resolve(dotted)?
            .as_callable()
            .ok_or_else(|| ResolveError::NotCallable(format!("{}.{}", self.path, dotted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::object::Instance;
    use serde_json::json;

    fn sample_module() -> Module {
        let api = Class::new("CoreV1Api", Signature::new(), |_| {
            Ok(Returned::object(Instance::new("CoreV1Api")))
        });
        let blob = Class::new("BlobServiceClient", Signature::new().required("url"), |_| {
            Ok(Returned::object(Instance::new("BlobServiceClient")))
        })
        .with_associated(
            "from_connection_string",
            Member::Function(
                NativeFunction::new(
                    "BlobServiceClient.from_connection_string",
                    Signature::new().required("conn_str"),
                    |_| Ok(Returned::object(Instance::new("BlobServiceClient"))),
                )
                .into_arc(),
            ),
        );

        Module::new("lib")
            .with_function(NativeFunction::new("lib.version", Signature::new(), |_| {
                Ok(json!("1.0").into())
            }))
            .with_class(blob)
            .with_submodule(Module::new("lib.client").with_class(api))
            .with_value("VERSION", Returned::Json(json!("1.0")))
    }

    #[test]
    fn test_resolve_nested_paths() {
        let module = sample_module();

        let ctor = module.resolve_callable("client.CoreV1Api").unwrap();
        assert_eq!(ctor.qualname(), "CoreV1Api");

        let alt = module
            .resolve_callable("BlobServiceClient.from_connection_string")
            .unwrap();
        assert_eq!(alt.qualname(), "BlobServiceClient.from_connection_string");

        let version = module.resolve_callable("version").unwrap();
        let out = version.invoke(&BoundArguments::new()).unwrap();
        assert_eq!(out.as_json(), Some(&json!("1.0")));
    }

    #[test]
    fn test_resolve_missing_attribute() {
        let module = sample_module();
        let err = module.resolve("client.AppsV1Api").unwrap_err();
        assert!(matches!(err, ResolveError::NoAttribute { ref attribute, .. } if attribute == "AppsV1Api"));
        assert!(module.resolve("nope").is_err());
    }

    #[test]
    fn test_resolve_callable_rejects_values() {
        let module = sample_module();
        let err = module.resolve_callable("VERSION").err().expect("expected NotCallable error");
        assert_eq!(err, ResolveError::NotCallable("lib.VERSION".into()));
    }

    #[test]
    fn test_functions_and_classes_iterators() {
        let module = sample_module();
        let functions: Vec<&str> = module.functions().map(|(name, _)| name).collect();
        let classes: Vec<&str> = module.classes().map(|c| c.name()).collect();
        assert_eq!(functions, vec!["version"]);
        assert_eq!(classes, vec!["BlobServiceClient"]);
    }
}
