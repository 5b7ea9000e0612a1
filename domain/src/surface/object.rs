//! Library objects: constructed clients and opaque results

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::callable::{Invocable, NativeFunction, Returned};

/// An object exposed by a wrapped library.
///
/// Constructed clients expose their operations through [`method`](Self::method);
/// result objects may expose plain data through [`attribute`](Self::attribute)
/// (e.g. a `raw_data` attribute holding the underlying JSON).
pub trait ClientObject: Send + Sync {
    /// Class name, e.g. `Github`
    fn type_name(&self) -> &str;

    /// Names of all callable members, including private (`_`-prefixed) ones
    fn method_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn method(&self, _name: &str) -> Option<Arc<dyn Invocable>> {
        None
    }

    /// Non-callable attribute lookup
    fn attribute(&self, _name: &str) -> Option<Returned> {
        None
    }

    fn repr(&self) -> String {
        format!("<{} object>", self.type_name())
    }
}

/// Generic [`ClientObject`] assembled from methods and attributes.
///
/// Library adapters build their clients as an `Instance` whose methods are
/// closures capturing the client's shared state.
#[derive(Clone)]
pub struct Instance {
    type_name: String,
    methods: IndexMap<String, Arc<dyn Invocable>>,
    attributes: IndexMap<String, Returned>,
    repr: Option<String>,
}

impl Instance {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            methods: IndexMap::new(),
            attributes: IndexMap::new(),
            repr: None,
        }
    }

    /// Register a method under the last segment of its qualname
    pub fn with_method(mut self, function: NativeFunction) -> Self {
        let name = function
            .qualname()
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        self.methods.insert(name, Arc::new(function));
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Returned>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_repr(mut self, repr: impl Into<String>) -> Self {
        self.repr = Some(repr.into());
        self
    }
}

impl ClientObject for Instance {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn method_names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }

    fn method(&self, name: &str) -> Option<Arc<dyn Invocable>> {
        self.methods.get(name).cloned()
    }

    fn attribute(&self, name: &str) -> Option<Returned> {
        self.attributes.get(name).cloned()
    }

    fn repr(&self) -> String {
        self.repr
            .clone()
            .unwrap_or_else(|| format!("<{} object>", self.type_name))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}
