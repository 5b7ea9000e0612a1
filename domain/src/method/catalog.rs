//! Name-keyed catalog of method specs

use std::sync::Arc;

use indexmap::IndexMap;

use super::entities::{MethodSpec, ToolListing};

/// Merged catalog of [`MethodSpec`]s keyed by tool name.
///
/// Inserting a spec whose name already exists replaces the earlier entry in
/// place, so the catalog keeps first-seen order while the last discovery
/// wins. Consumers only get shared references.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    specs: IndexMap<String, Arc<MethodSpec>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            specs: IndexMap::new(),
        }
    }

    /// Register a spec (builder pattern), replacing any same-named entry
    pub fn register(mut self, spec: MethodSpec) -> Self {
        self.insert(spec);
        self
    }

    /// Insert a spec, returning the entry it replaced
    pub fn insert(&mut self, spec: MethodSpec) -> Option<Arc<MethodSpec>> {
        self.specs
            .insert(spec.tool_name().to_string(), Arc::new(spec))
    }

    pub fn get(&self, tool_name: &str) -> Option<&Arc<MethodSpec>> {
        self.specs.get(tool_name)
    }

    pub fn contains(&self, tool_name: &str) -> bool {
        self.specs.contains_key(tool_name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<MethodSpec>> {
        self.specs.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.keys().map(|s| s.as_str())
    }

    pub fn listing(&self) -> Vec<ToolListing> {
        self.specs.values().map(|s| s.listing()).collect()
    }
}
