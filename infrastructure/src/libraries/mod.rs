//! Built-in client libraries and the registry that serves them by import path.
//!
//! A [`LibraryCatalog`] is the bridge's import system: discovery asks it for
//! a [`Module`] by path (`github`, `stub`) and scans or resolves from there.
//! Hosts embedding the bridge can register their own modules alongside the
//! built-ins.

#[cfg(feature = "github")]
pub mod github;
pub mod stub;

use bridge_application::LibraryResolver;
use bridge_domain::Module;
use indexmap::IndexMap;
use std::sync::Arc;

/// Import path → registered module
#[derive(Debug, Clone, Default)]
pub struct LibraryCatalog {
    modules: IndexMap<String, Arc<Module>>,
}

impl LibraryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with every library compiled into this build
    pub fn builtin() -> Self {
        let catalog = Self::new().with_module(stub::module());
        #[cfg(feature = "github")]
        let catalog = catalog.with_module(github::module());
        catalog
    }

    /// Register a module under its own path; replaces an existing entry
    pub fn with_module(mut self, module: Module) -> Self {
        self.modules
            .insert(module.path().to_string(), Arc::new(module));
        self
    }
}

impl LibraryResolver for LibraryCatalog {
    fn import(&self, path: &str) -> Option<Arc<Module>> {
        self.modules.get(path).cloned()
    }

    fn available(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }
}
