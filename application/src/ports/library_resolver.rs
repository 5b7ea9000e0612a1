//! Library resolver port
//!
//! The bridge's equivalent of an import system: maps an import path such as
//! `github` or `azure.storage.blob` to the library's registered [`Module`].

use std::sync::Arc;

use bridge_domain::Module;

/// Port for importing library surfaces by path
pub trait LibraryResolver: Send + Sync {
    /// Import a module; `None` when no library is registered under `path`
    fn import(&self, path: &str) -> Option<Arc<Module>>;

    /// Import paths this resolver knows about
    fn available(&self) -> Vec<String>;
}
