//! Tool schema conversion port.
//!
//! Separates "which operations exist" (the catalog) from "how to describe
//! them to a remote caller" (JSON Schema for tool listings).

use bridge_domain::{Catalog, MethodSpec};

/// Port for converting method specs to tool descriptions with JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert one spec to `{name, description, inputSchema}`.
    fn method_to_schema(&self, spec: &MethodSpec) -> serde_json::Value;

    /// Convert every spec in catalog order.
    fn catalog_schema(&self, catalog: &Catalog) -> Vec<serde_json::Value> {
        catalog
            .all()
            .map(|spec| self.method_to_schema(spec))
            .collect()
    }
}
