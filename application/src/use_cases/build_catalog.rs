//! Build Catalog use case
//!
//! Runs discovery strategies in registration order and folds their specs
//! into one [`Catalog`]. A later spec with an already-registered name
//! replaces the earlier one, so the binary registers reflective strategies
//! first and configuration last.

use crate::ports::discovery::{DiscoveryError, DiscoveryStrategy};
use bridge_domain::Catalog;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that abort a catalog build
#[derive(Error, Debug)]
pub enum BuildCatalogError {
    #[error("Discovery strategy '{strategy}' failed: {source}")]
    Strategy {
        strategy: String,
        #[source]
        source: DiscoveryError,
    },
}

/// Ordered set of discovery strategies
#[derive(Default)]
pub struct CatalogBuilder {
    strategies: Vec<Arc<dyn DiscoveryStrategy>>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(self, strategy: impl DiscoveryStrategy + 'static) -> Self {
        self.with_strategy_arc(Arc::new(strategy))
    }

    pub fn with_strategy_arc(mut self, strategy: Arc<dyn DiscoveryStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn strategy_ids(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    pub fn build(&self) -> Result<Catalog, BuildCatalogError> {
        let mut catalog = Catalog::new();

        for strategy in &self.strategies {
            let specs = strategy
                .discover()
                .map_err(|source| BuildCatalogError::Strategy {
                    strategy: strategy.id().to_string(),
                    source,
                })?;

            debug!(strategy = strategy.id(), count = specs.len(), "Strategy discovered methods");
            for spec in specs {
                let name = spec.tool_name().to_string();
                if catalog.insert(spec).is_some() {
                    debug!(tool = %name, strategy = strategy.id(), "Overriding earlier method");
                }
            }
        }

        info!(tools = catalog.len(), "Catalog built");
        Ok(catalog)
    }
}

/// Shared, atomically replaceable catalog snapshot.
///
/// Readers take an `Arc<Catalog>` and keep using it even if a rebuild swaps
/// in a newer one mid-call.
pub struct CatalogHandle {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, catalog: Catalog) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(catalog);
    }

    /// Build a complete new catalog and swap it in.
    ///
    /// On failure the current catalog stays in place.
    pub fn rebuild(&self, builder: &CatalogBuilder) -> Result<Arc<Catalog>, BuildCatalogError> {
        let fresh = Arc::new(builder.build()?);
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = fresh.clone();
        Ok(fresh)
    }
}
