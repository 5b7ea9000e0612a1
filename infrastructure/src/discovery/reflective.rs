//! Reflective discovery: scan a library's registered surface
//!
//! The scan runs as an ordered pipeline of [`SurfaceScan`] stages. Stages
//! never fail: anything that cannot be resolved or constructed is logged at
//! `debug` and skipped, so one awkward class never hides the rest of a
//! package.
//!
//! | Stage | Produces |
//! |-------|----------|
//! | [`TopLevelFunctions`] | `{pkg}_{function}` for every public module function |
//! | [`HintedClient`] | `{pkg}_{Type}_{method}` for the client built from the package hint |
//! | [`ZeroArgClasses`] | `{pkg}_{Type}_{method}` for up to N classes constructible without arguments |

use super::hints::HintTable;
use super::{ConstructArgs, invoke_constructor, methods_of};
use bridge_application::{CredentialSource, DiscoveryError, DiscoveryStrategy, LibraryResolver};
use bridge_domain::{Member, MethodSpec, Module, Returned, is_public, tool_name};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::DEFAULT_MAX_INSTANCES;

/// Everything a scan stage may look at
pub struct ScanContext<'a> {
    pub package: &'a str,
    pub module: &'a Module,
    pub hints: &'a HintTable,
    pub credentials: &'a dyn CredentialSource,
}

/// One stage of the reflective pipeline
pub trait SurfaceScan: Send + Sync {
    fn name(&self) -> &str;

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<MethodSpec>;
}

/// Public functions defined directly on the package module
pub struct TopLevelFunctions;

impl SurfaceScan for TopLevelFunctions {
    fn name(&self) -> &str {
        "top_level_functions"
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<MethodSpec> {
        ctx.module
            .functions()
            .filter(|(name, _)| is_public(name))
            .map(|(name, function)| {
                MethodSpec::new(tool_name(ctx.package, name), Arc::clone(function))
            })
            .collect()
    }
}

/// The package's primary client, built as its hint describes
pub struct HintedClient;

impl HintedClient {
    fn build(&self, ctx: &ScanContext<'_>) -> Option<Returned> {
        let hint = ctx.hints.get(ctx.package)?;

        if let Some(setup) = &hint.setup {
            let outcome = ctx
                .module
                .resolve_callable(setup)
                .map_err(|e| e.to_string())
                .and_then(|f| {
                    invoke_constructor(f.as_ref(), ConstructArgs::Defaults).map_err(|e| e.to_string())
                });
            if let Err(e) = outcome {
                debug!(package = ctx.package, setup = %setup, error = %e, "Setup hook failed");
            }
        }

        let member = match ctx.module.resolve(&hint.construct) {
            Ok(member) => member,
            Err(e) => {
                debug!(package = ctx.package, error = %e, "Hinted constructor not found");
                return None;
            }
        };

        let credential = ctx
            .credentials
            .first_available(&hint.candidate_env())
            .map(|(name, secret)| {
                debug!(package = ctx.package, variable = %name, "Using credential");
                Value::String(secret.expose_secret().to_string())
            });

        let built = match (&member, credential) {
            (Member::Value(value @ Returned::Object(_)), None) => Ok(value.clone()),
            (member, credential) => {
                let Some(ctor) = member.as_callable() else {
                    debug!(package = ctx.package, construct = %hint.construct, "Hinted constructor is not callable");
                    return None;
                };
                let args = credential.map_or(ConstructArgs::Defaults, ConstructArgs::First);
                invoke_constructor(ctor.as_ref(), args)
            }
        };

        match built {
            Ok(client @ Returned::Object(_)) => Some(client),
            Ok(other) => {
                debug!(package = ctx.package, found = other.type_name(), "Hinted constructor returned a non-object");
                None
            }
            Err(e) => {
                debug!(package = ctx.package, error = %e, "Hinted client construction failed");
                None
            }
        }
    }
}

impl SurfaceScan for HintedClient {
    fn name(&self) -> &str {
        "hinted_client"
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<MethodSpec> {
        match self.build(ctx) {
            Some(Returned::Object(client)) => methods_of(ctx.package, client.as_ref()),
            _ => Vec::new(),
        }
    }
}

/// Opportunistic instances of classes that need no arguments.
///
/// Classes claimed by the package's hint are left to [`HintedClient`].
pub struct ZeroArgClasses {
    pub max_instances: usize,
}

impl Default for ZeroArgClasses {
    fn default() -> Self {
        Self {
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}

impl SurfaceScan for ZeroArgClasses {
    fn name(&self) -> &str {
        "zero_arg_classes"
    }

    fn scan(&self, ctx: &ScanContext<'_>) -> Vec<MethodSpec> {
        let claimed = ctx.hints.get(ctx.package).map(|hint| hint.claimed_class());
        let mut specs = Vec::new();
        let mut instances = 0;

        for class in ctx.module.classes() {
            if instances >= self.max_instances {
                break;
            }
            if !is_public(class.name()) || claimed == Some(class.name()) {
                continue;
            }
            if !class.signature().is_zero_arg_constructible() {
                continue;
            }

            match invoke_constructor(class.constructor().as_ref(), ConstructArgs::Defaults) {
                Ok(Returned::Object(instance)) => {
                    instances += 1;
                    specs.extend(methods_of(ctx.package, instance.as_ref()));
                }
                Ok(other) => {
                    debug!(class = class.name(), found = other.type_name(), "Constructor returned a non-object");
                }
                Err(e) => {
                    debug!(class = class.name(), error = %e, "Zero-argument construction failed");
                }
            }
        }

        specs
    }
}

/// The standard three-stage pipeline
pub fn default_pipeline(max_instances: usize) -> Vec<Box<dyn SurfaceScan>> {
    vec![
        Box::new(TopLevelFunctions),
        Box::new(HintedClient),
        Box::new(ZeroArgClasses { max_instances }),
    ]
}

/// Discovery strategy scanning one package
pub struct ReflectiveDiscovery {
    id: String,
    package: String,
    resolver: Arc<dyn LibraryResolver>,
    credentials: Arc<dyn CredentialSource>,
    hints: Arc<HintTable>,
    pipeline: Vec<Box<dyn SurfaceScan>>,
}

impl ReflectiveDiscovery {
    pub fn new(
        package: impl Into<String>,
        resolver: Arc<dyn LibraryResolver>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        let package = package.into();
        Self {
            id: format!("reflect:{}", package),
            package,
            resolver,
            credentials,
            hints: Arc::new(HintTable::defaults()),
            pipeline: default_pipeline(DEFAULT_MAX_INSTANCES),
        }
    }

    pub fn with_hints(mut self, hints: Arc<HintTable>) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_pipeline(mut self, pipeline: Vec<Box<dyn SurfaceScan>>) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.pipeline.iter().map(|stage| stage.name()).collect()
    }
}

impl DiscoveryStrategy for ReflectiveDiscovery {
    fn id(&self) -> &str {
        &self.id
    }

    fn discover(&self) -> Result<Vec<MethodSpec>, DiscoveryError> {
        let module = self
            .resolver
            .import(&self.package)
            .ok_or_else(|| DiscoveryError::ModuleNotFound {
                module: self.package.clone(),
                available: self.resolver.available(),
            })?;

        let ctx = ScanContext {
            package: &self.package,
            module: &module,
            hints: &self.hints,
            credentials: self.credentials.as_ref(),
        };

        let mut specs = Vec::new();
        for stage in &self.pipeline {
            let found = stage.scan(&ctx);
            debug!(package = %self.package, stage = stage.name(), count = found.len(), "Scan stage finished");
            specs.extend(found);
        }

        info!(package = %self.package, methods = specs.len(), "Reflective discovery finished");
        Ok(specs)
    }
}
