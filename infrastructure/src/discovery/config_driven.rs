//! Config-driven discovery: providers declared in the config file
//!
//! Unlike reflective discovery, every failure here is fatal. A provider
//! that names a missing library, constructor or method is a configuration
//! error and aborts the catalog build.

use super::{ConstructArgs, invoke_constructor};
use crate::config::{FileProviderConfig, parse_env_auth};
use bridge_application::{CredentialSource, DiscoveryError, DiscoveryStrategy, LibraryResolver};
use bridge_domain::{ClientObject, Member, MethodSpec, Returned};
use secrecy::ExposeSecret;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct ConfigDiscovery {
    providers: Vec<FileProviderConfig>,
    resolver: Arc<dyn LibraryResolver>,
    credentials: Arc<dyn CredentialSource>,
}

impl ConfigDiscovery {
    pub fn new(
        providers: Vec<FileProviderConfig>,
        resolver: Arc<dyn LibraryResolver>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            providers,
            resolver,
            credentials,
        }
    }

    fn build_client(&self, provider: &FileProviderConfig) -> Result<Arc<dyn ClientObject>, DiscoveryError> {
        let name = &provider.import;
        let module = self
            .resolver
            .import(&provider.import)
            .ok_or_else(|| DiscoveryError::ModuleNotFound {
                module: provider.import.clone(),
                available: self.resolver.available(),
            })?;

        let member = module
            .resolve(&provider.construct)
            .map_err(|source| DiscoveryError::Resolve {
                provider: name.clone(),
                source,
            })?;

        let credential = match &provider.auth {
            None => None,
            Some(auth) => {
                let variable = parse_env_auth(auth).ok_or_else(|| DiscoveryError::InvalidAuth {
                    provider: name.clone(),
                    auth: auth.clone(),
                })?;
                let value = match self.credentials.lookup(variable) {
                    Some(secret) => Value::String(secret.expose_secret().to_string()),
                    None => {
                        warn!(provider = %name, variable, "Credential not set, constructing with null");
                        Value::Null
                    }
                };
                Some(value)
            }
        };

        let built = match (&member, credential) {
            (Member::Value(value), None) => value.clone(),
            (member, credential) => {
                let ctor = member.as_callable().ok_or_else(|| DiscoveryError::Resolve {
                    provider: name.clone(),
                    source: bridge_domain::ResolveError::NotCallable(format!(
                        "{}.{}",
                        provider.import, provider.construct
                    )),
                })?;
                let args = credential.map_or(ConstructArgs::Defaults, ConstructArgs::First);
                invoke_constructor(ctor.as_ref(), args).map_err(|source| {
                    DiscoveryError::Construction {
                        provider: name.clone(),
                        source,
                    }
                })?
            }
        };

        match built {
            Returned::Object(client) => Ok(client),
            other => Err(DiscoveryError::NotAnObject {
                provider: name.clone(),
                found: other.type_name().to_string(),
            }),
        }
    }

    fn discover_provider(&self, provider: &FileProviderConfig) -> Result<Vec<MethodSpec>, DiscoveryError> {
        let client = self.build_client(provider)?;
        debug!(provider = %provider.import, client = client.type_name(), "Client constructed");

        provider
            .methods
            .iter()
            .map(|method| {
                let target = client.method(&method.name).ok_or_else(|| {
                    DiscoveryError::MethodNotFound {
                        provider: provider.import.clone(),
                        method: method.name.clone(),
                    }
                })?;
                Ok(MethodSpec::new(method.tool_name(), target)
                    .with_mode(method.mode)
                    .with_arg_hints(method.args.clone()))
            })
            .collect()
    }
}

impl DiscoveryStrategy for ConfigDiscovery {
    fn id(&self) -> &str {
        "config"
    }

    fn discover(&self) -> Result<Vec<MethodSpec>, DiscoveryError> {
        let mut specs = Vec::new();
        for provider in &self.providers {
            specs.extend(self.discover_provider(provider)?);
        }
        info!(providers = self.providers.len(), methods = specs.len(), "Config discovery finished");
        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileMethodConfig;
    use crate::credentials::StaticCredentials;
    use crate::libraries::LibraryCatalog;
    use bridge_application::NoCredentials;
    use bridge_domain::{BoundArguments, Instance, Mode, Module};
    use serde_json::json;

    fn provider(construct: &str, auth: Option<&str>, methods: &[&str]) -> FileProviderConfig {
        FileProviderConfig {
            import: "stub".into(),
            construct: construct.into(),
            auth: auth.map(str::to_string),
            methods: methods
                .iter()
                .map(|name| FileMethodConfig {
                    name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn discovery(providers: Vec<FileProviderConfig>, credentials: Arc<dyn CredentialSource>) -> ConfigDiscovery {
        ConfigDiscovery::new(providers, Arc::new(LibraryCatalog::builtin()), credentials)
    }

    #[test]
    fn test_declared_methods_with_rename_mode_and_hints() {
        let mut p = provider("Greeter", None, &["greet", "shout"]);
        p.methods[1].rename = Some("yell".into());
        p.methods[1].mode = Mode::Write;
        p.methods[1].args.insert("text".into(), json!({"type": "string"}));

        let specs = discovery(vec![p], Arc::new(NoCredentials)).discover().unwrap();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].tool_name(), "greet");
        assert_eq!(specs[0].mode(), Mode::Read);
        assert_eq!(specs[0].doc(), Some("Greet someone by name."));
        assert_eq!(specs[1].tool_name(), "yell");
        assert!(specs[1].is_write());
        assert_eq!(specs[1].arg_hints()["text"]["type"], "string");
    }

    #[test]
    fn test_auth_credential_bound_to_first_parameter() {
        let p = provider("Vault", Some("env: VAULT_TOKEN"), &["reveal_length"]);
        let credentials = Arc::new(StaticCredentials::new().with("VAULT_TOKEN", "s3cret"));

        let specs = discovery(vec![p], credentials).discover().unwrap();
        let out = specs[0].target().invoke(&BoundArguments::new()).unwrap();
        assert_eq!(out.as_json(), Some(&json!(6)));
    }

    #[test]
    fn test_missing_credential_passes_null() {
        let p = provider("Vault", Some("env:VAULT_TOKEN"), &["is_unlocked"]);

        let specs = discovery(vec![p], Arc::new(NoCredentials)).discover().unwrap();
        let out = specs[0].target().invoke(&BoundArguments::new()).unwrap();
        assert_eq!(out.as_json(), Some(&json!(false)));
    }

    #[test]
    fn test_configuration_errors_are_fatal() {
        let cases = vec![
            (
                FileProviderConfig {
                    import: "nope".into(),
                    ..provider("Greeter", None, &[])
                },
                "ModuleNotFound",
            ),
            (provider("Missing", None, &[]), "Resolve"),
            (provider("Greeter", Some("vault:x"), &[]), "InvalidAuth"),
            (provider("Vault", None, &[]), "Construction"),
            (provider("Greeter", None, &["wave"]), "MethodNotFound"),
        ];

        for (p, expected) in cases {
            let err = discovery(vec![p], Arc::new(NoCredentials)).discover().unwrap_err();
            let variant = match err {
                DiscoveryError::ModuleNotFound { .. } => "ModuleNotFound",
                DiscoveryError::Resolve { .. } => "Resolve",
                DiscoveryError::InvalidAuth { .. } => "InvalidAuth",
                DiscoveryError::Construction { .. } => "Construction",
                DiscoveryError::NotAnObject { .. } => "NotAnObject",
                DiscoveryError::MethodNotFound { .. } => "MethodNotFound",
            };
            assert_eq!(variant, expected);
        }
    }

    #[test]
    fn test_function_returning_non_object_is_rejected() {
        let p = provider("add", None, &[]);
        // add(a, b) cannot be called without arguments
        assert!(matches!(
            discovery(vec![p], Arc::new(NoCredentials)).discover(),
            Err(DiscoveryError::Construction { .. })
        ));

        let p = provider("snapshot", None, &[]);
        assert!(discovery(vec![p], Arc::new(NoCredentials)).discover().is_ok());

        let p = provider("config.load", None, &[]);
        assert!(matches!(
            discovery(vec![p], Arc::new(NoCredentials)).discover(),
            Err(DiscoveryError::NotAnObject { ref found, .. }) if found == "json"
        ));
    }

    #[test]
    fn test_module_level_singleton_used_as_is() {
        let client = Instance::new("Client").with_method(bridge_domain::NativeFunction::new(
            "Client.ping",
            bridge_domain::Signature::new(),
            |_| Ok(json!("pong").into()),
        ));
        let resolver = LibraryCatalog::new()
            .with_module(Module::new("svc").with_value("default_client", Returned::object(client)));
        let p = FileProviderConfig {
            import: "svc".into(),
            construct: "default_client".into(),
            auth: None,
            methods: vec![FileMethodConfig {
                name: "ping".into(),
                ..Default::default()
            }],
        };

        let specs = ConfigDiscovery::new(vec![p], Arc::new(resolver), Arc::new(NoCredentials))
            .discover()
            .unwrap();
        assert_eq!(specs[0].tool_name(), "ping");
    }
}
