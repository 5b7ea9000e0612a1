//! Discovery strategies
//!
//! - [`ConfigDiscovery`]: providers and methods declared in the config file
//! - [`ReflectiveDiscovery`]: scan a library's registered surface through a
//!   pipeline of [`SurfaceScan`] stages
//!
//! Both construct clients the same way: a constructor is called either with
//! no arguments (defaults applied) or with a single value bound to its first
//! positional parameter.

mod config_driven;
mod hints;
mod reflective;

pub use config_driven::ConfigDiscovery;
pub use hints::{ClientHint, HintTable};
pub use reflective::{
    HintedClient, ReflectiveDiscovery, ScanContext, SurfaceScan, TopLevelFunctions,
    ZeroArgClasses, default_pipeline,
};

use bridge_domain::{
    CallError, ClientObject, Invocable, MethodSpec, Returned, is_public, tool_name,
};
use serde_json::{Map, Value};
use std::panic::{self, AssertUnwindSafe};

/// Arguments for a constructor call
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ConstructArgs {
    /// No arguments; declared defaults apply
    Defaults,
    /// One value bound to the first positional parameter
    First(Value),
}

/// Call a constructor, turning binding failures and panics into [`CallError`]s
pub(crate) fn invoke_constructor(
    ctor: &dyn Invocable,
    args: ConstructArgs,
) -> Result<Returned, CallError> {
    let mut payload = Map::new();
    if let ConstructArgs::First(value) = args {
        let first = ctor.signature().first_positional().ok_or_else(|| {
            CallError::type_error(format!("{}() takes no positional arguments", ctor.qualname()))
        })?;
        payload.insert(first.name.clone(), value);
    }

    let bound = ctor
        .signature()
        .bind(&payload)
        .map_err(|e| CallError::type_error(format!("{}() {}", ctor.qualname(), e)))?;

    panic::catch_unwind(AssertUnwindSafe(|| ctor.invoke(&bound)))
        .unwrap_or_else(|_| Err(CallError::new("Panic", format!("{}() panicked", ctor.qualname()))))
}

/// One spec per public method of a client object, named `{pkg}_{Type}_{method}`
pub(crate) fn methods_of(package: &str, object: &dyn ClientObject) -> Vec<MethodSpec> {
    object
        .method_names()
        .into_iter()
        .filter(|name| is_public(name))
        .filter_map(|name| {
            let target = object.method(&name)?;
            let qualname = format!("{}.{}", object.type_name(), name);
            Some(MethodSpec::new(tool_name(package, &qualname), target))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_domain::{Instance, NativeFunction, Signature};
    use serde_json::json;

    fn ctor() -> NativeFunction {
        NativeFunction::new(
            "Client",
            Signature::new().optional("token", Value::Null).optional("region", "eu"),
            |args| {
                Ok(Returned::object(
                    Instance::new("Client")
                        .with_attribute("token", args.get("token").cloned().unwrap_or_default())
                        .with_attribute("region", args.get("region").cloned().unwrap_or_default()),
                ))
            },
        )
    }

    #[test]
    fn test_invoke_constructor_with_defaults() {
        let client = invoke_constructor(&ctor(), ConstructArgs::Defaults).unwrap();
        let object = client.as_object().unwrap();
        assert_eq!(object.attribute("token").unwrap().as_json(), Some(&Value::Null));
        assert_eq!(object.attribute("region").unwrap().as_json(), Some(&json!("eu")));
    }

    #[test]
    fn test_invoke_constructor_binds_first_parameter() {
        let client = invoke_constructor(&ctor(), ConstructArgs::First(json!("t0k"))).unwrap();
        let object = client.as_object().unwrap();
        assert_eq!(object.attribute("token").unwrap().as_json(), Some(&json!("t0k")));
        assert_eq!(object.attribute("region").unwrap().as_json(), Some(&json!("eu")));
    }

    #[test]
    fn test_invoke_constructor_reports_missing_arguments() {
        let strict = NativeFunction::new("Strict", Signature::new().required("url"), |_| {
            Ok(Returned::null())
        });
        let err = invoke_constructor(&strict, ConstructArgs::Defaults).unwrap_err();
        assert_eq!(err.category, "TypeError");
        assert!(err.message.contains("url"));
    }

    #[test]
    fn test_invoke_constructor_catches_panics() {
        let bad = NativeFunction::new("Bad", Signature::new(), |_| -> Result<Returned, CallError> {
            panic!("no")
        });
        let err = invoke_constructor(&bad, ConstructArgs::Defaults).unwrap_err();
        assert_eq!(err.category, "Panic");
    }

    #[test]
    fn test_methods_of_skips_private() {
        let object = Instance::new("Client")
            .with_method(NativeFunction::new("Client.list", Signature::new(), |_| {
                Ok(Returned::null())
            }))
            .with_method(NativeFunction::new("Client._internal", Signature::new(), |_| {
                Ok(Returned::null())
            }));

        let names: Vec<_> = methods_of("my.pkg", &object)
            .iter()
            .map(|spec| spec.tool_name().to_string())
            .collect();
        assert_eq!(names, vec!["my_pkg_Client_list"]);
    }
}
