//! `stub`: an in-memory library for dry exploration and tests.
//!
//! Its surface exercises every discovery path without touching the network:
//!
//! | Member | Kind | Notes |
//! |--------|------|-------|
//! | `echo(**kwargs)` | function | returns its keyword arguments |
//! | `add(a, b)` | function | numbers only, `TypeError` otherwise |
//! | `fail(message="boom")` | function | always raises `ValueError` |
//! | `snapshot()` | function | object exposing `raw_data` |
//! | `opaque()` | function | object with no JSON form |
//! | `Greeter(greeting="Hello")` | class | `greet(name="world")`, `shout(text)` |
//! | `Counter(start=0)` | class | `increment(by=1)`, `value()` |
//! | `Vault(secret)` | class | needs a credential, never reveals it |
//! | `config.load()` | function | zero-argument setup hook |

use bridge_domain::{
    BoundArguments, CallError, Class, Instance, Module, NativeFunction, Returned, Signature,
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

pub const IMPORT_PATH: &str = "stub";

/// Build the `stub` module
pub fn module() -> Module {
    Module::new(IMPORT_PATH)
        .with_doc("In-memory client library for exploring the bridge")
        .with_function(echo())
        .with_function(add())
        .with_function(fail())
        .with_function(snapshot())
        .with_function(opaque())
        .with_class(greeter())
        .with_class(counter())
        .with_class(vault())
        .with_submodule(Module::new("stub.config").with_function(
            NativeFunction::new("config.load", Signature::new(), |_| Ok(Returned::null()))
                .with_doc("Load ambient configuration. No-op for the stub."),
        ))
}

fn echo() -> NativeFunction {
    NativeFunction::new("echo", Signature::new().var_keyword("kwargs"), |args| {
        Ok(args.get("kwargs").cloned().unwrap_or_else(|| json!({})).into())
    })
    .with_doc("Return the keyword arguments unchanged.")
}

fn add() -> NativeFunction {
    NativeFunction::new("add", Signature::new().required("a").required("b"), |args| {
        let sum = number(args, "a")? + number(args, "b")?;
        match (args.get_i64("a"), args.get_i64("b")) {
            (Some(a), Some(b)) => Ok(json!(a + b).into()),
            _ => Ok(json!(sum).into()),
        }
    })
    .with_doc("Add two numbers.")
}

fn number(args: &BoundArguments, name: &str) -> Result<f64, CallError> {
    args.get(name).and_then(Value::as_f64).ok_or_else(|| {
        CallError::type_error(format!("argument '{}' must be a number", name))
    })
}

fn fail() -> NativeFunction {
    NativeFunction::new(
        "fail",
        Signature::new().optional("message", "boom"),
        |args| Err(CallError::value_error(args.get_str("message").unwrap_or("boom"))),
    )
    .with_doc("Always raise.")
}

fn snapshot() -> NativeFunction {
    NativeFunction::new("snapshot", Signature::new(), |_| {
        Ok(Returned::object(
            Instance::new("Snapshot")
                .with_attribute("raw_data", json!({"id": 1, "state": "ready"}))
                .with_repr("Snapshot(id=1)"),
        ))
    })
    .with_doc("Return a resource object carrying its raw JSON payload.")
}

fn opaque() -> NativeFunction {
    NativeFunction::new("opaque", Signature::new(), |_| {
        Ok(Returned::object(
            Instance::new("Handle").with_repr("<Handle fd=3>"),
        ))
    })
    .with_doc("Return an object with no JSON representation.")
}

fn greeter() -> Class {
    Class::new(
        "Greeter",
        Signature::new().optional("greeting", "Hello"),
        |args| {
            let greeting = args.get_str("greeting").unwrap_or("Hello").to_string();
            let salutation = greeting.clone();
            Ok(Returned::object(
                Instance::new("Greeter")
                    .with_method(
                        NativeFunction::new(
                            "Greeter.greet",
                            Signature::new().optional("name", "world"),
                            move |args| {
                                let name = args.get_str("name").unwrap_or("world");
                                Ok(json!(format!("{}, {}!", salutation, name)).into())
                            },
                        )
                        .with_doc("Greet someone by name."),
                    )
                    .with_method(
                        NativeFunction::new(
                            "Greeter.shout",
                            Signature::new().required("text"),
                            |args| {
                                let text = args.require_str("text").map_err(CallError::type_error)?;
                                Ok(json!(format!("{}!", text.to_uppercase())).into())
                            },
                        )
                        .with_doc("Shout the given text."),
                    )
                    .with_attribute("greeting", json!(greeting.clone()))
                    .with_repr(format!("Greeter(greeting={:?})", greeting)),
            ))
        },
    )
    .with_doc("Produces greetings.")
}

fn counter() -> Class {
    Class::new("Counter", Signature::new().optional("start", 0), |args| {
        let start = args.get_i64("start").ok_or_else(|| {
            CallError::type_error("argument 'start' must be an integer")
        })?;
        let value = Arc::new(AtomicI64::new(start));
        let incremented = Arc::clone(&value);
        let read = Arc::clone(&value);

        Ok(Returned::object(
            Instance::new("Counter")
                .with_method(
                    NativeFunction::new(
                        "Counter.increment",
                        Signature::new().optional("by", 1),
                        move |args| {
                            let by = args.get_i64("by").ok_or_else(|| {
                                CallError::type_error("argument 'by' must be an integer")
                            })?;
                            Ok(json!(incremented.fetch_add(by, Ordering::SeqCst) + by).into())
                        },
                    )
                    .with_doc("Increase the counter and return the new value."),
                )
                .with_method(NativeFunction::new("Counter.value", Signature::new(), move |_| {
                    Ok(json!(read.load(Ordering::SeqCst)).into())
                })),
        ))
    })
}

fn vault() -> Class {
    Class::new("Vault", Signature::new().required("secret"), |args| {
        let secret_len = args.get_str("secret").map(str::len);
        Ok(Returned::object(
            Instance::new("Vault")
                .with_method(
                    NativeFunction::new("Vault.is_unlocked", Signature::new(), move |_| {
                        Ok(json!(secret_len.is_some()).into())
                    })
                    .with_doc("Whether a credential was supplied."),
                )
                .with_method(NativeFunction::new(
                    "Vault.reveal_length",
                    Signature::new(),
                    move |_| {
                        secret_len
                            .map(|len| Returned::Json(json!(len)))
                            .ok_or_else(|| CallError::runtime("vault is locked"))
                    },
                ))
                .with_repr("<Vault>"),
        ))
    })
    .with_doc("Holds a credential without ever exposing it.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_domain::Member;

    fn call(module: &Module, path: &str, args: BoundArguments) -> Result<Returned, CallError> {
        module.resolve_callable(path).unwrap().invoke(&args)
    }

    fn construct(module: &Module, class: &str, args: BoundArguments) -> Returned {
        call(module, class, args).unwrap()
    }

    #[test]
    fn test_surface_layout() {
        let module = module();
        let functions: Vec<_> = module.functions().map(|(name, _)| name).collect();
        assert_eq!(functions, vec!["echo", "add", "fail", "snapshot", "opaque"]);

        let classes: Vec<_> = module.classes().map(|c| c.name().to_string()).collect();
        assert_eq!(classes, vec!["Greeter", "Counter", "Vault"]);
        assert!(matches!(module.resolve("config.load"), Ok(Member::Function(_))));
    }

    #[test]
    fn test_greeter_methods() {
        let module = module();
        let greeter = construct(&module, "Greeter", BoundArguments::new().with("greeting", "Hi"));
        let object = greeter.as_object().unwrap();

        let greet = object.method("greet").unwrap();
        let out = greet.invoke(&BoundArguments::new().with("name", "Ada")).unwrap();
        assert_eq!(out.as_json(), Some(&json!("Hi, Ada!")));

        let shout = object.method("shout").unwrap();
        let out = shout.invoke(&BoundArguments::new().with("text", "hey")).unwrap();
        assert_eq!(out.as_json(), Some(&json!("HEY!")));

        let err = shout.invoke(&BoundArguments::new().with("text", 3)).unwrap_err();
        assert_eq!(err.category, "TypeError");
    }

    #[test]
    fn test_counter_keeps_state() {
        let module = module();
        let counter = construct(&module, "Counter", BoundArguments::new().with("start", 10));
        let object = counter.as_object().unwrap();

        let increment = object.method("increment").unwrap();
        increment.invoke(&BoundArguments::new().with("by", 1)).unwrap();
        let out = increment.invoke(&BoundArguments::new().with("by", 5)).unwrap();
        assert_eq!(out.as_json(), Some(&json!(16)));

        let value = object.method("value").unwrap().invoke(&BoundArguments::new()).unwrap();
        assert_eq!(value.as_json(), Some(&json!(16)));
    }

    #[test]
    fn test_vault_never_exposes_secret() {
        let module = module();
        let vault = construct(&module, "Vault", BoundArguments::new().with("secret", "hunter2"));
        let object = vault.as_object().unwrap();

        assert_eq!(object.repr(), "<Vault>");
        let len = object
            .method("reveal_length")
            .unwrap()
            .invoke(&BoundArguments::new())
            .unwrap();
        assert_eq!(len.as_json(), Some(&json!(7)));

        let locked = construct(&module, "Vault", BoundArguments::new().with("secret", Value::Null));
        let err = locked
            .as_object()
            .unwrap()
            .method("reveal_length")
            .unwrap()
            .invoke(&BoundArguments::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "RuntimeError: vault is locked");
    }

    #[test]
    fn test_functions() {
        let module = module();

        let sum = call(&module, "add", BoundArguments::new().with("a", 2).with("b", 3)).unwrap();
        assert_eq!(sum.as_json(), Some(&json!(5)));
        let sum = call(&module, "add", BoundArguments::new().with("a", 0.5).with("b", 1)).unwrap();
        assert_eq!(sum.as_json(), Some(&json!(1.5)));
        let err = call(&module, "add", BoundArguments::new().with("a", "x").with("b", 1)).unwrap_err();
        assert_eq!(err.category, "TypeError");

        let err = call(&module, "fail", BoundArguments::new().with("message", "nope")).unwrap_err();
        assert_eq!(err.to_string(), "ValueError: nope");

        let echoed = call(
            &module,
            "echo",
            BoundArguments::new().with("kwargs", json!({"x": 1})),
        )
        .unwrap();
        assert_eq!(echoed.as_json(), Some(&json!({"x": 1})));

        let snapshot = call(&module, "snapshot", BoundArguments::new()).unwrap();
        assert!(snapshot.as_object().unwrap().attribute("raw_data").is_some());
        let opaque = call(&module, "opaque", BoundArguments::new()).unwrap();
        assert_eq!(opaque.repr(), "<Handle fd=3>");
    }
}
