//! Parameter signatures and payload binding
//!
//! A [`Signature`] is the explicit descriptor list stored on every
//! [`MethodSpec`](super::MethodSpec) at discovery time. Binding a JSON payload
//! against it is a pure routine that never touches the underlying callable:
//!
//! ```text
//! payload {"name": "alice"}          Signature [name="world", loud=false]
//!              │                                   │
//!              └──────────── bind() ───────────────┘
//!                               │
//!                 BoundArguments {name: "alice", loud: false}
//! ```
//!
//! Binding is keyword-only: payloads are mappings, so positional-only
//! calling conventions of the wrapped library never leak into the catalog.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// How a parameter accepts its value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Regular named parameter
    PositionalOrKeyword,
    /// Named parameter that cannot be passed positionally
    KeywordOnly,
    /// Collects extra positional values (`*args`), always bound to `[]`
    VarPositional,
    /// Collects unknown keywords (`**kwargs`) into an object
    VarKeyword,
}

impl ParameterKind {
    pub fn is_variadic(&self) -> bool {
        matches!(self, ParameterKind::VarPositional | ParameterKind::VarKeyword)
    }
}

/// One entry of a [`Signature`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    /// Declared default; `None` means the parameter has no default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl Parameter {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::PositionalOrKeyword,
            default: None,
        }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind: ParameterKind::PositionalOrKeyword,
            default: Some(default.into()),
        }
    }

    pub fn with_kind(mut self, kind: ParameterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Required parameters have no default and are not variadic
    pub fn is_required(&self) -> bool {
        self.default.is_none() && !self.kind.is_variadic()
    }
}

/// Error produced when a payload does not match a signature
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("got an unexpected keyword argument '{0}'")]
    UnexpectedArgument(String),

    #[error("missing a required argument: '{0}'")]
    MissingArgument(String),
}

/// Ordered parameter list of a callable
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add a parameter without a default
    pub fn required(self, name: impl Into<String>) -> Self {
        self.with_parameter(Parameter::required(name))
    }

    /// Add a parameter with a default value
    pub fn optional(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.with_parameter(Parameter::optional(name, default))
    }

    /// Add a `*args`-style parameter
    pub fn var_positional(self, name: impl Into<String>) -> Self {
        self.with_parameter(Parameter {
            name: name.into(),
            kind: ParameterKind::VarPositional,
            default: None,
        })
    }

    /// Add a `**kwargs`-style parameter
    pub fn var_keyword(self, name: impl Into<String>) -> Self {
        self.with_parameter(Parameter {
            name: name.into(),
            kind: ParameterKind::VarKeyword,
            default: None,
        })
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// First parameter that can receive a single positional value.
    ///
    /// Used when a constructor is called with one credential argument.
    pub fn first_positional(&self) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.kind == ParameterKind::PositionalOrKeyword)
    }

    /// True when every parameter is either defaulted or variadic
    pub fn is_zero_arg_constructible(&self) -> bool {
        self.parameters.iter().all(|p| !p.is_required())
    }

    /// Bind a keyword payload, falling back to declared defaults.
    ///
    /// Keys that name no parameter are collected by a `VarKeyword` parameter
    /// when one exists and rejected otherwise. Variadic parameters always
    /// appear in the result (`[]` / `{}` when nothing was collected).
    pub fn bind(&self, payload: &Map<String, Value>) -> Result<BoundArguments, BindError> {
        let var_keyword = self
            .parameters
            .iter()
            .find(|p| p.kind == ParameterKind::VarKeyword);

        let mut extra = Map::new();
        for (key, value) in payload {
            let named = self
                .parameters
                .iter()
                .any(|p| !p.kind.is_variadic() && p.name == *key);
            if named {
                continue;
            }
            if var_keyword.is_some() {
                extra.insert(key.clone(), value.clone());
            } else {
                return Err(BindError::UnexpectedArgument(key.clone()));
            }
        }

        let mut arguments = IndexMap::with_capacity(self.parameters.len());
        for param in &self.parameters {
            let value = match param.kind {
                ParameterKind::VarPositional => Value::Array(Vec::new()),
                ParameterKind::VarKeyword => Value::Object(std::mem::take(&mut extra)),
                _ => match payload.get(&param.name).or(param.default.as_ref()) {
                    Some(value) => value.clone(),
                    None => return Err(BindError::MissingArgument(param.name.clone())),
                },
            };
            arguments.insert(param.name.clone(), value);
        }

        Ok(BoundArguments { arguments })
    }
}

/// Fully resolved arguments in signature order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundArguments {
    arguments: IndexMap<String, Value>,
}

impl BoundArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// String argument; `null` and non-strings yield `None`
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    pub fn require_str(&self, name: &str) -> Result<&str, String> {
        self.get_str(name)
            .ok_or_else(|| format!("argument '{}' must be a string", name))
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|v| v.as_i64())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.arguments.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// `k=v` pairs with JSON-rendered values, e.g. `name="alice", loud=false`
    pub fn render(&self) -> String {
        self.arguments
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn test_bind_applies_defaults() {
        let sig = Signature::new().required("name").optional("loud", false);
        let bound = sig.bind(&payload(json!({"name": "alice"}))).unwrap();

        assert_eq!(bound.get("name"), Some(&json!("alice")));
        assert_eq!(bound.get("loud"), Some(&json!(false)));
        assert_eq!(bound.render(), "name=\"alice\", loud=false");
    }

    #[test]
    fn test_bind_rejects_unknown_key() {
        let sig = Signature::new().required("name");
        let err = sig.bind(&payload(json!({"nmae": "alice"}))).unwrap_err();
        assert_eq!(err, BindError::UnexpectedArgument("nmae".into()));
        assert_eq!(err.to_string(), "got an unexpected keyword argument 'nmae'");
    }

    #[test]
    fn test_bind_reports_missing_required() {
        let sig = Signature::new().required("owner").required("repo");
        let err = sig.bind(&payload(json!({"owner": "octo"}))).unwrap_err();
        assert_eq!(err, BindError::MissingArgument("repo".into()));
    }

    #[test]
    fn test_var_keyword_collects_extras() {
        let sig = Signature::new().optional("prefix", "").var_keyword("fields");
        let bound = sig
            .bind(&payload(json!({"prefix": ">", "a": 1, "b": "two"})))
            .unwrap();

        assert_eq!(bound.get("prefix"), Some(&json!(">")));
        assert_eq!(bound.get("fields"), Some(&json!({"a": 1, "b": "two"})));
    }

    #[test]
    fn test_variadic_names_are_not_bindable_keys() {
        let sig = Signature::new().var_positional("args");
        let err = sig.bind(&payload(json!({"args": [1, 2]}))).unwrap_err();
        assert_eq!(err, BindError::UnexpectedArgument("args".into()));

        let bound = sig.bind(&Map::new()).unwrap();
        assert_eq!(bound.get("args"), Some(&json!([])));
    }

    #[test]
    fn test_binding_is_idempotent() {
        let sig = Signature::new()
            .required("q")
            .optional("per_page", 10)
            .var_keyword("extra");
        let input = payload(json!({"q": "rust", "sort": "stars"}));

        let first = sig.bind(&input).unwrap();
        let second = sig.bind(&input).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.render(), second.render());
    }

    #[test]
    fn test_zero_arg_constructible() {
        assert!(Signature::new().is_zero_arg_constructible());
        assert!(
            Signature::new()
                .optional("start", 0)
                .var_positional("args")
                .var_keyword("kwargs")
                .is_zero_arg_constructible()
        );
        assert!(!Signature::new().required("token").is_zero_arg_constructible());
    }

    #[test]
    fn test_first_positional_skips_keyword_only() {
        let sig = Signature::new()
            .with_parameter(Parameter::required("timeout").with_kind(ParameterKind::KeywordOnly))
            .optional("token", Value::Null);
        assert_eq!(sig.first_positional().unwrap().name, "token");
    }
}
