//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] describing each method spec
//! as `{name, description, inputSchema}`.
//!
//! Parameter types come from the `type` arg hint when present, otherwise
//! from the JSON type of the declared default. Parameters with neither are
//! left untyped. The reserved `dry_run` and `confirm` flags are always
//! listed.

use bridge_application::{CONFIRM_KEY, DRY_RUN_KEY, ToolSchemaPort};
use bridge_domain::{MethodSpec, Parameter, ParameterKind};
use serde_json::{Map, Value, json};

pub struct JsonSchemaToolConverter;

impl JsonSchemaToolConverter {
    fn hint_type(hint: &Value) -> Option<&'static str> {
        let declared = hint.get("type").and_then(Value::as_str)?;
        Some(match declared.to_ascii_lowercase().as_str() {
            "string" | "str" | "path" => "string",
            "number" | "float" => "number",
            "integer" | "int" => "integer",
            "boolean" | "bool" => "boolean",
            "array" | "list" => "array",
            "object" | "dict" => "object",
            _ => "string",
        })
    }

    fn default_type(default: &Value) -> Option<&'static str> {
        match default {
            Value::Null => None,
            Value::Bool(_) => Some("boolean"),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some("integer"),
            Value::Number(_) => Some("number"),
            Value::String(_) => Some("string"),
            Value::Array(_) => Some("array"),
            Value::Object(_) => Some("object"),
        }
    }

    fn parameter_schema(param: &Parameter, hint: Option<&Value>) -> Value {
        let mut prop = Map::new();

        let schema_type = hint
            .and_then(Self::hint_type)
            .or_else(|| param.default.as_ref().and_then(Self::default_type));
        if let Some(schema_type) = schema_type {
            prop.insert("type".to_string(), json!(schema_type));
        }
        if let Some(description) = hint.and_then(|h| h.get("description")).and_then(Value::as_str) {
            prop.insert("description".to_string(), json!(description));
        }
        if let Some(default) = &param.default {
            prop.insert("default".to_string(), default.clone());
        }

        Value::Object(prop)
    }

    fn description(spec: &MethodSpec) -> String {
        let doc = spec.doc().unwrap_or_default();
        if !spec.is_write() {
            return doc.to_string();
        }
        let note = "Write mode: pass confirm=true to execute or dry_run=true to preview.";
        if doc.is_empty() {
            note.to_string()
        } else {
            format!("{}\n\n{}", doc, note)
        }
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn method_to_schema(&self, spec: &MethodSpec) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        let mut open = false;

        for param in spec.signature().parameters() {
            match param.kind {
                ParameterKind::VarKeyword => open = true,
                ParameterKind::VarPositional => {}
                ParameterKind::PositionalOrKeyword | ParameterKind::KeywordOnly => {
                    let hint = spec.arg_hints().get(&param.name);
                    properties.insert(param.name.clone(), Self::parameter_schema(param, hint));
                    if param.is_required() {
                        required.push(json!(param.name));
                    }
                }
            }
        }

        properties.insert(
            DRY_RUN_KEY.to_string(),
            json!({
                "type": "boolean",
                "description": "Bind the arguments and report the call without executing it",
            }),
        );
        properties.insert(
            CONFIRM_KEY.to_string(),
            json!({
                "type": "boolean",
                "description": "Acknowledge a write-mode call",
            }),
        );

        json!({
            "name": spec.tool_name(),
            "description": Self::description(spec),
            "inputSchema": {
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": open,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_domain::{ArgHints, Catalog, Mode, NativeFunction, Returned, Signature};

    fn spec(name: &str, signature: Signature) -> MethodSpec {
        let target = NativeFunction::new(name, signature, |_| Ok(Returned::null())).with_doc("Does things.");
        MethodSpec::new(name, target.into_arc())
    }

    #[test]
    fn test_method_to_schema() {
        let mut hints = ArgHints::new();
        hints.insert("login".into(), json!({"type": "str", "description": "GitHub login"}));

        let spec = spec(
            "gh_get_user",
            Signature::new()
                .required("login")
                .optional("per_page", 30)
                .optional("ratio", 0.5)
                .optional("since", Value::Null),
        )
        .with_arg_hints(hints);

        let schema = JsonSchemaToolConverter.method_to_schema(&spec);
        assert_eq!(schema["name"], "gh_get_user");
        assert_eq!(schema["description"], "Does things.");

        let input = &schema["inputSchema"];
        assert_eq!(input["type"], "object");
        assert_eq!(input["properties"]["login"]["type"], "string");
        assert_eq!(input["properties"]["login"]["description"], "GitHub login");
        assert_eq!(input["properties"]["per_page"]["type"], "integer");
        assert_eq!(input["properties"]["per_page"]["default"], 30);
        assert_eq!(input["properties"]["ratio"]["type"], "number");
        assert!(input["properties"]["since"].get("type").is_none());
        assert_eq!(input["required"], json!(["login"]));
        assert_eq!(input["additionalProperties"], false);
        assert_eq!(input["properties"]["dry_run"]["type"], "boolean");
        assert_eq!(input["properties"]["confirm"]["type"], "boolean");
    }

    #[test]
    fn test_var_keyword_opens_schema() {
        let spec = spec("echo", Signature::new().var_positional("args").var_keyword("kwargs"));
        let schema = JsonSchemaToolConverter.method_to_schema(&spec);

        let input = &schema["inputSchema"];
        assert_eq!(input["additionalProperties"], true);
        assert!(input["properties"].get("args").is_none());
        assert!(input["properties"].get("kwargs").is_none());
    }

    #[test]
    fn test_write_description_mentions_confirmation() {
        let spec = spec("create_issue", Signature::new()).with_mode(Mode::Write);
        let schema = JsonSchemaToolConverter.method_to_schema(&spec);
        let description = schema["description"].as_str().unwrap();
        assert!(description.starts_with("Does things."));
        assert!(description.contains("confirm=true"));
    }

    #[test]
    fn test_catalog_schema_keeps_catalog_order() {
        let catalog = Catalog::new()
            .register(spec("b_tool", Signature::new()))
            .register(spec("a_tool", Signature::new()));

        let tools = JsonSchemaToolConverter.catalog_schema(&catalog);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "b_tool");
        assert_eq!(tools[1]["name"], "a_tool");
    }
}
