//! Result normalization
//!
//! Successful results are turned into JSON by an ordered chain of
//! [`ResultConverter`]s. Each converter either produces an encodable value or
//! declines; when all decline, the result is rendered as text and the outcome
//! carries a warning so the caller knows fidelity was lost.
//!
//! ```text
//! Returned ──▶ NativeJson ──▶ RawAttribute(raw_data, raw_attributes) ──▶ repr + warning
//!                 │                    │
//!              Success              Success
//! ```

use bridge_domain::{Outcome, Returned};
use serde_json::Value;

/// Default attribute names carrying a result's primitive representation
pub const DEFAULT_RAW_ATTRIBUTES: &[&str] = &["raw_data", "raw_attributes"];

/// One step of the normalization chain
pub trait ResultConverter: Send + Sync {
    fn name(&self) -> &str;

    /// Produce an encodable value, or `None` to let the next converter try
    fn convert(&self, value: &Returned) -> Option<Value>;
}

/// Passes natively encodable values through unchanged
pub struct NativeJson;

impl ResultConverter for NativeJson {
    fn name(&self) -> &str {
        "native_json"
    }

    fn convert(&self, value: &Returned) -> Option<Value> {
        value.as_json().cloned()
    }
}

/// Uses a library's raw-data attribute convention on result objects.
///
/// Attributes are tried in order; the first one holding a non-null JSON
/// value wins. Attributes that are themselves objects are not encodable and
/// are skipped.
pub struct RawAttribute {
    attributes: Vec<String>,
}

impl RawAttribute {
    pub fn new(attributes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for RawAttribute {
    fn default() -> Self {
        Self::new(DEFAULT_RAW_ATTRIBUTES.iter().copied())
    }
}

impl ResultConverter for RawAttribute {
    fn name(&self) -> &str {
        "raw_attribute"
    }

    fn convert(&self, value: &Returned) -> Option<Value> {
        let object = value.as_object()?;
        self.attributes.iter().find_map(|name| match object.attribute(name) {
            Some(Returned::Json(Value::Null)) | Some(Returned::Object(_)) | None => None,
            Some(Returned::Json(raw)) => Some(raw),
        })
    }
}

/// Ordered converter chain with a textual fallback
pub struct ResultNormalizer {
    converters: Vec<Box<dyn ResultConverter>>,
}

impl ResultNormalizer {
    /// Chain with no converters; every result degrades to text
    pub fn empty() -> Self {
        Self {
            converters: Vec::new(),
        }
    }

    /// Append a converter to the end of the chain
    pub fn with_converter(mut self, converter: impl ResultConverter + 'static) -> Self {
        self.converters.push(Box::new(converter));
        self
    }

    pub fn converter_names(&self) -> Vec<&str> {
        self.converters.iter().map(|c| c.name()).collect()
    }

    pub fn normalize(&self, value: &Returned) -> Outcome {
        for converter in &self.converters {
            if let Some(data) = converter.convert(value) {
                return Outcome::Success { data };
            }
        }

        tracing::debug!(
            result_type = value.type_name(),
            "No converter accepted result, falling back to text"
        );
        Outcome::Degraded {
            data: value.repr(),
            warning: format!(
                "Result not fully JSON-serializable: {} has no JSON representation",
                value.type_name()
            ),
        }
    }
}

impl Default for ResultNormalizer {
    fn default() -> Self {
        Self::empty()
            .with_converter(NativeJson)
            .with_converter(RawAttribute::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_domain::Instance;
    use serde_json::json;

    #[test]
    fn test_native_json_passes_through() {
        let out = ResultNormalizer::default().normalize(&Returned::Json(json!([1, "two"])));
        assert_eq!(out, Outcome::Success { data: json!([1, "two"]) });
    }

    #[test]
    fn test_raw_data_attribute_used_without_warning() {
        let value = Returned::object(
            Instance::new("Snapshot").with_attribute("raw_data", json!({"a": 1})),
        );
        let out = ResultNormalizer::default().normalize(&value);
        assert_eq!(out, Outcome::Success { data: json!({"a": 1}) });
        assert!(out.warning().is_none());
    }

    #[test]
    fn test_raw_attributes_fallback_when_raw_data_null() {
        let value = Returned::object(
            Instance::new("Blob")
                .with_attribute("raw_data", Value::Null)
                .with_attribute("raw_attributes", json!({"name": "x"})),
        );
        let out = ResultNormalizer::default().normalize(&value);
        assert_eq!(out, Outcome::Success { data: json!({"name": "x"}) });
    }

    #[test]
    fn test_object_valued_raw_attribute_is_not_encodable() {
        let nested = Returned::object(Instance::new("Inner"));
        let value = Returned::object(Instance::new("Outer").with_attribute("raw_data", nested));
        let out = ResultNormalizer::default().normalize(&value);
        assert!(matches!(out, Outcome::Degraded { ref data, .. } if data == "<Outer object>"));
    }

    #[test]
    fn test_opaque_object_degrades_with_warning() {
        let value = Returned::object(Instance::new("Opaque").with_repr("Opaque(id=7)"));
        let out = ResultNormalizer::default().normalize(&value);

        match out {
            Outcome::Degraded { data, warning } => {
                assert_eq!(data, "Opaque(id=7)");
                assert!(warning.contains("Opaque"));
            }
            other => panic!("expected degraded outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_custom_attribute_list() {
        let normalizer = ResultNormalizer::empty()
            .with_converter(NativeJson)
            .with_converter(RawAttribute::new(["to_dict"]));
        let value = Returned::object(
            Instance::new("Pod")
                .with_attribute("raw_data", json!({"ignored": true}))
                .with_attribute("to_dict", json!({"kind": "Pod"})),
        );

        assert_eq!(normalizer.converter_names(), vec!["native_json", "raw_attribute"]);
        assert_eq!(
            normalizer.normalize(&value),
            Outcome::Success { data: json!({"kind": "Pod"}) }
        );
    }
}
