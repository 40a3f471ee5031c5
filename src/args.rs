// Schema-driven argument validation with defaulting.
//
// Validation is a pure function of (descriptor, raw args). Each declared
// field is checked against its declared type; omitted optional fields take
// their default; unknown extra fields are ignored. The first failure wins.

use crate::catalog::ToolDescriptor;
use crate::error::ArgumentError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Fully-populated argument set for one tool call. Required fields are
/// always present; optional fields come from the caller or their default.
#[derive(Debug, Clone)]
pub struct ValidatedArgs(Map<String, Value>);

impl ValidatedArgs {
    /// Decode into a tool's typed argument struct. Cannot fail for a struct
    /// whose fields mirror the descriptor that produced this value.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ArgumentError> {
        serde_json::from_value(Value::Object(self.0)).map_err(|e| ArgumentError::TypeMismatch {
            field: "arguments".to_string(),
            expected: "object",
            actual: e.to_string(),
        })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }
}

/// Short runtime type name for error messages.
fn type_name(value: &Value) -> String {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
    .to_string()
}

/// Validate a raw argument bag against a tool descriptor.
pub fn validate(descriptor: &ToolDescriptor, raw: &Value) -> Result<ValidatedArgs, ArgumentError> {
    let empty = Map::new();
    let raw = raw.as_object().unwrap_or(&empty);

    let mut out = Map::new();
    for field in &descriptor.fields {
        match raw.get(field.name) {
            Some(value) => {
                if !field.field_type.matches(value) {
                    return Err(ArgumentError::TypeMismatch {
                        field: field.name.to_string(),
                        expected: field.field_type.name(),
                        actual: type_name(value),
                    });
                }
                out.insert(field.name.to_string(), value.clone());
            }
            None => match &field.default {
                Some(default) => {
                    out.insert(field.name.to_string(), default.clone());
                }
                None if field.required => {
                    return Err(ArgumentError::MissingField(field.name.to_string()));
                }
                None => {}
            },
        }
    }

    Ok(ValidatedArgs(out))
}
