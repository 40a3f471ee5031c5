// Tool descriptors: pure data driving both the advertised schemas and
// argument validation, so the two cannot drift apart.

use crate::protocol::ToolSchema;
use serde_json::{json, Value};

/// Declared type of a tool argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    Text,
    TextList,
}

impl FieldType {
    /// JSON Schema type name, also used in validation error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "string",
            Self::TextList => "array of strings",
        }
    }

    /// Does this JSON value have the declared runtime type?
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::Text => value.is_string(),
            Self::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// One declared argument of a tool.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub default: Option<Value>,
}

impl FieldSpec {
    pub fn required(name: &'static str, field_type: FieldType, description: &'static str) -> Self {
        Self {
            name,
            description,
            field_type,
            required: true,
            default: None,
        }
    }

    pub fn optional(
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
        default: Value,
    ) -> Self {
        Self {
            name,
            description,
            field_type,
            required: false,
            default: Some(default),
        }
    }

    fn json_schema(&self) -> Value {
        let mut obj = serde_json::Map::new();
        match self.field_type {
            FieldType::Number => {
                obj.insert("type".to_string(), json!("number"));
            }
            FieldType::Text => {
                obj.insert("type".to_string(), json!("string"));
            }
            FieldType::TextList => {
                obj.insert("type".to_string(), json!("array"));
                obj.insert("items".to_string(), json!({ "type": "string" }));
            }
        }
        obj.insert("description".to_string(), json!(self.description));
        if let Some(default) = &self.default {
            obj.insert("default".to_string(), default.clone());
        }
        Value::Object(obj)
    }
}

/// Static description of one callable tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl ToolDescriptor {
    /// Render the descriptor as an MCP tool schema.
    pub fn to_schema(&self) -> ToolSchema {
        let mut properties = serde_json::Map::new();
        for field in &self.fields {
            properties.insert(field.name.to_string(), field.json_schema());
        }
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();

        ToolSchema {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }
}
