//! Contract schema description and structural validation.
//!
//! A [`ContractSchema`] declares the shape a structured result must satisfy:
//! which fields exist, which are required, their JSON types, and any
//! enumerated value sets. Validation is structural only; typed decoding is
//! layered on top by [`crate::typed::TypedContract`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use std::fmt;

use crate::error::ContractViolation;

/// Declared JSON type of a contract field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// JSON string.
    String,
    /// JSON integer.
    Integer,
    /// JSON number; integers are accepted here too.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
    /// Any JSON value.
    Any,
}

impl FieldType {
    /// Whether `value` satisfies this declared type.
    #[must_use]
    pub fn matches(&self, value: &JsonValue) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Any => true,
        }
    }

    fn json_schema_name(&self) -> Option<&'static str> {
        match self {
            Self::String => Some("string"),
            Self::Integer => Some("integer"),
            Self::Number => Some("number"),
            Self::Boolean => Some("boolean"),
            Self::Array => Some("array"),
            Self::Object => Some("object"),
            Self::Any => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Number => write!(f, "number"),
            Self::Boolean => write!(f, "boolean"),
            Self::Array => write!(f, "array"),
            Self::Object => write!(f, "object"),
            Self::Any => write!(f, "any"),
        }
    }
}

/// The JSON type name of a value, for diagnostics.
#[must_use]
pub fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Schema for one contract field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Declared JSON type.
    pub kind: FieldType,
    /// Human-readable description, forwarded to the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Permitted values, if the field is an enumeration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<JsonValue>>,
}

impl FieldSchema {
    /// Create a field schema of the given type.
    #[must_use]
    pub fn new(kind: FieldType) -> Self {
        Self {
            kind,
            description: None,
            enum_values: None,
        }
    }

    /// A string field.
    #[must_use]
    pub fn string() -> Self {
        Self::new(FieldType::String)
    }

    /// An integer field.
    #[must_use]
    pub fn integer() -> Self {
        Self::new(FieldType::Integer)
    }

    /// A numeric field.
    #[must_use]
    pub fn number() -> Self {
        Self::new(FieldType::Number)
    }

    /// A boolean field.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(FieldType::Boolean)
    }

    /// An array field.
    #[must_use]
    pub fn array() -> Self {
        Self::new(FieldType::Array)
    }

    /// An object field.
    #[must_use]
    pub fn object() -> Self {
        Self::new(FieldType::Object)
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the field to an enumerated value set.
    #[must_use]
    pub fn with_enum_values(mut self, values: Vec<JsonValue>) -> Self {
        self.enum_values = Some(values);
        self
    }
}

/// Declared shape of a structured result.
///
/// # Example
///
/// ```rust
/// use agentsink_contract::schema::{ContractSchema, FieldSchema};
/// use serde_json::json;
///
/// let schema = ContractSchema::new()
///     .with_property("issues", FieldSchema::array(), true)
///     .with_property("overallScore", FieldSchema::number(), true);
///
/// assert!(schema.validate(&json!({"issues": [], "overallScore": 80})).is_ok());
/// assert!(schema.validate(&json!({"overallScore": 80})).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractSchema {
    /// Declared fields, in declaration order.
    properties: IndexMap<String, FieldSchema>,
    /// Names of required fields.
    required: Vec<String>,
}

impl ContractSchema {
    /// Create a new empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property.
    #[must_use]
    pub fn with_property(
        mut self,
        name: impl Into<String>,
        field: FieldSchema,
        required: bool,
    ) -> Self {
        let name = name.into();
        if required {
            self.required.push(name.clone());
        }
        self.properties.insert(name, field);
        self
    }

    /// Declared properties, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &IndexMap<String, FieldSchema> {
        &self.properties
    }

    /// Names of required fields.
    #[must_use]
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Whether `name` is a required field.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Validate a payload structurally against this schema.
    ///
    /// Checks, in order: the payload is an object, every required field is
    /// present, declared field types match, and enumerated fields hold a
    /// permitted value. Undeclared extra fields are allowed; the source is
    /// authoritative about what it produced.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContractViolation`] encountered.
    pub fn validate(&self, payload: &JsonValue) -> Result<(), ContractViolation> {
        let object = payload.as_object().ok_or(ContractViolation::NotAnObject {
            actual: json_type_name(payload),
        })?;

        for name in &self.required {
            if !object.contains_key(name) {
                return Err(ContractViolation::missing_field(name));
            }
        }

        for (name, field) in &self.properties {
            let Some(value) = object.get(name) else {
                continue;
            };

            if !field.kind.matches(value) {
                return Err(ContractViolation::type_mismatch(
                    name,
                    field.kind,
                    json_type_name(value),
                ));
            }

            if let Some(allowed) = &field.enum_values {
                if !allowed.contains(value) {
                    return Err(ContractViolation::NotInEnum {
                        field: name.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Render the schema as a draft JSON-Schema value for forwarding to the
    /// event source.
    #[must_use]
    pub fn to_json_value(&self) -> JsonValue {
        let mut properties = serde_json::Map::new();
        for (name, field) in &self.properties {
            let mut prop = serde_json::Map::new();
            if let Some(type_name) = field.kind.json_schema_name() {
                prop.insert("type".to_string(), json!(type_name));
            }
            if let Some(description) = &field.description {
                prop.insert("description".to_string(), json!(description));
            }
            if let Some(values) = &field.enum_values {
                prop.insert("enum".to_string(), json!(values));
            }
            properties.insert(name.clone(), JsonValue::Object(prop));
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": self.required,
        })
    }
}
