//! Error types for contract validation and decoding.

use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::schema::FieldType;

/// A structured payload failed its declared contract.
///
/// A session whose terminal event reports success still fails with one of
/// these when a contract was declared: the contract's whole purpose is
/// guaranteeing a decodable result.
#[derive(Debug, Error)]
pub enum ContractViolation {
    /// A contract was declared but the terminal event carried no payload.
    #[error("a contract was declared but the result carries no structured payload")]
    MissingPayload,

    /// The payload is not a JSON object.
    #[error("structured payload is not a JSON object (got {actual})")]
    NotAnObject {
        /// JSON type actually received.
        actual: &'static str,
    },

    /// A required field is absent.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A field's JSON type does not match the declaration.
    #[error("field '{field}' is {actual} but the contract declares {expected}")]
    TypeMismatch {
        /// The field name.
        field: String,
        /// Declared type.
        expected: FieldType,
        /// JSON type actually received.
        actual: &'static str,
    },

    /// A field's value is outside its declared enumeration.
    #[error("field '{field}' value {value} is not in the declared enumeration")]
    NotInEnum {
        /// The field name.
        field: String,
        /// The offending value.
        value: JsonValue,
    },

    /// The payload validated structurally but failed typed decoding.
    #[error("failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ContractViolation {
    /// Create a missing-field violation.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a type-mismatch violation.
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: FieldType,
        actual: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }
}

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractViolation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = ContractViolation::missing_field("issues");
        assert_eq!(err.to_string(), "missing required field: issues");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = ContractViolation::type_mismatch("overallScore", FieldType::Number, "string");
        let text = err.to_string();
        assert!(text.contains("overallScore"));
        assert!(text.contains("number"));
        assert!(text.contains("string"));
    }

    #[test]
    fn test_not_in_enum_display() {
        let err = ContractViolation::NotInEnum {
            field: "severity".to_string(),
            value: serde_json::json!("catastrophic"),
        };
        assert!(err.to_string().contains("severity"));
        assert!(err.to_string().contains("catastrophic"));
    }
}
