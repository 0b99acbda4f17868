//! Typed contract decoding.
//!
//! Pairs a [`ContractSchema`] with a target Rust type: payloads are validated
//! structurally first, then deserialized with serde.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::marker::PhantomData;

use crate::error::ContractViolation;
use crate::schema::ContractSchema;

/// A contract schema bound to a concrete output type.
///
/// # Example
///
/// ```rust
/// use agentsink_contract::schema::{ContractSchema, FieldSchema};
/// use agentsink_contract::typed::TypedContract;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Review {
///     issues: Vec<String>,
///     #[serde(rename = "overallScore")]
///     overall_score: f64,
/// }
///
/// let schema = ContractSchema::new()
///     .with_property("issues", FieldSchema::array(), true)
///     .with_property("overallScore", FieldSchema::number(), true);
/// let contract: TypedContract<Review> = TypedContract::new(schema);
///
/// let review = contract
///     .decode(&serde_json::json!({"issues": [], "overallScore": 92.5}))
///     .unwrap();
/// assert_eq!(review.overall_score, 92.5);
/// ```
#[derive(Debug, Clone)]
pub struct TypedContract<T> {
    schema: ContractSchema,
    _phantom: PhantomData<T>,
}

impl<T: DeserializeOwned> TypedContract<T> {
    /// Create a new typed contract.
    #[must_use]
    pub fn new(schema: ContractSchema) -> Self {
        Self {
            schema,
            _phantom: PhantomData,
        }
    }

    /// The underlying structural schema.
    #[must_use]
    pub fn schema(&self) -> &ContractSchema {
        &self.schema
    }

    /// Validate and decode a payload.
    ///
    /// # Errors
    ///
    /// Returns the structural violation if the payload fails the schema, or
    /// [`ContractViolation::Decode`] if serde deserialization fails after
    /// structural validation passed.
    pub fn decode(&self, payload: &JsonValue) -> Result<T, ContractViolation> {
        self.schema.validate(payload)?;
        serde_json::from_value(payload.clone()).map_err(ContractViolation::from)
    }
}
