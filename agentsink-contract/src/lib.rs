//! # agentsink-contract
//!
//! Structured-output contracts for agentsink sessions.
//!
//! A session may declare an output contract: a schema the terminal event's
//! structured payload must satisfy for the session to count as successful.
//! This crate provides:
//!
//! - **[`ContractSchema`]**: field declarations, required sets, enumerations
//! - **Structural validation**: required fields, type checks, enum membership
//! - **[`TypedContract`]**: validate-then-decode into a concrete Rust type
//! - **[`Severity`]** utilities for ranking review-style `issues` lists
//!
//! ## Example
//!
//! ```rust
//! use agentsink_contract::{ContractSchema, FieldSchema};
//! use serde_json::json;
//!
//! let contract = ContractSchema::new()
//!     .with_property("issues", FieldSchema::array(), true)
//!     .with_property("overallScore", FieldSchema::number(), true);
//!
//! assert!(contract.validate(&json!({"issues": [], "overallScore": 80})).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod issues;
pub mod schema;
pub mod typed;

// Re-exports for convenience
pub use error::{ContractResult, ContractViolation};
pub use issues::{group_by_severity, sort_by_severity, HasSeverity, Issue, Severity};
pub use schema::{json_type_name, ContractSchema, FieldSchema, FieldType};
pub use typed::TypedContract;

/// Prelude module for common imports.
///
/// ```rust
/// use agentsink_contract::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ContractResult, ContractViolation};
    pub use crate::issues::{group_by_severity, sort_by_severity, HasSeverity, Issue, Severity};
    pub use crate::schema::{ContractSchema, FieldSchema, FieldType};
    pub use crate::typed::TypedContract;
}
