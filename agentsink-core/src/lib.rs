//! # agentsink-core
//!
//! Core types for consuming a conversational-agent session stream.
//!
//! This crate provides the foundational types used throughout the agentsink
//! workspace:
//!
//! - **Events**: the wire-level tagged events a session source emits
//! - **Config**: session configuration forwarded to the event source
//! - **Usage**: turn and cost accounting, with turn-limit checking
//! - **Errors**: protocol and limit error types
//! - **Identifiers**: session-id helpers
//!
//! ## Example
//!
//! ```rust
//! use agentsink_core::{
//!     config::SessionConfig,
//!     events::SessionEvent,
//!     usage::{SessionUsage, TurnLimit},
//! };
//!
//! // Describe a session
//! let config = SessionConfig::new()
//!     .model("haiku-lite")
//!     .allowed_tools(["Read", "Glob"])
//!     .max_turns(8);
//!
//! // Build an event the way a source would emit it
//! let event = SessionEvent::init("sess_1", ["Read", "Glob"]);
//! assert!(!event.is_terminal());
//!
//! // Track turns against a limit
//! let mut usage = SessionUsage::new();
//! usage.record_turn();
//! let limit = TurnLimit::new(8);
//! limit.check(&usage).expect("within limit");
//! # let _ = config;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod events;
pub mod identifier;
pub mod usage;

// Re-exports for convenience
pub use config::{SessionConfig, SubAgentSpec};
pub use errors::{
    AgentSinkError, ProtocolViolation, ProtocolViolationKind, Result, TurnLimitExceeded,
};
pub use events::{summarize_args, ResultSubtype, SessionEvent, DELEGATION_TOOL};
pub use identifier::{generate_session_id, now_utc, SessionId};
pub use usage::{SessionUsage, TurnLimit};

/// Prelude module for common imports.
///
/// ```rust
/// use agentsink_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{SessionConfig, SubAgentSpec};
    pub use crate::errors::{
        AgentSinkError, ProtocolViolation, ProtocolViolationKind, Result, TurnLimitExceeded,
    };
    pub use crate::events::{ResultSubtype, SessionEvent, DELEGATION_TOOL};
    pub use crate::identifier::{generate_session_id, now_utc, SessionId};
    pub use crate::usage::{SessionUsage, TurnLimit};
}
