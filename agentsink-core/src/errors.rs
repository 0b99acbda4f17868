//! Error types for agentsink.
//!
//! Fatal session conditions are modeled as values and folded into an outcome
//! by the consumer; nothing here is thrown past the consumer boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for agentsink operations.
#[derive(Error, Debug)]
pub enum AgentSinkError {
    /// The event sequence violated an ordering invariant.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// The turn ceiling was exceeded.
    #[error(transparent)]
    TurnLimit(#[from] TurnLimitExceeded),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias using [`AgentSinkError`].
pub type Result<T> = std::result::Result<T, AgentSinkError>;

/// The kind of ordering invariant an event sequence violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolViolationKind {
    /// A non-initialization event arrived before initialization.
    EventBeforeInit,
    /// A second initialization event arrived.
    DuplicateInit,
    /// The terminal event arrived before initialization.
    TerminalBeforeInit,
    /// An event arrived after the terminal event.
    EventAfterTerminal,
}

impl fmt::Display for ProtocolViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventBeforeInit => write!(f, "event_before_init"),
            Self::DuplicateInit => write!(f, "duplicate_init"),
            Self::TerminalBeforeInit => write!(f, "terminal_before_init"),
            Self::EventAfterTerminal => write!(f, "event_after_terminal"),
        }
    }
}

/// The event sequence violated an ordering invariant.
///
/// Fatal to the session; the consumer stops iterating immediately.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolViolation {
    /// Which invariant was violated.
    pub kind: ProtocolViolationKind,
    /// Human-readable context for diagnostics.
    pub detail: String,
}

impl fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol violation ({}): {}", self.kind, self.detail)
    }
}

impl ProtocolViolation {
    /// Create a new protocol violation.
    pub fn new(kind: ProtocolViolationKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

/// The configured turn ceiling was exceeded before a terminal event arrived.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnLimitExceeded {
    /// Tool invocations observed so far.
    pub turns: u32,
    /// The configured ceiling.
    pub max: u32,
}

impl fmt::Display for TurnLimitExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "turn limit exceeded: observed {} tool invocations but max is {}",
            self.turns, self.max
        )
    }
}

impl TurnLimitExceeded {
    /// Create a new turn-limit error.
    #[must_use]
    pub fn new(turns: u32, max: u32) -> Self {
        Self { turns, max }
    }
}
