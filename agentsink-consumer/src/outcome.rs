//! Session outcomes.
//!
//! Every fatal condition ends the session's pending state exactly once and
//! is surfaced as a single [`Outcome`] value; callers branch on outcome
//! kind, never on exception type.

use serde_json::Value as JsonValue;
use thiserror::Error;

use agentsink_contract::ContractViolation;
use agentsink_core::errors::{ProtocolViolation, TurnLimitExceeded};
use agentsink_core::events::ResultSubtype;

use crate::error::StreamError;

/// The payload of a successful session.
#[derive(Debug, Clone, PartialEq)]
pub enum FinalOutput {
    /// Accumulated or terminal free text.
    Text(String),
    /// Structured payload; already validated when a contract was declared.
    Structured(JsonValue),
}

impl FinalOutput {
    /// The text payload, if this output is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Structured(_) => None,
        }
    }

    /// The structured payload, if present.
    #[must_use]
    pub fn as_structured(&self) -> Option<&JsonValue> {
        match self {
            Self::Text(_) => None,
            Self::Structured(payload) => Some(payload),
        }
    }
}

/// Why a session failed.
#[derive(Debug, Error)]
pub enum FailureReason {
    /// The event sequence violated an ordering invariant.
    #[error(transparent)]
    Protocol(#[from] ProtocolViolation),

    /// A successful terminal event failed its declared output contract.
    #[error("schema violation: {0}")]
    SchemaViolation(#[from] ContractViolation),

    /// The terminal event reported failure; subtype passed through verbatim.
    #[error("upstream failure: {subtype}")]
    Upstream {
        /// The source's failure tag.
        subtype: ResultSubtype,
    },

    /// The local turn ceiling was exceeded before a terminal event.
    #[error(transparent)]
    TurnLimitExceeded(#[from] TurnLimitExceeded),

    /// The source produced no events at all.
    #[error("event source produced no events")]
    NoEvents,

    /// The source closed without emitting a terminal event.
    #[error("event source closed before a terminal event")]
    StreamClosedEarly,

    /// The source faulted between events.
    #[error(transparent)]
    Transport(#[from] StreamError),

    /// The caller aborted the session.
    #[error("session cancelled by caller")]
    Cancelled,
}

/// Final disposition of one session.
#[derive(Debug)]
pub enum Outcome {
    /// The session completed and its result (if contracted) validated.
    Success(FinalOutput),
    /// The session failed; the reason says why.
    Failure(FailureReason),
}

impl Outcome {
    /// Whether the session succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The output, if successful.
    #[must_use]
    pub fn output(&self) -> Option<&FinalOutput> {
        match self {
            Self::Success(output) => Some(output),
            Self::Failure(_) => None,
        }
    }

    /// The failure reason, if failed.
    #[must_use]
    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }

    /// Map the outcome to a process exit code: 0 on success, 1 on failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
