//! Event classification state machine.
//!
//! The classifier enforces the ordering invariants of a session stream and
//! turns wire events into consumer-level classified events. Delegation is
//! decoded here, exactly once; downstream code never re-parses the raw
//! arguments blob.

use serde_json::Value as JsonValue;

use agentsink_core::errors::{ProtocolViolation, ProtocolViolationKind};
use agentsink_core::events::{ResultSubtype, SessionEvent, DELEGATION_TOOL};

/// Where the classifier is in a session's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// No event observed yet; only initialization is legal.
    #[default]
    AwaitingInit,
    /// Initialization seen; text, tool-use, and terminal events are legal.
    Active,
    /// Terminal event seen; the stream must end.
    Terminated,
}

/// A decoded sub-agent delegation.
#[derive(Debug, Clone, PartialEq)]
pub struct DelegationCall {
    /// Target sub-agent identifier, from the `subagent_type` argument.
    pub sub_agent: String,
    /// Correlation id of the delegating tool invocation, if reported.
    pub tool_use_id: Option<String>,
    /// Raw delegation arguments, for the invocation log.
    pub input: JsonValue,
}

/// The resolved terminal event of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalResult {
    /// Success or failure tag, verbatim from the source.
    pub subtype: ResultSubtype,
    /// Final free text, if reported.
    pub text: Option<String>,
    /// Structured payload, if reported.
    pub structured_output: Option<JsonValue>,
    /// Total accrued cost in USD.
    pub total_cost_usd: f64,
    /// Turn count the source reports, if any.
    pub num_turns: Option<u32>,
}

/// A wire event after classification.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedEvent {
    /// Session initialization.
    Init {
        /// Session identifier assigned by the source.
        session_id: String,
        /// Tool names available for the session's lifetime.
        tools: Vec<String>,
        /// Model variant, if reported.
        model: Option<String>,
    },
    /// A reasoning/response fragment.
    Text {
        /// Fragment content.
        text: String,
    },
    /// A plain tool invocation.
    ToolUse {
        /// Tool name.
        name: String,
        /// Raw JSON arguments.
        input: JsonValue,
        /// Correlation id, if reported.
        tool_use_id: Option<String>,
    },
    /// A tool invocation that delegates to a named sub-agent.
    Delegation(DelegationCall),
    /// The terminal result.
    Terminal(TerminalResult),
}

/// Classifies wire events and enforces stream ordering.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    phase: Phase,
}

impl Classifier {
    /// Create a classifier awaiting initialization.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Classify one wire event.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolViolation`] when the event is out of order:
    /// anything before `Init`, a second `Init`, or anything after the
    /// terminal event. Protocol violations are fatal; the consumer stops
    /// iterating once one is returned.
    pub fn classify(&mut self, event: SessionEvent) -> Result<ClassifiedEvent, ProtocolViolation> {
        match (self.phase, event) {
            (Phase::Terminated, event) => Err(ProtocolViolation::new(
                ProtocolViolationKind::EventAfterTerminal,
                format!("received {event} after the terminal event"),
            )),

            (Phase::AwaitingInit, SessionEvent::Result { .. }) => Err(ProtocolViolation::new(
                ProtocolViolationKind::TerminalBeforeInit,
                "terminal event arrived before initialization",
            )),

            (Phase::AwaitingInit, SessionEvent::Init { session_id, tools, model }) => {
                self.phase = Phase::Active;
                Ok(ClassifiedEvent::Init {
                    session_id,
                    tools,
                    model,
                })
            }

            (Phase::AwaitingInit, event) => Err(ProtocolViolation::new(
                ProtocolViolationKind::EventBeforeInit,
                format!("received {event} before initialization"),
            )),

            (Phase::Active, SessionEvent::Init { session_id, .. }) => Err(ProtocolViolation::new(
                ProtocolViolationKind::DuplicateInit,
                format!("second initialization for session {session_id}"),
            )),

            (Phase::Active, SessionEvent::Text { text }) => Ok(ClassifiedEvent::Text { text }),

            (Phase::Active, SessionEvent::ToolUse { name, input, tool_use_id }) => {
                if name == DELEGATION_TOOL {
                    if let Some(target) = input.get("subagent_type").and_then(JsonValue::as_str) {
                        return Ok(ClassifiedEvent::Delegation(DelegationCall {
                            sub_agent: target.to_string(),
                            tool_use_id,
                            input,
                        }));
                    }
                }
                Ok(ClassifiedEvent::ToolUse {
                    name,
                    input,
                    tool_use_id,
                })
            }

            (Phase::Active, SessionEvent::Result { subtype, text, structured_output, total_cost_usd, num_turns }) => {
                self.phase = Phase::Terminated;
                Ok(ClassifiedEvent::Terminal(TerminalResult {
                    subtype,
                    text,
                    structured_output,
                    total_cost_usd,
                    num_turns,
                }))
            }
        }
    }
}
