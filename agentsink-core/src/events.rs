//! Wire-level session events.
//!
//! This module defines the tagged events an agent session source emits, in
//! arrival order: one initialization event, any number of text and tool-use
//! events, and one terminal result event.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Reserved tool name signaling "invoke a named sub-agent".
///
/// A tool-use event with this name carries the target sub-agent identifier
/// in its `input` payload under `subagent_type`.
pub const DELEGATION_TOOL: &str = "Task";

/// Maximum length of a tool-argument summary line.
const ARGS_SUMMARY_MAX: usize = 120;

/// Terminal result subtype, passed through verbatim from the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResultSubtype {
    /// The session completed successfully.
    Success,
    /// The source aborted the session after its own turn ceiling.
    ErrorMaxTurns,
    /// The source failed while executing the session.
    ErrorDuringExecution,
    /// Any other subtype the source reports; kept verbatim.
    Other(String),
}

impl ResultSubtype {
    /// Whether this subtype reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// The wire tag for this subtype.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success => "success",
            Self::ErrorMaxTurns => "error_max_turns",
            Self::ErrorDuringExecution => "error_during_execution",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ResultSubtype {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "success" => Self::Success,
            "error_max_turns" => Self::ErrorMaxTurns,
            "error_during_execution" => Self::ErrorDuringExecution,
            _ => Self::Other(tag),
        }
    }
}

impl From<ResultSubtype> for String {
    fn from(subtype: ResultSubtype) -> Self {
        subtype.as_str().to_string()
    }
}

impl fmt::Display for ResultSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One event in a session stream.
///
/// Events form a closed tagged sum: exhaustive matching guarantees every
/// variant is handled by a consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// First event of a session; fixes the session id and tool set.
    Init {
        /// Opaque session identifier assigned by the source.
        session_id: String,
        /// Tool names available to the session, fixed for its lifetime.
        #[serde(default)]
        tools: Vec<String>,
        /// Model variant executing the session, if reported.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
    },

    /// A reasoning/response text fragment.
    Text {
        /// The fragment content; concatenation order is arrival order.
        text: String,
    },

    /// The session invoked a tool.
    ToolUse {
        /// Tool name as reported by the source.
        name: String,
        /// Raw JSON arguments.
        #[serde(default)]
        input: JsonValue,
        /// Correlation id for the invocation, if reported.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_use_id: Option<String>,
    },

    /// Terminal result; must be the last event of the stream.
    Result {
        /// Success or failure tag, passed through verbatim on failure.
        subtype: ResultSubtype,
        /// Final free text, if the source reports one.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        /// Structured payload, present when an output contract was requested.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        structured_output: Option<JsonValue>,
        /// Total accrued cost for the session, in USD.
        #[serde(default)]
        total_cost_usd: f64,
        /// Number of turns the source reports, if any.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        num_turns: Option<u32>,
    },
}

impl SessionEvent {
    /// Create an initialization event.
    pub fn init<I, S>(session_id: impl Into<String>, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Init {
            session_id: session_id.into(),
            tools: tools.into_iter().map(Into::into).collect(),
            model: None,
        }
    }

    /// Create a text fragment event.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a tool-use event.
    pub fn tool_use(name: impl Into<String>, input: JsonValue) -> Self {
        Self::ToolUse {
            name: name.into(),
            input,
            tool_use_id: None,
        }
    }

    /// Create a successful terminal event carrying free text.
    pub fn success_text(text: impl Into<String>, total_cost_usd: f64) -> Self {
        Self::Result {
            subtype: ResultSubtype::Success,
            text: Some(text.into()),
            structured_output: None,
            total_cost_usd,
            num_turns: None,
        }
    }

    /// Create a successful terminal event carrying a structured payload.
    pub fn success_structured(payload: JsonValue, total_cost_usd: f64) -> Self {
        Self::Result {
            subtype: ResultSubtype::Success,
            text: None,
            structured_output: Some(payload),
            total_cost_usd,
            num_turns: None,
        }
    }

    /// Create a failed terminal event.
    pub fn failure(subtype: ResultSubtype, total_cost_usd: f64) -> Self {
        Self::Result {
            subtype,
            text: None,
            structured_output: None,
            total_cost_usd,
            num_turns: None,
        }
    }

    /// Whether this event terminates the session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Result { .. })
    }

    /// Parse an event from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the line is not a valid event.
    pub fn from_json(line: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init { session_id, .. } => write!(f, "[init] {}", session_id),
            Self::Text { text } => write!(f, "{}", text),
            Self::ToolUse { name, .. } => write!(f, "[tool_use] {}", name),
            Self::Result { subtype, .. } => write!(f, "[result] {}", subtype),
        }
    }
}

/// Produce a single-line summary of tool arguments for the invocation log.
///
/// The summary is compact JSON truncated to a fixed width; it is for humans
/// and logs, never parsed back.
#[must_use]
pub fn summarize_args(input: &JsonValue) -> String {
    let rendered = match input {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    };
    truncate_line(&rendered, ARGS_SUMMARY_MAX)
}

fn truncate_line(s: &str, max: usize) -> String {
    let flat: String = s
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        return flat;
    }
    let mut out: String = flat.chars().take(max).collect();
    out.push('…');
    out
}
