//! The append-only session record.
//!
//! A [`Session`] is created when initialization arrives and mutated only by
//! the consuming loop. Its collections are push-only by construction: the
//! public surface exposes slice snapshots and never allows removal or
//! in-place edits, so the append-only invariant holds mechanically rather
//! than by convention.

use serde::{Deserialize, Serialize};
use std::fmt;

use agentsink_core::identifier::SessionId;
use agentsink_core::usage::SessionUsage;

/// One recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Tool name as reported by the source.
    pub tool_name: String,
    /// Single-line summary of the arguments.
    pub args_summary: String,
}

/// One recorded sub-agent delegation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    /// Target sub-agent identifier.
    pub sub_agent: String,
    /// Correlation id of the delegating tool invocation, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_tool_use_id: Option<String>,
}

/// A non-fatal data-quality observation recorded on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionWarning {
    /// A tool name outside the declared allow-lists was invoked.
    UnknownTool {
        /// The undeclared tool name.
        name: String,
    },
    /// A delegation invocation carried no usable target.
    MalformedDelegation {
        /// What was wrong with the payload.
        detail: String,
    },
}

impl fmt::Display for SessionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTool { name } => write!(f, "unknown tool invoked: {name}"),
            Self::MalformedDelegation { detail } => {
                write!(f, "malformed delegation: {detail}")
            }
        }
    }
}

/// State observed for one session run.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    session_id: SessionId,
    available_tools: Vec<String>,
    model: Option<String>,
    tool_invocations: Vec<ToolInvocation>,
    delegations: Vec<Delegation>,
    text_fragments: Vec<String>,
    warnings: Vec<SessionWarning>,
    usage: SessionUsage,
}

impl Session {
    /// Create a session from its initialization event.
    pub(crate) fn new(
        session_id: impl Into<SessionId>,
        available_tools: Vec<String>,
        model: Option<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            available_tools,
            model,
            tool_invocations: Vec::new(),
            delegations: Vec::new(),
            text_fragments: Vec::new(),
            warnings: Vec::new(),
            usage: SessionUsage::new(),
        }
    }

    pub(crate) fn push_text(&mut self, fragment: String) {
        self.text_fragments.push(fragment);
    }

    pub(crate) fn push_invocation(&mut self, invocation: ToolInvocation) {
        self.tool_invocations.push(invocation);
        self.usage.record_turn();
    }

    pub(crate) fn push_delegation(&mut self, delegation: Delegation) {
        self.delegations.push(delegation);
    }

    pub(crate) fn push_warning(&mut self, warning: SessionWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn record_cost(&mut self, cost_usd: f64) {
        self.usage.record_cost(cost_usd);
    }

    /// The session identifier assigned at initialization.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Tool names available to the session; immutable after initialization.
    #[must_use]
    pub fn available_tools(&self) -> &[String] {
        &self.available_tools
    }

    /// Model variant executing the session, if reported.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Recorded tool invocations, in arrival order.
    #[must_use]
    pub fn tool_invocations(&self) -> &[ToolInvocation] {
        &self.tool_invocations
    }

    /// Recorded sub-agent delegations, in arrival order.
    #[must_use]
    pub fn delegations(&self) -> &[Delegation] {
        &self.delegations
    }

    /// Text fragments, in arrival order.
    #[must_use]
    pub fn text_fragments(&self) -> &[String] {
        &self.text_fragments
    }

    /// All fragments concatenated in arrival order.
    #[must_use]
    pub fn joined_text(&self) -> String {
        self.text_fragments.concat()
    }

    /// Non-fatal warnings recorded during the run.
    #[must_use]
    pub fn warnings(&self) -> &[SessionWarning] {
        &self.warnings
    }

    /// Turn and cost accounting.
    #[must_use]
    pub fn usage(&self) -> &SessionUsage {
        &self.usage
    }

    /// Whether `name` is covered by the session's declared tool surface.
    #[must_use]
    pub fn knows_tool(&self, name: &str) -> bool {
        self.available_tools.iter().any(|t| t == name)
    }
}
