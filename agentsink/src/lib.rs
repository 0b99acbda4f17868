//! # agentsink: consume agentic session streams
//!
//! `agentsink` is the client side of a conversational-agent API: given the
//! ordered, asynchronous stream of events a session source emits, it
//! classifies each event, tracks tool invocations and sub-agent delegations,
//! accumulates cost, and finalizes exactly one outcome: free text, or a
//! schema-validated structured payload when an output contract was declared.
//!
//! ## Quick Start
//!
//! ```rust
//! use agentsink::prelude::*;
//! use futures::stream;
//!
//! # futures::executor::block_on(async {
//! let events = stream::iter(
//!     vec![
//!         SessionEvent::init("sess_1", ["Read", "Glob"]),
//!         SessionEvent::text("Scanning the project."),
//!         SessionEvent::tool_use("Glob", serde_json::json!({"pattern": "*.ts"})),
//!         SessionEvent::success_text("2 files reviewed", 0.01),
//!     ]
//!     .into_iter()
//!     .map(Ok),
//! );
//!
//! let report = agentsink::consume_session(SessionConfig::new(), events)
//!     .await
//!     .unwrap();
//!
//! assert!(report.is_success());
//! assert_eq!(report.total_cost_usd(), 0.01);
//! # });
//! ```
//!
//! ## Structured Output
//!
//! Declare a [`ContractSchema`] and a success report from the source is only
//! accepted when its payload satisfies the contract:
//!
//! ```rust
//! use agentsink::prelude::*;
//!
//! let contract = ContractSchema::new()
//!     .with_property("issues", FieldSchema::array(), true)
//!     .with_property("overallScore", FieldSchema::number(), true);
//!
//! let consumer = SessionConsumer::new(SessionConfig::new())
//!     .unwrap()
//!     .with_contract(contract);
//! # let _ = consumer;
//! ```
//!
//! ## Key Features
//!
//! - **Closed event sum type** with exhaustive classification
//! - **Append-only session record**: tool log, delegations, text fragments
//! - **Output contracts**: required fields, type checks, enumerations
//! - **Proactive turn limits**: the consumer stops itself, not the source
//! - **Cancellation** between events via `tokio-util`'s `CancellationToken`
//! - **Typed failure taxonomy**: protocol, schema, upstream, transport, local

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

use futures::Stream;

pub use agentsink_contract::{
    group_by_severity, sort_by_severity, ContractResult, ContractSchema, ContractViolation,
    FieldSchema, FieldType, HasSeverity, Issue, Severity, TypedContract,
};
pub use agentsink_core::{
    AgentSinkError, ProtocolViolation, ProtocolViolationKind, ResultSubtype, SessionConfig,
    SessionEvent, SessionId, SessionUsage, SubAgentSpec, TurnLimit, TurnLimitExceeded,
    DELEGATION_TOOL,
};
pub use agentsink_consumer::{
    ClassifiedEvent, Classifier, Delegation, FailureReason, FinalOutput, Outcome, Phase,
    ProgressHandle, RunStep, Session, SessionConsumer, SessionReport, SessionRun, SessionWarning,
    StreamError, StreamResult, ToolInvocation,
};

/// Consume one session stream with the given configuration.
///
/// Convenience wrapper over [`SessionConsumer`]: builds the consumer,
/// drains the stream, and returns the report.
///
/// # Errors
///
/// Returns an error only for invalid configuration; everything observed on
/// the stream itself is folded into the report's [`Outcome`].
pub async fn consume_session<S>(
    config: SessionConfig,
    stream: S,
) -> Result<SessionReport, AgentSinkError>
where
    S: Stream<Item = StreamResult<SessionEvent>>,
{
    Ok(SessionConsumer::new(config)?.consume(stream).await)
}

/// Prelude for common imports.
///
/// ```rust
/// use agentsink::prelude::*;
/// ```
pub mod prelude {
    pub use agentsink_contract::{
        ContractSchema, ContractViolation, FieldSchema, FieldType, Severity, TypedContract,
    };
    pub use agentsink_core::{
        ResultSubtype, SessionConfig, SessionEvent, SubAgentSpec, DELEGATION_TOOL,
    };
    pub use agentsink_consumer::{
        FailureReason, FinalOutput, Outcome, RunStep, Session, SessionConsumer, SessionReport,
        SessionRun, StreamError, StreamResult,
    };
    pub use crate::consume_session;
}
