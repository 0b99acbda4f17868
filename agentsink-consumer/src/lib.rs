//! # agentsink-consumer
//!
//! The session consumer: drains one agent session's event stream, classifies
//! each event, tracks tool usage and cost, and finalizes a single outcome.
//!
//! ## Core Concepts
//!
//! - **[`SessionConsumer`]**: configuration + contract + cancellation for one run
//! - **[`Classifier`]**: the ordering state machine over wire events
//! - **[`Session`]**: the append-only record of everything observed
//! - **[`Outcome`]**: success with text or structured payload, or a typed
//!   failure reason; never an exception across the boundary
//!
//! ## Example
//!
//! ```rust
//! use agentsink_consumer::SessionConsumer;
//! use agentsink_core::config::SessionConfig;
//! use agentsink_core::events::SessionEvent;
//! use futures::stream;
//!
//! let events = stream::iter(
//!     vec![
//!         SessionEvent::init("sess_1", ["Read"]),
//!         SessionEvent::tool_use("Read", serde_json::json!({"file_path": "a.ts"})),
//!         SessionEvent::success_text("done", 0.01),
//!     ]
//!     .into_iter()
//!     .map(Ok),
//! );
//!
//! let consumer = SessionConsumer::new(SessionConfig::new()).unwrap();
//! let report = futures::executor::block_on(consumer.consume(events));
//!
//! assert!(report.is_success());
//! assert_eq!(report.session().unwrap().tool_invocations().len(), 1);
//! assert_eq!(report.total_cost_usd(), 0.01);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod classifier;
pub mod error;
pub mod finalizer;
pub mod outcome;
pub mod progress;
pub mod run;
pub mod session;

// Re-exports
pub use classifier::{Classifier, ClassifiedEvent, DelegationCall, Phase, TerminalResult};
pub use error::{StreamError, StreamResult};
pub use finalizer::finalize;
pub use outcome::{FailureReason, FinalOutput, Outcome};
pub use progress::{ProgressHandle, ProgressSnapshot};
pub use run::{RunStep, SessionConsumer, SessionReport, SessionRun};
pub use session::{Delegation, Session, SessionWarning, ToolInvocation};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::classifier::{ClassifiedEvent, Phase};
    pub use crate::error::{StreamError, StreamResult};
    pub use crate::outcome::{FailureReason, FinalOutput, Outcome};
    pub use crate::progress::ProgressHandle;
    pub use crate::run::{RunStep, SessionConsumer, SessionReport, SessionRun};
    pub use crate::session::{Session, SessionWarning, ToolInvocation};
}
