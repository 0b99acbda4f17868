//! The session consume loop.
//!
//! [`SessionConsumer`] holds the configuration for one session and drains an
//! event stream to completion; [`SessionRun`] is the step-wise form for
//! callers that want mid-stream progress. Awaiting the next event is the
//! loop's sole suspension point, raced against a cancellation token so
//! aborts and the turn-limit check land between events, never mid-handler.

use futures::{Stream, StreamExt};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use agentsink_contract::{ContractSchema, ContractViolation, TypedContract};
use agentsink_core::config::SessionConfig;
use agentsink_core::errors::AgentSinkError;
use agentsink_core::events::{summarize_args, SessionEvent, DELEGATION_TOOL};
use agentsink_core::usage::TurnLimit;

use crate::classifier::{Classifier, ClassifiedEvent, Phase};
use crate::error::StreamResult;
use crate::finalizer::finalize;
use crate::outcome::{FailureReason, FinalOutput, Outcome};
use crate::progress::ProgressHandle;
use crate::session::{Delegation, Session, SessionWarning, ToolInvocation};

/// Consumes one session's event stream and produces its outcome.
///
/// The consumer holds no state across sessions: it is consumed by
/// [`consume`](Self::consume) (or [`run`](Self::run)) and the resulting
/// [`SessionReport`] is everything the run observed.
#[derive(Debug)]
pub struct SessionConsumer {
    config: SessionConfig,
    contract: Option<ContractSchema>,
    cancel: CancellationToken,
    progress: ProgressHandle,
}

impl SessionConsumer {
    /// Create a consumer for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the config is invalid (for example
    /// a zero `max_turns`).
    pub fn new(config: SessionConfig) -> Result<Self, AgentSinkError> {
        config.validate()?;
        Ok(Self {
            config,
            contract: None,
            cancel: CancellationToken::new(),
            progress: ProgressHandle::new(),
        })
    }

    /// Declare an output contract for the session.
    ///
    /// With a contract declared, a successful terminal event only counts as
    /// success if its structured payload satisfies the contract.
    #[must_use]
    pub fn with_contract(mut self, contract: ContractSchema) -> Self {
        self.contract = Some(contract);
        self
    }

    /// Use an externally owned cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A token that cancels this session when triggered.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// A handle other tasks can use to read mid-stream progress.
    #[must_use]
    pub fn progress(&self) -> ProgressHandle {
        self.progress.clone()
    }

    /// Begin a step-wise run over `stream`.
    pub fn run<S>(self, stream: S) -> SessionRun<S>
    where
        S: Stream<Item = StreamResult<SessionEvent>> + Unpin,
    {
        let turn_limit = self.config.max_turns.map(TurnLimit::new);
        SessionRun {
            stream,
            config: self.config,
            contract: self.contract,
            cancel: self.cancel,
            progress: self.progress,
            turn_limit,
            classifier: Classifier::new(),
            session: None,
            saw_event: false,
            pending: None,
            outcome: None,
        }
    }

    /// Drain `stream` to completion and report the session's outcome.
    ///
    /// Never returns an error: every fatal condition is folded into the
    /// report's [`Outcome`].
    pub async fn consume<S>(self, stream: S) -> SessionReport
    where
        S: Stream<Item = StreamResult<SessionEvent>>,
    {
        futures::pin_mut!(stream);
        self.run(stream).run_to_completion().await
    }
}

/// One processed step of a session run.
#[derive(Debug)]
pub enum RunStep {
    /// An event was classified and applied to the session.
    Event(ClassifiedEvent),
    /// The run has reached its outcome; no further events will be accepted.
    Finished,
}

enum Pulled {
    Cancelled,
    Closed,
    Item(StreamResult<SessionEvent>),
}

/// An in-flight session run.
///
/// Produced by [`SessionConsumer::run`]; callers drive it with
/// [`step`](Self::step) and may inspect the [`session`](Self::session)
/// snapshot between steps.
pub struct SessionRun<S> {
    stream: S,
    config: SessionConfig,
    contract: Option<ContractSchema>,
    cancel: CancellationToken,
    progress: ProgressHandle,
    turn_limit: Option<TurnLimit>,
    classifier: Classifier,
    session: Option<Session>,
    saw_event: bool,
    pending: Option<Outcome>,
    outcome: Option<Outcome>,
}

impl<S> SessionRun<S>
where
    S: Stream<Item = StreamResult<SessionEvent>> + Unpin,
{
    /// Pull, classify, and apply the next event.
    ///
    /// Returns [`RunStep::Finished`] once the outcome is decided; calling
    /// again after that is a no-op.
    pub async fn step(&mut self) -> RunStep {
        if self.outcome.is_some() {
            return RunStep::Finished;
        }

        let pulled = tokio::select! {
            biased;
            () = self.cancel.cancelled() => Pulled::Cancelled,
            item = self.stream.next() => match item {
                Some(item) => Pulled::Item(item),
                None => Pulled::Closed,
            },
        };

        match pulled {
            Pulled::Cancelled => {
                let outcome = match self.pending.take() {
                    Some(outcome) => outcome,
                    None => {
                        debug!("session cancelled between events");
                        Outcome::Failure(FailureReason::Cancelled)
                    }
                };
                self.set_outcome(outcome);
                RunStep::Finished
            }

            Pulled::Closed => {
                let outcome = match self.pending.take() {
                    Some(outcome) => outcome,
                    None if !self.saw_event => Outcome::Failure(FailureReason::NoEvents),
                    None => Outcome::Failure(FailureReason::StreamClosedEarly),
                };
                self.set_outcome(outcome);
                RunStep::Finished
            }

            Pulled::Item(Err(stream_error)) => {
                warn!(error = %stream_error, "event source faulted");
                self.set_outcome(Outcome::Failure(FailureReason::Transport(stream_error)));
                RunStep::Finished
            }

            Pulled::Item(Ok(event)) => {
                self.saw_event = true;
                match self.classifier.classify(event) {
                    Ok(classified) => {
                        self.apply(&classified);
                        RunStep::Event(classified)
                    }
                    Err(violation) => {
                        warn!(error = %violation, "event stream violated protocol");
                        self.set_outcome(Outcome::Failure(FailureReason::Protocol(violation)));
                        RunStep::Finished
                    }
                }
            }
        }
    }

    /// Drive the run until its outcome is decided.
    pub async fn run_to_completion(mut self) -> SessionReport {
        loop {
            if matches!(self.step().await, RunStep::Finished) {
                break;
            }
        }
        self.finish()
    }

    /// Consume the run and produce its report.
    ///
    /// Finishing a run whose outcome is not yet decided reports the session
    /// as cancelled.
    #[must_use]
    pub fn finish(mut self) -> SessionReport {
        let outcome = self
            .outcome
            .take()
            .or_else(|| self.pending.take())
            .unwrap_or(Outcome::Failure(FailureReason::Cancelled));
        SessionReport {
            session: self.session,
            outcome,
        }
    }

    /// Snapshot of the session observed so far, once initialized.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Current lifecycle phase of the classifier.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.classifier.phase()
    }

    /// Whether the outcome has been decided.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn apply(&mut self, classified: &ClassifiedEvent) {
        match classified {
            ClassifiedEvent::Init {
                session_id,
                tools,
                model,
            } => {
                debug!(session_id = %session_id, tools = tools.len(), "session initialized");
                self.session = Some(Session::new(
                    session_id.clone(),
                    tools.clone(),
                    model.clone(),
                ));
                self.progress.update(|snapshot| {
                    snapshot.session_id = Some(session_id.clone());
                });
            }

            ClassifiedEvent::Text { text } => {
                trace!(chars = text.len(), "text fragment");
                if let Some(session) = self.session.as_mut() {
                    session.push_text(text.clone());
                }
            }

            ClassifiedEvent::ToolUse {
                name,
                input,
                tool_use_id: _,
            } => {
                self.record_invocation(name, input);
                if name == DELEGATION_TOOL {
                    let warning = SessionWarning::MalformedDelegation {
                        detail: "delegation invocation without a subagent_type".to_string(),
                    };
                    warn!(warning = %warning, "recording session warning");
                    if let Some(session) = self.session.as_mut() {
                        session.push_warning(warning);
                    }
                }
                self.check_turn_limit();
            }

            ClassifiedEvent::Delegation(call) => {
                debug!(sub_agent = %call.sub_agent, "sub-agent delegation");
                self.record_invocation(DELEGATION_TOOL, &call.input);
                if let Some(session) = self.session.as_mut() {
                    session.push_delegation(Delegation {
                        sub_agent: call.sub_agent.clone(),
                        parent_tool_use_id: call.tool_use_id.clone(),
                    });
                }
                self.progress.update(|snapshot| snapshot.delegations += 1);
                self.check_turn_limit();
            }

            ClassifiedEvent::Terminal(terminal) => {
                if terminal.total_cost_usd < 0.0 {
                    warn!(
                        total_cost_usd = terminal.total_cost_usd,
                        "negative cost reported; clamping to zero"
                    );
                }
                let accumulated = self
                    .session
                    .as_ref()
                    .map(Session::joined_text)
                    .unwrap_or_default();
                if let Some(session) = self.session.as_mut() {
                    session.record_cost(terminal.total_cost_usd);
                }
                let outcome = finalize(terminal, &accumulated, self.contract.as_ref());
                debug!(
                    success = outcome.is_success(),
                    cost_usd = terminal.total_cost_usd,
                    "terminal event resolved"
                );
                // Held until the stream ends: a further event is a protocol
                // violation that overrides this result.
                self.pending = Some(outcome);
            }
        }
    }

    fn record_invocation(&mut self, name: &str, input: &serde_json::Value) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        trace!(tool = name, "tool invocation");
        session.push_invocation(ToolInvocation {
            tool_name: name.to_string(),
            args_summary: summarize_args(input),
        });

        if name != DELEGATION_TOOL
            && !session.knows_tool(name)
            && !self.config.declares_sub_agent_tool(name)
        {
            let warning = SessionWarning::UnknownTool {
                name: name.to_string(),
            };
            warn!(warning = %warning, "recording session warning");
            session.push_warning(warning);
        }

        self.progress.update(|snapshot| {
            snapshot.turns += 1;
            snapshot.tools.push(name.to_string());
        });
    }

    fn check_turn_limit(&mut self) {
        let Some(limit) = self.turn_limit else {
            return;
        };
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if let Err(exceeded) = limit.check(session.usage()) {
            warn!(error = %exceeded, "terminating session at turn ceiling");
            self.set_outcome(Outcome::Failure(FailureReason::TurnLimitExceeded(exceeded)));
        }
    }

    fn set_outcome(&mut self, outcome: Outcome) {
        if self.outcome.is_none() {
            self.progress.update(|snapshot| snapshot.finished = true);
            self.outcome = Some(outcome);
        }
    }
}

/// Everything one session run observed, plus its outcome.
#[derive(Debug)]
pub struct SessionReport {
    session: Option<Session>,
    outcome: Outcome,
}

impl SessionReport {
    /// The session's final disposition.
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The observed session state, if initialization ever arrived.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Whether the session succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// The final output, if successful.
    #[must_use]
    pub fn output(&self) -> Option<&FinalOutput> {
        self.outcome.output()
    }

    /// Total accrued cost in USD, as reported by the terminal event.
    #[must_use]
    pub fn total_cost_usd(&self) -> f64 {
        self.session
            .as_ref()
            .map(|s| s.usage().total_cost_usd)
            .unwrap_or(0.0)
    }

    /// Decode a structured output into a concrete type.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::MissingPayload`] if the outcome is not a
    /// structured success, or the decode failure otherwise.
    pub fn decode_output<T: DeserializeOwned>(
        &self,
        contract: &TypedContract<T>,
    ) -> Result<T, ContractViolation> {
        match self.output() {
            Some(FinalOutput::Structured(payload)) => contract.decode(payload),
            _ => Err(ContractViolation::MissingPayload),
        }
    }

    /// Consume the report, yielding the outcome.
    #[must_use]
    pub fn into_outcome(self) -> Outcome {
        self.outcome
    }

    /// Map the outcome to a process exit code.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamError;
    use agentsink_contract::{ContractSchema, FieldSchema, Severity};
    use agentsink_core::config::SubAgentSpec;
    use agentsink_core::errors::ProtocolViolationKind;
    use agentsink_core::events::ResultSubtype;
    use futures::stream;
    use serde::Deserialize;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::timeout;

    fn events(
        list: Vec<SessionEvent>,
    ) -> impl Stream<Item = StreamResult<SessionEvent>> + Unpin {
        stream::iter(list.into_iter().map(Ok))
    }

    fn consumer() -> SessionConsumer {
        SessionConsumer::new(SessionConfig::new()).unwrap()
    }

    fn review_contract() -> ContractSchema {
        ContractSchema::new()
            .with_property("issues", FieldSchema::array(), true)
            .with_property("overallScore", FieldSchema::number(), true)
    }

    #[tokio::test]
    async fn test_tool_calls_then_text_success() {
        let report = consumer()
            .consume(events(vec![
                SessionEvent::init("sess_1", ["Read", "Glob"]),
                SessionEvent::tool_use("Read", json!({"file_path": "a.ts"})),
                SessionEvent::tool_use("Glob", json!({"pattern": "*.ts"})),
                SessionEvent::success_text("done", 0.01),
            ]))
            .await;

        assert!(report.is_success());
        assert_eq!(
            report.output().and_then(FinalOutput::as_text),
            Some("done")
        );
        assert_eq!(report.total_cost_usd(), 0.01);

        let session = report.session().unwrap();
        let names: Vec<_> = session
            .tool_invocations()
            .iter()
            .map(|i| i.tool_name.as_str())
            .collect();
        assert_eq!(names, vec!["Read", "Glob"]);
        assert!(session.warnings().is_empty());
    }

    #[tokio::test]
    async fn test_delegation_with_contract() {
        let config = SessionConfig::new().sub_agent(
            "security-scanner",
            SubAgentSpec::new("Scans for vulnerabilities", "Scan {dir}"),
        );
        let report = SessionConsumer::new(config)
            .unwrap()
            .with_contract(review_contract())
            .consume(events(vec![
                SessionEvent::init("sess_2", ["Read"]),
                SessionEvent::tool_use(
                    DELEGATION_TOOL,
                    json!({"subagent_type": "security-scanner", "prompt": "scan ./src"}),
                ),
                SessionEvent::success_structured(
                    json!({
                        "issues": [{"severity": "high", "description": "unchecked input"}],
                        "overallScore": 80,
                    }),
                    0.03,
                ),
            ]))
            .await;

        assert!(report.is_success());
        let session = report.session().unwrap();
        assert_eq!(session.delegations().len(), 1);
        assert_eq!(session.delegations()[0].sub_agent, "security-scanner");
        assert_eq!(session.tool_invocations().len(), 1);
        assert_eq!(report.total_cost_usd(), 0.03);
    }

    #[tokio::test]
    async fn test_contract_missing_field_fails() {
        let report = consumer()
            .with_contract(review_contract())
            .consume(events(vec![
                SessionEvent::init("sess_3", ["Read"]),
                SessionEvent::success_structured(json!({"overallScore": 80}), 0.0),
            ]))
            .await;

        assert!(!report.is_success());
        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::SchemaViolation(
                ContractViolation::MissingField(field)
            )) if field == "issues"
        ));
    }

    #[tokio::test]
    async fn test_terminal_without_init() {
        let report = consumer()
            .consume(events(vec![SessionEvent::success_text("x", 0.0)]))
            .await;

        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::Protocol(violation))
                if violation.kind == ProtocolViolationKind::TerminalBeforeInit
        ));
        assert!(report.session().is_none());
        assert_eq!(report.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_event_after_terminal_overrides_success() {
        let report = consumer()
            .consume(events(vec![
                SessionEvent::init("sess_4", ["Read"]),
                SessionEvent::success_text("done", 0.01),
                SessionEvent::text("trailing"),
            ]))
            .await;

        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::Protocol(violation))
                if violation.kind == ProtocolViolationKind::EventAfterTerminal
        ));
    }

    #[tokio::test]
    async fn test_turn_limit_is_proactive() {
        let config = SessionConfig::new().max_turns(3);
        let tool = |n: u32| SessionEvent::tool_use("Read", json!({"file_path": format!("{n}.ts")}));
        let stream = events(vec![
            SessionEvent::init("sess_5", ["Read"]),
            tool(1),
            tool(2),
            tool(3),
            tool(4),
        ])
        .chain(stream::pending());

        // The source never closes; the consumer must terminate on its own.
        let report = timeout(
            Duration::from_secs(1),
            SessionConsumer::new(config).unwrap().consume(stream),
        )
        .await
        .expect("turn limit must terminate iteration without source close");

        match report.outcome().failure() {
            Some(FailureReason::TurnLimitExceeded(exceeded)) => {
                assert_eq!(exceeded.turns, 4);
                assert_eq!(exceeded.max, 3);
            }
            other => panic!("expected turn-limit failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_stream_is_no_events() {
        let report = consumer().consume(events(vec![])).await;
        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::NoEvents)
        ));
    }

    #[tokio::test]
    async fn test_close_without_terminal_is_stream_closed_early() {
        let report = consumer()
            .consume(events(vec![SessionEvent::init("sess_6", ["Read"])]))
            .await;
        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::StreamClosedEarly)
        ));
        // The session itself was observed and is still reported.
        assert!(report.session().is_some());
    }

    #[tokio::test]
    async fn test_transport_fault_fails_session() {
        let stream = stream::iter(vec![
            Ok(SessionEvent::init("sess_7", ["Read"])),
            Err(StreamError::Connection("reset by peer".to_string())),
        ]);
        let report = consumer().consume(stream).await;
        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::Transport(StreamError::Connection(_)))
        ));
    }

    #[tokio::test]
    async fn test_pre_cancelled_token_stops_before_any_event() {
        let consumer = consumer();
        consumer.cancellation_token().cancel();

        let report = consumer
            .consume(events(vec![
                SessionEvent::init("sess_8", ["Read"]),
                SessionEvent::success_text("done", 0.0),
            ]))
            .await;
        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_cancellation_between_events() {
        let consumer = consumer();
        let token = consumer.cancellation_token();
        let stream = events(vec![SessionEvent::init("sess_9", ["Read"])])
            .chain(stream::pending());

        let (report, ()) = tokio::join!(consumer.consume(stream), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            token.cancel();
        });

        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_unknown_tool_recorded_but_not_fatal() {
        let report = consumer()
            .consume(events(vec![
                SessionEvent::init("sess_10", ["Read"]),
                SessionEvent::tool_use("Bash", json!({"command": "ls"})),
                SessionEvent::success_text("done", 0.0),
            ]))
            .await;

        assert!(report.is_success());
        let session = report.session().unwrap();
        assert_eq!(session.tool_invocations().len(), 1);
        assert!(matches!(
            &session.warnings()[0],
            SessionWarning::UnknownTool { name } if name == "Bash"
        ));
    }

    #[tokio::test]
    async fn test_sub_agent_tool_is_not_unknown() {
        let config = SessionConfig::new().sub_agent(
            "security-scanner",
            SubAgentSpec::new("scanner", "scan").allowed_tools(["Grep"]),
        );
        let report = SessionConsumer::new(config)
            .unwrap()
            .consume(events(vec![
                SessionEvent::init("sess_11", ["Read"]),
                SessionEvent::tool_use("Grep", json!({"pattern": "unsafe"})),
                SessionEvent::success_text("done", 0.0),
            ]))
            .await;

        assert!(report.session().unwrap().warnings().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_delegation_warns_and_counts_as_tool_use() {
        let report = consumer()
            .consume(events(vec![
                SessionEvent::init("sess_12", ["Read"]),
                SessionEvent::tool_use(DELEGATION_TOOL, json!({"prompt": "no target"})),
                SessionEvent::success_text("done", 0.0),
            ]))
            .await;

        let session = report.session().unwrap();
        assert_eq!(session.tool_invocations().len(), 1);
        assert!(session.delegations().is_empty());
        assert!(matches!(
            &session.warnings()[0],
            SessionWarning::MalformedDelegation { .. }
        ));
    }

    #[tokio::test]
    async fn test_step_wise_run_exposes_snapshots() {
        let consumer = consumer();
        let progress = consumer.progress();
        let stream = events(vec![
            SessionEvent::init("sess_13", ["Read"]),
            SessionEvent::tool_use("Read", json!({"file_path": "a.ts"})),
            SessionEvent::success_text("done", 0.02),
        ]);
        let mut run = consumer.run(stream);

        assert!(matches!(run.step().await, RunStep::Event(ClassifiedEvent::Init { .. })));
        assert_eq!(run.phase(), Phase::Active);
        assert_eq!(
            progress.snapshot().session_id.as_deref(),
            Some("sess_13")
        );

        assert!(matches!(run.step().await, RunStep::Event(ClassifiedEvent::ToolUse { .. })));
        assert_eq!(run.session().unwrap().tool_invocations().len(), 1);
        assert_eq!(progress.snapshot().turns, 1);
        assert_eq!(progress.snapshot().tools, vec!["Read"]);

        assert!(matches!(run.step().await, RunStep::Event(ClassifiedEvent::Terminal(_))));
        assert!(matches!(run.step().await, RunStep::Finished));

        let report = run.finish();
        assert!(report.is_success());
        assert!(progress.snapshot().finished);
    }

    #[tokio::test]
    async fn test_finish_before_outcome_reports_cancelled() {
        let consumer = consumer();
        let stream = events(vec![SessionEvent::init("sess_14", ["Read"])]);
        let mut run = consumer.run(stream);
        assert!(matches!(run.step().await, RunStep::Event(_)));

        let report = run.finish();
        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_decode_output_into_typed_report() {
        #[derive(Debug, Deserialize)]
        struct Review {
            issues: Vec<ReviewIssue>,
            #[serde(rename = "overallScore")]
            overall_score: f64,
        }

        #[derive(Debug, Deserialize)]
        struct ReviewIssue {
            severity: Severity,
            description: String,
        }

        let report = consumer()
            .with_contract(review_contract())
            .consume(events(vec![
                SessionEvent::init("sess_15", ["Read"]),
                SessionEvent::success_structured(
                    json!({
                        "issues": [{"severity": "critical", "description": "secret in repo"}],
                        "overallScore": 35,
                    }),
                    0.05,
                ),
            ]))
            .await;

        let typed: TypedContract<Review> = TypedContract::new(review_contract());
        let review = report.decode_output(&typed).unwrap();
        assert_eq!(review.overall_score, 35.0);
        assert_eq!(review.issues[0].severity, Severity::Critical);
        assert_eq!(review.issues[0].description, "secret in repo");
    }

    #[tokio::test]
    async fn test_upstream_failure_subtype_verbatim() {
        let report = consumer()
            .consume(events(vec![
                SessionEvent::init("sess_16", ["Read"]),
                SessionEvent::failure(ResultSubtype::ErrorDuringExecution, 0.002),
            ]))
            .await;

        assert!(matches!(
            report.outcome().failure(),
            Some(FailureReason::Upstream {
                subtype: ResultSubtype::ErrorDuringExecution
            })
        ));
        assert_eq!(report.total_cost_usd(), 0.002);
    }

    #[test]
    fn test_zero_max_turns_is_a_config_error() {
        let err = SessionConsumer::new(SessionConfig::new().max_turns(0)).unwrap_err();
        assert!(matches!(err, AgentSinkError::Configuration(_)));
    }
}
