//! Terminal-event resolution.
//!
//! Turns the terminal event of a session into its [`Outcome`]. When an
//! output contract was declared, a success report from the source is not
//! taken at face value: the payload must satisfy the contract, because the
//! contract's whole purpose is guaranteeing a decodable result.

use agentsink_contract::{ContractSchema, ContractViolation};

use crate::classifier::TerminalResult;
use crate::outcome::{FailureReason, FinalOutput, Outcome};

/// Resolve a terminal event into the session outcome.
///
/// `accumulated_text` is the concatenation of the session's text fragments,
/// used when a successful terminal event carries no text of its own.
/// `total_cost_usd` on the terminal event is recorded by the caller and
/// never rounded or reformatted here; presentation is a caller concern.
#[must_use]
pub fn finalize(
    terminal: &TerminalResult,
    accumulated_text: &str,
    contract: Option<&ContractSchema>,
) -> Outcome {
    if !terminal.subtype.is_success() {
        return Outcome::Failure(FailureReason::Upstream {
            subtype: terminal.subtype.clone(),
        });
    }

    if let Some(contract) = contract {
        return match &terminal.structured_output {
            None => Outcome::Failure(FailureReason::SchemaViolation(
                ContractViolation::MissingPayload,
            )),
            Some(payload) => match contract.validate(payload) {
                Ok(()) => Outcome::Success(FinalOutput::Structured(payload.clone())),
                Err(violation) => Outcome::Failure(FailureReason::SchemaViolation(violation)),
            },
        };
    }

    if let Some(payload) = &terminal.structured_output {
        return Outcome::Success(FinalOutput::Structured(payload.clone()));
    }

    let text = terminal
        .text
        .clone()
        .unwrap_or_else(|| accumulated_text.to_string());
    Outcome::Success(FinalOutput::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentsink_contract::FieldSchema;
    use agentsink_core::events::ResultSubtype;
    use serde_json::json;

    fn terminal_success(
        text: Option<&str>,
        structured_output: Option<serde_json::Value>,
    ) -> TerminalResult {
        TerminalResult {
            subtype: ResultSubtype::Success,
            text: text.map(String::from),
            structured_output,
            total_cost_usd: 0.01,
            num_turns: None,
        }
    }

    fn review_contract() -> ContractSchema {
        ContractSchema::new()
            .with_property("issues", FieldSchema::array(), true)
            .with_property("overallScore", FieldSchema::number(), true)
    }

    #[test]
    fn test_success_text() {
        let outcome = finalize(&terminal_success(Some("done"), None), "", None);
        assert_eq!(
            outcome.output().and_then(FinalOutput::as_text),
            Some("done")
        );
    }

    #[test]
    fn test_success_falls_back_to_accumulated_text() {
        let outcome = finalize(&terminal_success(None, None), "partial reasoning", None);
        assert_eq!(
            outcome.output().and_then(FinalOutput::as_text),
            Some("partial reasoning")
        );
    }

    #[test]
    fn test_success_with_valid_contract() {
        let payload = json!({"issues": [], "overallScore": 80});
        let outcome = finalize(
            &terminal_success(None, Some(payload.clone())),
            "",
            Some(&review_contract()),
        );
        assert_eq!(
            outcome.output().and_then(FinalOutput::as_structured),
            Some(&payload)
        );
    }

    #[test]
    fn test_contract_violation_overrides_upstream_success() {
        let outcome = finalize(
            &terminal_success(None, Some(json!({"overallScore": 80}))),
            "",
            Some(&review_contract()),
        );
        assert!(matches!(
            outcome.failure(),
            Some(FailureReason::SchemaViolation(
                ContractViolation::MissingField(field)
            )) if field == "issues"
        ));
    }

    #[test]
    fn test_contract_with_missing_payload() {
        let outcome = finalize(&terminal_success(Some("done"), None), "", Some(&review_contract()));
        assert!(matches!(
            outcome.failure(),
            Some(FailureReason::SchemaViolation(
                ContractViolation::MissingPayload
            ))
        ));
    }

    #[test]
    fn test_upstream_failure_passes_subtype_verbatim() {
        let terminal = TerminalResult {
            subtype: ResultSubtype::ErrorMaxTurns,
            text: None,
            structured_output: None,
            total_cost_usd: 0.02,
            num_turns: Some(17),
        };
        let outcome = finalize(&terminal, "", None);
        assert!(matches!(
            outcome.failure(),
            Some(FailureReason::Upstream {
                subtype: ResultSubtype::ErrorMaxTurns
            })
        ));
    }

    #[test]
    fn test_structured_payload_without_contract() {
        let payload = json!({"anything": true});
        let outcome = finalize(&terminal_success(None, Some(payload.clone())), "", None);
        assert_eq!(
            outcome.output().and_then(FinalOutput::as_structured),
            Some(&payload)
        );
    }
}
