//! Turn and cost accounting for a session.
//!
//! This module provides the accumulator updated by the consumer loop and the
//! turn-limit check evaluated after every tool invocation.

use serde::{Deserialize, Serialize};

use crate::errors::TurnLimitExceeded;

/// Accumulated usage for one session.
///
/// `total_cost_usd` comes from the terminal event only; intermediate events
/// carry no partial cost in this protocol. `turn_count` counts tool-invocation
/// events, used as a proxy for conversation turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUsage {
    /// Number of tool-invocation events observed.
    pub turn_count: u32,
    /// Total accrued cost in USD; non-decreasing, finalized at termination.
    pub total_cost_usd: f64,
}

impl SessionUsage {
    /// Create a new empty usage record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one tool-invocation event.
    pub fn record_turn(&mut self) {
        self.turn_count += 1;
    }

    /// Record accrued cost.
    ///
    /// Negative wire values are clamped to zero; the accumulator never
    /// decreases.
    pub fn record_cost(&mut self, cost_usd: f64) {
        self.total_cost_usd += cost_usd.max(0.0);
    }

    /// Merge usage from a nested sub-agent session into this one.
    pub fn merge(&mut self, other: &SessionUsage) {
        self.turn_count += other.turn_count;
        self.total_cost_usd += other.total_cost_usd;
    }

    /// Check if there is no usage data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turn_count == 0 && self.total_cost_usd == 0.0
    }
}

/// Ceiling on tool-invocation events for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnLimit {
    /// Maximum tool invocations before forced termination.
    pub max_turns: u32,
}

impl TurnLimit {
    /// Create a new turn limit.
    #[must_use]
    pub fn new(max_turns: u32) -> Self {
        Self { max_turns }
    }

    /// Check usage against the limit.
    ///
    /// Returns `Ok(())` while within the ceiling, or an error describing the
    /// overrun. The consumer runs this after every tool invocation rather
    /// than waiting for the source to stop.
    pub fn check(&self, usage: &SessionUsage) -> Result<(), TurnLimitExceeded> {
        if usage.turn_count > self.max_turns {
            return Err(TurnLimitExceeded::new(usage.turn_count, self.max_turns));
        }
        Ok(())
    }
}
