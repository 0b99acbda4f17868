//! Severity ranking for issue lists.
//!
//! Callers that post-process a structured result carrying an `issues` list
//! can rank and group findings here. Convenience utilities, not a
//! correctness-critical path for the consumer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Issue severity, ordered most severe first.
///
/// The derived ordering ranks `Critical < High < Medium < Low`, so an
/// ascending sort puts the most severe issues first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Must be fixed before shipping.
    Critical,
    /// Serious defect.
    High,
    /// Worth fixing.
    Medium,
    /// Minor or stylistic.
    Low,
}

impl Severity {
    /// Fixed rank of this severity; 0 is most severe.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Critical => write!(f, "critical"),
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Anything that carries a severity.
pub trait HasSeverity {
    /// The item's severity.
    fn severity(&self) -> Severity;
}

impl HasSeverity for Severity {
    fn severity(&self) -> Severity {
        *self
    }
}

/// A generic finding as review-style sessions report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// How bad it is.
    pub severity: Severity,
    /// What is wrong.
    pub description: String,
    /// Where, if reported (file, path, identifier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl HasSeverity for Issue {
    fn severity(&self) -> Severity {
        self.severity
    }
}

/// Sort issues by severity, most severe first.
///
/// The sort is stable: issues of equal severity keep their original
/// relative order.
pub fn sort_by_severity<T: HasSeverity>(items: &mut [T]) {
    items.sort_by_key(|item| item.severity().rank());
}

/// Group issues by severity, most severe group first.
#[must_use]
pub fn group_by_severity<T: HasSeverity>(items: Vec<T>) -> BTreeMap<Severity, Vec<T>> {
    let mut groups: BTreeMap<Severity, Vec<T>> = BTreeMap::new();
    for item in items {
        groups.entry(item.severity()).or_default().push(item);
    }
    groups
}
