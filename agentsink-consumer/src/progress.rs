//! Mid-stream progress reporting.
//!
//! The consuming loop updates a shared snapshot after every applied event;
//! other tasks read it through a cloned [`ProgressHandle`] without touching
//! the session itself.

use parking_lot::RwLock;
use std::sync::Arc;

/// A point-in-time view of a running session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressSnapshot {
    /// Session id, once initialization has been observed.
    pub session_id: Option<String>,
    /// Tool invocations observed so far.
    pub turns: u32,
    /// Tool names in invocation order.
    pub tools: Vec<String>,
    /// Sub-agent delegations observed so far.
    pub delegations: u32,
    /// Whether the session has reached a terminal outcome.
    pub finished: bool,
}

/// Cloneable read handle onto a session's progress.
#[derive(Debug, Clone, Default)]
pub struct ProgressHandle {
    inner: Arc<RwLock<ProgressSnapshot>>,
}

impl ProgressHandle {
    /// Create a fresh handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.inner.read().clone()
    }

    pub(crate) fn update(&self, apply: impl FnOnce(&mut ProgressSnapshot)) {
        apply(&mut self.inner.write());
    }
}
