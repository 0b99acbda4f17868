//! Stream-level errors.

use thiserror::Error;

/// Errors an event source can surface between events.
///
/// These are transport-layer faults, distinct from the failure subtypes a
/// terminal event reports; the consumer maps them to
/// [`FailureReason::Transport`](crate::outcome::FailureReason::Transport).
#[derive(Debug, Error)]
pub enum StreamError {
    /// The connection to the source failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// An event arrived but could not be decoded.
    #[error("failed to decode event: {0}")]
    Decode(String),

    /// Any other transport fault.
    #[error("transport error: {0}")]
    Transport(String),
}

impl StreamError {
    /// Create from any displayable error.
    pub fn from_err<E: std::fmt::Display>(err: E) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type for items pulled from an event source.
pub type StreamResult<T> = Result<T, StreamError>;
