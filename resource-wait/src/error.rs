//! Error types for wait operations.

use std::time::Duration;
use thiserror::Error;

use crate::source::BoxError;

/// Terminal conditions that end a wait without a final representation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WaitError {
    /// The poll source failed to fetch the resource.
    #[error("failed to fetch resource state: {0}")]
    TransportFailure(#[source] BoxError),

    /// The fetched representation lacks a field needed for classification.
    #[error("malformed response: {reason}")]
    MalformedResponse {
        /// Which field was missing.
        reason: String,
    },

    /// The resource reported a known failure status.
    #[error("operation failed with status {status}")]
    OperationFailed {
        /// The status token that was observed.
        status: String,
    },

    /// The deadline elapsed while the resource was still pending.
    #[error("wait timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the wait.
    #[error("wait was cancelled")]
    Cancelled,

    /// The wait configuration is unusable.
    #[error("invalid wait configuration: {0}")]
    InvalidConfig(String),
}

impl WaitError {
    /// Create a malformed response error with the given reason
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Create an operation failure error carrying the observed status
    pub fn operation_failed(status: impl Into<String>) -> Self {
        Self::OperationFailed {
            status: status.into(),
        }
    }

    /// Whether the wait ended because the deadline elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Whether the wait ended because the caller cancelled it
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The failure status token, if the remote operation reported one
    pub fn status(&self) -> Option<&str> {
        match self {
            Self::OperationFailed { status } => Some(status),
            _ => None,
        }
    }
}
