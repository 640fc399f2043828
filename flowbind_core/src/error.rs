//! Error types for the workflow binding.
//!
//! This module defines the errors that can occur below the client layer:
//! failures of the fetch capability itself, JSON encoding failures, and the
//! error value an engine places in a response envelope.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Transport-layer errors raised by a [`Fetcher`](crate::Fetcher).
///
/// These represent exchanges that never produced a response from the
/// engine. A response with a failure status is not a transport error; it
/// is an engine rejection and is surfaced by the client layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read
    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Invalid endpoint URL provided
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request timed out
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl TransportError {
    /// Create a request failure for a specific url
    pub fn request(url: impl Into<String>, message: impl Into<String>) -> Self {
        TransportError::Request {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Check if this error is retryable (transient failure)
    ///
    /// The binding never retries on its own; this only informs callers
    /// that implement their own policy.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Request { .. } | TransportError::Timeout(_)
        )
    }
}

/// JSON encoding and decoding failures.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("failed to encode request body")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response")]
    Decode(#[source] serde_json::Error),
}

/// Error value carried in the `error` field of a response envelope.
///
/// `message` is declared required by the protocol, but engines have been
/// seen to omit it, so decoding tolerates its absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl WorkflowError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.message.as_deref()) {
            (Some(code), Some(message)) => write!(f, "[{code}] {message}"),
            (Some(code), None) => write!(f, "[{code}]"),
            (None, Some(message)) => f.write_str(message),
            (None, None) => f.write_str("<no message>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_error_tolerates_missing_message() {
        let err: WorkflowError = serde_json::from_str(r#"{"code": 7}"#).unwrap();
        assert_eq!(err.code, Some(7));
        assert_eq!(err.message(), None);
        assert_eq!(err.to_string(), "[7]");
    }

    #[test]
    fn test_workflow_error_omits_absent_fields() {
        let err = WorkflowError::new("instance not found");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "instance not found" }));
    }

    #[test]
    fn test_transport_error_retryable() {
        assert!(TransportError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(TransportError::request("http://x/status", "reset").is_retryable());
        assert!(!TransportError::InvalidEndpoint("::".into()).is_retryable());
    }
}
