//! Client-layer error type for binding calls.

use flowbind_core::{EncodingError, Operation, WorkflowError};
use thiserror::Error;

use super::TransportError;

/// Errors returned by every binding call.
///
/// A call either completes its single round trip and yields a value, or
/// fails with one of these. Nothing is retried or recovered locally.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The engine answered with a non-success status.
    ///
    /// `message` is whatever the engine put in the envelope and may be
    /// absent.
    #[error(
        "engine rejected `{operation}` with status {status}: {}",
        .message.as_deref().unwrap_or("<no message>")
    )]
    Rejected {
        operation: Operation,
        status: u16,
        code: Option<i64>,
        message: Option<String>,
    },

    /// Transport-layer error
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Serialization/deserialization error
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl ClientError {
    /// Build a rejection from a decoded envelope error
    pub fn rejected(operation: Operation, status: u16, error: Option<WorkflowError>) -> Self {
        let error = error.unwrap_or_default();
        ClientError::Rejected {
            operation,
            status,
            code: error.code,
            message: error.message,
        }
    }

    /// Engine-supplied message, if this is a rejection that carried one
    pub fn message(&self) -> Option<&str> {
        match self {
            ClientError::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, ClientError::Rejected { .. })
    }

    /// Check if this error is retryable.
    ///
    /// Only transport failures qualify; rejections are authoritative.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(e) => e.is_retryable(),
            _ => false,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display_without_message() {
        let err = ClientError::rejected(Operation::Abort, 409, None);
        assert_eq!(err.message(), None);
        assert_eq!(
            err.to_string(),
            "engine rejected `abort` with status 409: <no message>"
        );
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_rejection_keeps_code_and_message() {
        let err = ClientError::rejected(
            Operation::Get,
            404,
            Some(WorkflowError::new("instance not found").with_code(404)),
        );
        match &err {
            ClientError::Rejected { code, .. } => assert_eq!(*code, Some(404)),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.message(), Some("instance not found"));
    }
}
