//! Error types for the booking client core.

use thiserror::Error;

/// Result type alias for API boundary operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors produced at the REST API boundary.
///
/// Per the propagation policy, these never crash a view: every
/// data-fetching state has an explicit error-display representation and
/// mutations surface the message and wait for a manual retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server rejected the request (sold-out tier, duplicate
    /// category name, not-found resource, validation failure).
    #[error("{message}")]
    Server {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Server-provided error message, surfaced to the user as-is.
        message: String,
    },

    /// The request never produced a response (DNS, connection, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The response arrived but its payload was not what the contract
    /// promises.
    #[error("invalid response payload: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message to show the user for this failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Decode(_) => "Unexpected response from the server.".to_string(),
        }
    }

    /// Returns `true` if the failure came from the server rejecting the
    /// request rather than transport trouble.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Returns `true` if the server rejected the bearer token. The
    /// session reducer treats this as a forced logout.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Server { status: 401, .. })
    }
}

/// Errors from the durable session storage.
///
/// Callers treat any storage failure as an absent session; these errors
/// are logged, never surfaced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Reading or writing the backing store failed.
    #[error("storage I/O failed: {0}")]
    Io(String),

    /// The persisted payload could not be parsed.
    #[error("corrupt persisted session: {0}")]
    Corrupt(String),
}
