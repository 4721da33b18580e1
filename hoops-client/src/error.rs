//! Error types for the Hoops client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling the remote basketball API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (connection refused, timeout, reset)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be decoded into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The remote service refused the request
    #[error("API error (status {status}): {message}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The caller's cancellation token fired before the call completed
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Create a rejection error from status code and message
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::Rejected { status: 404, .. })
    }
}
