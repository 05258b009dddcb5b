//! Error types for the request client.

use thiserror::Error;

/// Message shown when the service gives no usable explanation of a failure.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to get response. Please try again.";

/// Errors that can occur while asking the answering service.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// The request never produced an HTTP response (DNS, connect, TLS, reset).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Server returned {status}")]
    Server {
        status: u16,
        /// Server-supplied `detail` message, if the error body carried one.
        detail: Option<String>,
    },

    /// The configured endpoint could not be turned into a request URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A success response whose body was not a valid answer.
    #[error("Failed to decode answer: {0}")]
    Decode(String),
}

impl RequestError {
    /// Single display string for the failure.
    ///
    /// Prefers the server's `detail` message; every other failure collapses
    /// to [`FALLBACK_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            RequestError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }

    /// HTTP status of the failure, when there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else {
            RequestError::Transport(err.to_string())
        }
    }
}
