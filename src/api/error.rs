//! Error types for the remote resource fetcher.

use thiserror::Error;

/// Errors that can occur while fetching a remote collection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The transport failed before a response arrived (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// The display-safe string carried by a `Failed` notification.
    ///
    /// For [`FetchError::Api`] this is exactly the server-provided message.
    pub fn display_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Malformed(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Malformed(e.to_string())
    }
}
