//! Transport error types.

use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the REST API.
#[derive(Debug, Error)]
pub enum TransportError {
    /// GitHub client error (connection, TLS, URI).
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The server answered with a non-success status.
    #[error("{method} {url} failed with status {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// A request payload could not be serialized.
    #[error("Failed to encode request body for {url}: {source}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response body was not the JSON we expected.
    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// Returns the HTTP status, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Checks if the error indicates a missing resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Status { status, .. } => *status == 404,
            Self::GitHubError(octocrab::Error::GitHub { source, .. }) => {
                source.status_code == StatusCode::NOT_FOUND
            }
            Self::GitHubError(_) | Self::Encode { .. } | Self::Decode { .. } => false,
        }
    }
}
