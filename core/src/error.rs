//! Error types for the todo API client.
//!
//! # Design
//! Status-derived variants keep the server's `message` when the error body
//! carried one. `server_message` exposes it so the state container can prefer
//! it over its own fallback text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 400.
    #[error("invalid request: {}", .message.as_deref().unwrap_or("bad request"))]
    Validation { message: Option<String> },

    /// The server returned 404; the referenced todo does not exist.
    #[error("not found: {}", .message.as_deref().unwrap_or("resource not found"))]
    NotFound { message: Option<String> },

    /// Any other unexpected status.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("unexpected response"))]
    Http {
        status: u16,
        message: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The host could not complete the HTTP round-trip.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation { message }
            | ApiError::NotFound { message }
            | ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}
