//! Error types for the lodging API client.
//!
//! # Design
//! Each variant marks a failure the caller handles differently: network
//! failures get a connectivity advisory, `ServiceUnavailable` survives the
//! one cold-start retry, other non-2xx responses carry the server's own
//! message, and `NotFoundLocal` only occurs in degraded mode when neither
//! the live cache nor the sample set knows the requested record.

use std::fmt;

/// Errors surfaced by the client, transport, and fallback layers.
#[derive(Debug)]
pub enum ApiError {
    /// No response was obtained from the server (connectivity failure).
    Network(String),

    /// The server answered 503 even after the single cold-start retry.
    ServiceUnavailable,

    /// The server returned a non-2xx status other than 503. `message` is the
    /// server payload's `message` field when present, else a generic
    /// per-status text.
    Api { status: u16, message: String },

    /// Degraded-mode lookup: the record is absent from both the last live
    /// result set and the embedded sample set.
    NotFoundLocal,

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    Deserialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::ServiceUnavailable => write!(f, "service temporarily unavailable"),
            ApiError::Api { status, message } => write!(f, "HTTP {status}: {message}"),
            ApiError::NotFoundLocal => write!(f, "not found in live results or sample data"),
            ApiError::Serialization(msg) => write!(f, "serialization failed: {msg}"),
            ApiError::Deserialization(msg) => write!(f, "deserialization failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}
