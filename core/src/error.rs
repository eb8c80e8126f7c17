//! Error types for the school directory client.
//!
//! # Design
//! `NotFound` gets its own variant because a detail lookup for a stale id is
//! the one failure worth telling apart in logs. Every other non-2xx lands in
//! `Http` with the raw status and body. Transport failures happen on the
//! host side and are handed back as `Transport`. None of these distinctions
//! reach the user; the controller collapses them into one message per
//! operation.

use thiserror::Error;

/// Errors from parsing a response or from the host's round-trip.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The host could not complete the round-trip at all.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Deserialization(_) | ApiError::Transport(_) => None,
        }
    }
}
