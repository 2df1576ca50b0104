//! Error taxonomy for backend calls
//!
//! Every failure of `upload_resume` / `analyze_role` surfaces as one
//! `ClientError` whose `Display` is a short, human-readable message that can
//! be shown as-is in an error banner.

use std::fmt;
use thiserror::Error;

/// Error types that can occur while talking to the backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// No complete response was received (DNS, refused connection,
    /// timeout, connection lost mid-body, ...)
    #[error(
        "Request to {url} failed: {detail}. \
         Check the configured base URL and the backend's CORS policy."
    )]
    Network { url: String, detail: String },

    /// A response arrived with a status outside 200-299
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// A 2xx response carried no body
    #[error("The server returned an empty response (HTTP {status}).")]
    EmptyBody { status: u16 },

    /// A 2xx response carried a body that is not valid JSON
    #[error("The server returned an invalid JSON response (HTTP {status}): {excerpt}")]
    InvalidJson { status: u16, excerpt: String },

    /// The caller's cancellation token fired before the call completed
    #[error("Request cancelled by caller")]
    Cancelled,
}

/// Tag of a `ClientError`, for callers that branch on the failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    HttpStatus,
    EmptyBody,
    InvalidJson,
    Cancelled,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network { .. } => ErrorKind::Network,
            ClientError::HttpStatus { .. } => ErrorKind::HttpStatus,
            ClientError::EmptyBody { .. } => ErrorKind::EmptyBody,
            ClientError::InvalidJson { .. } => ErrorKind::InvalidJson,
            ClientError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// HTTP status of the response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::HttpStatus { status, .. }
            | ClientError::EmptyBody { status }
            | ClientError::InvalidJson { status, .. } => Some(*status),
            ClientError::Network { .. } | ClientError::Cancelled => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Network => "network",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::EmptyBody => "empty_body",
            ErrorKind::InvalidJson => "invalid_json",
            ErrorKind::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}
