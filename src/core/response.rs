//! Response body classification
//!
//! The transport hands over a response whose body has already been read
//! exactly once into memory (`RawResponse`). Everything here works on that
//! buffered text, so logging and parsing never compete for the body stream.

use crate::core::constants::{BODY_EXCERPT_LIMIT, ERROR_MESSAGE_FIELDS};
use crate::core::error::ClientError;
use serde_json::Value;

/// A fully buffered response: status plus body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub text: String,
}

impl RawResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }

    /// Turn the response into the call's outcome
    ///
    /// 2xx bodies go through `parse_success_body`; anything else becomes
    /// `ClientError::HttpStatus` with a message extracted from the body.
    pub fn into_result(self) -> Result<Value, ClientError> {
        if self.is_success() {
            parse_success_body(self.status, &self.text)
        } else {
            Err(ClientError::HttpStatus {
                status: self.status,
                message: error_message_from_body(self.status, &self.text),
            })
        }
    }
}

/// Parse the body of a successful response
///
/// # Errors
///
/// - `EmptyBody` when the text is empty or whitespace-only
/// - `InvalidJson` when the text is not valid JSON; the error carries a
///   bounded excerpt of the text, never the whole body
pub fn parse_success_body(status: u16, text: &str) -> Result<Value, ClientError> {
    if text.trim().is_empty() {
        return Err(ClientError::EmptyBody { status });
    }

    serde_json::from_str(text).map_err(|_| ClientError::InvalidJson {
        status,
        excerpt: excerpt(text, BODY_EXCERPT_LIMIT),
    })
}

/// Build the human-readable message for a non-2xx response
///
/// Order of preference: the first usable `message` / `detail` / `error`
/// field of a JSON object body, then the raw text, then a message naming
/// the status. A body that fails to parse as JSON is never reported as a
/// parse error here; it simply falls back to its raw text.
pub fn error_message_from_body(status: u16, text: &str) -> String {
    if text.trim().is_empty() {
        return format!("Request failed with status {}", status);
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        for field in ERROR_MESSAGE_FIELDS {
            match map.get(field) {
                None | Some(Value::Null) => continue,
                Some(Value::String(s)) if s.trim().is_empty() => continue,
                Some(Value::String(s)) => return s.clone(),
                Some(other) => return other.to_string(),
            }
        }
    }

    text.to_string()
}

/// First `limit` characters of `text`, with an ellipsis when clipped
pub fn excerpt(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    match trimmed.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}
