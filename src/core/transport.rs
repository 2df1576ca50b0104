//! Transport abstraction for backend requests
//!
//! A `Transport` performs exactly one outbound POST and hands back the
//! response with its body already read into memory. The body stream is
//! consumed once, here, and everything downstream works on the buffered
//! text.

use crate::core::constants::{UPLOAD_FIELD_NAME, env, media_type};
use crate::core::response::RawResponse;
use crate::models::request::{AnalyzeRequest, UploadRequest};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use thiserror::Error;

/// Body of an outbound request
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// Single-file multipart form; the transport sets the boundary header
    Multipart(UploadRequest),
    /// Role analysis, serialized as JSON with `Content-Type: application/json`
    Analyze(AnalyzeRequest),
}

/// One outbound POST
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub url: String,
    pub body: RequestBody,
}

/// No response could be obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}")]
pub struct TransportError {
    pub detail: String,
}

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Trait for pluggable HTTP transports
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and buffer the response body
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when no complete response was received,
    /// including a connection lost after the status line but before the
    /// body was fully read. A received response is never an error here,
    /// whatever its status.
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError>;
}

/// Transport backed by `reqwest`
///
/// The client has no cookie store, so no credentials are ever attached.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport
    ///
    /// # Arguments
    ///
    /// * `timeout_secs` - Optional whole-request timeout; `None` disables it
    pub fn new(timeout_secs: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    fn build_request(
        &self,
        request: OutgoingRequest,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        let builder = self.client.post(&request.url);

        match request.body {
            RequestBody::Multipart(upload) => {
                let part = Part::bytes(upload.bytes)
                    .file_name(upload.file_name)
                    .mime_str(&upload.media_type)
                    .map_err(|e| {
                        TransportError::new(format!(
                            "invalid media type '{}': {}",
                            upload.media_type, e
                        ))
                    })?;
                Ok(builder.multipart(Form::new().part(UPLOAD_FIELD_NAME, part)))
            }
            RequestBody::Analyze(analyze) => Ok(builder
                .header(CONTENT_TYPE, media_type::JSON)
                .json(&analyze)),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        // A native process has no page origin to resolve relative URLs against
        if request.url.starts_with('/') {
            return Err(TransportError::new(format!(
                "no base URL configured for {}; set {} or pass --base-url",
                request.url,
                env::BASE_URL
            )));
        }

        let response = self
            .build_request(request)?
            .send()
            .await
            .map_err(|e| TransportError::new(error_chain(&e)))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            TransportError::new(format!(
                "connection lost while reading the response body (HTTP {}): {}",
                status,
                error_chain(&e)
            ))
        })?;

        Ok(RawResponse { status, text })
    }
}

/// Flatten an error and its sources into one line
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}
