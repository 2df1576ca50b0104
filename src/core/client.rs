//! Backend API client with async support and cancellation
//!
//! This module provides the client used by the front end to upload resumes
//! and request role analyses. Each call issues exactly one request and
//! resolves to either the parsed JSON body or a `ClientError` carrying a
//! human-readable message. Calls are never retried.

use crate::core::config::ClientConfig;
use crate::core::constants::{endpoint, operation};
use crate::core::error::{ClientError, ErrorKind};
use crate::core::logging::{ClientEvent, ClientObserver};
use crate::core::transport::{OutgoingRequest, ReqwestTransport, RequestBody, Transport};
use crate::models::request::{AnalyzeRequest, UploadRequest};
use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Backend client
///
/// Cheap to clone; clones share the transport. The base URL is fixed at
/// construction.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    observer: Option<Arc<dyn ClientObserver>>,
}

impl ApiClient {
    /// Create a client using the `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns error if the underlying HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout_secs)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client on top of an arbitrary transport
    ///
    /// `config.base_url` is used exactly as resolved; no further
    /// normalization happens here.
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            transport,
            observer: None,
        }
    }

    /// Attach an observer that receives an event at each step of a call
    pub fn with_observer(mut self, observer: Arc<dyn ClientObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Resolved base URL; empty means same-origin relative requests
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute (or same-origin relative) URL for an endpoint path
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload a resume as a single-file multipart form
    ///
    /// # Errors
    ///
    /// - `Network` if no response was received
    /// - `HttpStatus` for a non-2xx response
    /// - `EmptyBody` / `InvalidJson` for an unusable 2xx body
    pub async fn upload_resume(&self, upload: UploadRequest) -> Result<Value, ClientError> {
        self.execute(
            operation::UPLOAD_RESUME,
            endpoint::RESUME_UPLOAD,
            RequestBody::Multipart(upload),
        )
        .await
    }

    /// Request a readiness analysis of a stored resume against a role
    ///
    /// Neither argument is validated here; the backend decides what it
    /// accepts.
    ///
    /// # Errors
    ///
    /// Same classification as [`ApiClient::upload_resume`]
    pub async fn analyze_role(&self, resume_id: &str, role: &str) -> Result<Value, ClientError> {
        let body = RequestBody::Analyze(AnalyzeRequest::new(resume_id, role));
        self.execute(operation::ANALYZE_ROLE, endpoint::ROLE_ANALYZE, body)
            .await
    }

    /// [`ApiClient::upload_resume`], abandoned when `cancel` fires
    pub async fn upload_resume_with_cancel(
        &self,
        upload: UploadRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, ClientError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(operation = operation::UPLOAD_RESUME, "request cancelled by caller");
                Err(ClientError::Cancelled)
            }
            result = self.upload_resume(upload) => result,
        }
    }

    /// [`ApiClient::analyze_role`], abandoned when `cancel` fires
    pub async fn analyze_role_with_cancel(
        &self,
        resume_id: &str,
        role: &str,
        cancel: &CancellationToken,
    ) -> Result<Value, ClientError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(operation = operation::ANALYZE_ROLE, "request cancelled by caller");
                Err(ClientError::Cancelled)
            }
            result = self.analyze_role(resume_id, role) => result,
        }
    }

    /// Send one request and classify its outcome
    async fn execute(
        &self,
        operation: &'static str,
        path: &str,
        body: RequestBody,
    ) -> Result<Value, ClientError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let url = self.endpoint_url(path);

        self.emit(|| ClientEvent::RequestStarted {
            request_id: request_id.clone(),
            operation,
            url: url.clone(),
        });

        let request = OutgoingRequest {
            url: url.clone(),
            body,
        };

        let raw = match self.transport.send(request).await {
            Ok(raw) => raw,
            Err(e) => {
                self.emit(|| ClientEvent::RequestFailed {
                    request_id: request_id.clone(),
                    operation,
                    kind: ErrorKind::Network,
                });
                return Err(ClientError::Network {
                    url,
                    detail: e.detail,
                });
            }
        };

        let status = raw.status;
        let success = raw.is_success();
        self.emit(|| ClientEvent::ResponseReceived {
            request_id: request_id.clone(),
            operation,
            status,
            body_len: raw.text.len(),
        });

        let result = raw.into_result();
        if let Err(error) = &result {
            if success {
                self.emit(|| ClientEvent::ParseFailed {
                    request_id: request_id.clone(),
                    operation,
                    status,
                    kind: error.kind(),
                });
            }
            self.emit(|| ClientEvent::RequestFailed {
                request_id: request_id.clone(),
                operation,
                kind: error.kind(),
            });
        }

        result
    }

    fn emit<F>(&self, event: F)
    where
        F: FnOnce() -> ClientEvent,
    {
        if let Some(observer) = &self.observer {
            observer.on_event(&event());
        }
    }
}
