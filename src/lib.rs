//! Skill Judge API client
//!
//! Client library for the Skill Judge backend: resolves the backend base URL
//! once at startup, uploads resumes, requests role readiness analyses, and
//! turns every outcome into either a parsed JSON value or a `ClientError`
//! with a human-readable message.

pub mod core;
pub mod models;

pub use crate::core::client::ApiClient;
pub use crate::core::config::{ClientConfig, EndpointSources, resolve_base_url};
pub use crate::core::error::{ClientError, ErrorKind};
pub use crate::core::logging::{ClientEvent, ClientObserver, TracingObserver};
pub use crate::models::request::{AnalyzeRequest, UploadRequest};
