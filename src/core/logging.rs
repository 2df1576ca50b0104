//! Logging configuration and client observability
//!
//! `init_logging` sets up the tracing subscriber for the binary. The
//! library itself never installs a subscriber; instead it reports what it
//! does through an optional `ClientObserver`.

use crate::core::error::ErrorKind;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system with the specified level
///
/// `RUST_LOG` takes precedence when set. An unknown level falls back to
/// "info".
///
/// # Arguments
///
/// * `log_level` - The log level string (trace, debug, info, warning, error)
pub fn init_logging(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(normalize_level(log_level)));

    // A second initialization (e.g. from tests) is not an error
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Map a user-supplied level onto one `EnvFilter` understands
fn normalize_level(log_level: &str) -> &'static str {
    let level = log_level
        .split_whitespace()
        .next()
        .unwrap_or("info")
        .to_lowercase();

    match level.as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "info" => "info",
        "warn" | "warning" => "warn",
        "error" | "critical" => "error",
        _ => "info",
    }
}

/// Structured event emitted while a call is in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    RequestStarted {
        request_id: String,
        operation: &'static str,
        url: String,
    },
    ResponseReceived {
        request_id: String,
        operation: &'static str,
        status: u16,
        body_len: usize,
    },
    /// A 2xx body was empty or not valid JSON
    ParseFailed {
        request_id: String,
        operation: &'static str,
        status: u16,
        kind: ErrorKind,
    },
    RequestFailed {
        request_id: String,
        operation: &'static str,
        kind: ErrorKind,
    },
}

/// Receiver for client events
///
/// Observers only watch: whatever they do, the call's outcome is the same
/// as without one.
pub trait ClientObserver: Send + Sync {
    fn on_event(&self, event: &ClientEvent);
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ClientObserver for TracingObserver {
    fn on_event(&self, event: &ClientEvent) {
        match event {
            ClientEvent::RequestStarted {
                request_id,
                operation,
                url,
            } => {
                tracing::debug!(%request_id, operation, %url, "request started");
            }
            ClientEvent::ResponseReceived {
                request_id,
                operation,
                status,
                body_len,
            } => {
                tracing::debug!(%request_id, operation, status, body_len, "response received");
            }
            ClientEvent::ParseFailed {
                request_id,
                operation,
                status,
                kind,
            } => {
                tracing::warn!(
                    %request_id,
                    operation,
                    status,
                    %kind,
                    "response body could not be parsed"
                );
            }
            ClientEvent::RequestFailed {
                request_id,
                operation,
                kind,
            } => {
                tracing::warn!(%request_id, operation, %kind, "request failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_level() {
        assert_eq!(normalize_level("DEBUG"), "debug");
        assert_eq!(normalize_level("warning  # noisy"), "warn");
        assert_eq!(normalize_level("critical"), "error");
        assert_eq!(normalize_level("verbose"), "info");
        assert_eq!(normalize_level(""), "info");
    }

    #[test]
    fn test_tracing_observer_accepts_every_event() {
        let observer = TracingObserver;
        observer.on_event(&ClientEvent::RequestStarted {
            request_id: "id".to_string(),
            operation: "upload_resume",
            url: "/api/resume/upload".to_string(),
        });
        observer.on_event(&ClientEvent::ParseFailed {
            request_id: "id".to_string(),
            operation: "upload_resume",
            status: 200,
            kind: ErrorKind::EmptyBody,
        });
    }
}
