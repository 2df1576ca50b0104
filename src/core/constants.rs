//! Constants for backend endpoints, configuration names and media types
//!
//! This module defines the string constants shared by the configuration
//! layer, the transport and the client.

/// Backend endpoint paths, appended to the resolved base URL
pub mod endpoint {
    /// Resume upload (multipart)
    pub const RESUME_UPLOAD: &str = "/api/resume/upload";

    /// Role readiness analysis (JSON)
    pub const ROLE_ANALYZE: &str = "/api/role/analyze";
}

/// Environment variable names
pub mod env {
    /// Primary base URL variable
    pub const BASE_URL: &str = "SKILL_JUDGE_API_BASE_URL";

    /// Legacy base URL variable, consulted after the primary one
    pub const LEGACY_BASE_URL: &str = "SKILL_JUDGE_API_URL";

    /// Path of the optional TOML configuration file
    pub const CONFIG_PATH: &str = "SKILL_JUDGE_CONFIG";

    /// Logging level used when no config file sets one
    pub const LOG_LEVEL: &str = "SKILL_JUDGE_LOG_LEVEL";
}

/// Media types used for uploads and JSON bodies
pub mod media_type {
    pub const JSON: &str = "application/json";
    pub const PDF: &str = "application/pdf";
    pub const DOCX: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
    pub const OCTET_STREAM: &str = "application/octet-stream";
}

/// Operation names, used in logs and observer events
pub mod operation {
    pub const UPLOAD_RESUME: &str = "upload_resume";
    pub const ANALYZE_ROLE: &str = "analyze_role";
}

/// Name of the single multipart field carrying the resume file
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "skill-judge.toml";

/// Maximum number of characters of a response body echoed in an error
pub const BODY_EXCERPT_LIMIT: usize = 150;

/// Structured message fields checked on error bodies, in order
pub const ERROR_MESSAGE_FIELDS: [&str; 3] = ["message", "detail", "error"];
