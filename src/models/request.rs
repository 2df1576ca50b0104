//! Request payloads

use crate::core::constants::media_type;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A resume file to upload as the single multipart field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub media_type: String,
}

impl UploadRequest {
    pub fn new(
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            media_type: media_type.into(),
        }
    }

    /// Read a file from disk, inferring its media type from the extension
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());

        Ok(Self::new(bytes, file_name, media_type_for(path)))
    }
}

/// Media type for a resume file, by extension
///
/// Unknown extensions are sent as `application/octet-stream`; the backend
/// decides whether it accepts them.
pub fn media_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("pdf") => media_type::PDF,
        Some("docx") => media_type::DOCX,
        _ => media_type::OCTET_STREAM,
    }
}

/// Body of `POST /api/role/analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub resume_id: String,
    pub role: String,
}

impl AnalyzeRequest {
    pub fn new(resume_id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            resume_id: resume_id.into(),
            role: role.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_media_type_for_known_extensions() {
        assert_eq!(media_type_for(Path::new("cv.pdf")), media_type::PDF);
        assert_eq!(media_type_for(Path::new("CV.DOCX")), media_type::DOCX);
        assert_eq!(media_type_for(Path::new("cv.txt")), media_type::OCTET_STREAM);
        assert_eq!(media_type_for(Path::new("resume")), media_type::OCTET_STREAM);
    }

    #[test]
    fn test_analyze_request_serialization() {
        let request = AnalyzeRequest::new("r1", "Senior Software Engineer");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"resume_id": "r1", "role": "Senior Software Engineer"}));
    }

    #[test]
    fn test_analyze_request_keeps_empty_role() {
        let value = serde_json::to_value(AnalyzeRequest::new("r1", "")).unwrap();
        assert_eq!(value["role"], json!(""));
    }

    #[tokio::test]
    async fn test_upload_request_from_path() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4 fake").unwrap();
        file.flush().unwrap();

        let request = UploadRequest::from_path(file.path()).await.unwrap();
        assert_eq!(request.bytes, b"%PDF-1.4 fake");
        assert_eq!(request.media_type, media_type::PDF);
        assert!(request.file_name.ends_with(".pdf"));
    }

    #[tokio::test]
    async fn test_upload_request_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = UploadRequest::from_path(dir.path().join("missing.docx")).await;
        assert!(result.is_err());
    }
}
