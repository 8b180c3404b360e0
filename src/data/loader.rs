//! Payload Loader Module
//! Reads a dashboard export from disk and tracks the current payload.

use crate::data::DashboardPayload;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Failed to read payload: {0}")]
    Io(#[from] std::io::Error),
    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No payload loaded")]
    NoPayload,
}

/// Holds the currently loaded dashboard payload and where it came from.
pub struct PayloadLoader {
    payload: Option<DashboardPayload>,
    file_path: Option<PathBuf>,
}

impl Default for PayloadLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadLoader {
    pub fn new() -> Self {
        Self {
            payload: None,
            file_path: None,
        }
    }

    /// Parse a payload document from a JSON string. Section-level problems
    /// degrade to skipped charts; only an unreadable document is an error.
    pub fn parse(text: &str) -> Result<DashboardPayload, PayloadError> {
        let doc: serde_json::Value = serde_json::from_str(text)?;
        Ok(DashboardPayload::from_value(&doc))
    }

    /// Load a payload file from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<&DashboardPayload, PayloadError> {
        let text = fs::read_to_string(path)?;
        let payload = Self::parse(&text)?;
        info!("loaded payload from {}", path.display());

        self.file_path = Some(path.to_path_buf());
        self.payload = Some(payload);
        self.payload.as_ref().ok_or(PayloadError::NoPayload)
    }

    /// Set the payload directly (used for async loading and the demo).
    pub fn set_payload(&mut self, payload: DashboardPayload, path: Option<PathBuf>) {
        self.payload = Some(payload);
        self.file_path = path;
    }

    /// Get the current payload.
    pub fn payload(&self) -> Option<&DashboardPayload> {
        self.payload.as_ref()
    }

    /// Get file path of the current payload, if it came from disk.
    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_a_payload_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"breakdown": {{"labels": ["Food"], "series": [42.0]}}}}"#
        )
        .expect("write payload");

        let mut loader = PayloadLoader::new();
        let payload = loader.load_file(file.path()).expect("load");
        assert!(payload.trend.is_none());
        assert!(payload.breakdown.is_some());
        assert_eq!(loader.file_path(), Some(&file.path().to_path_buf()));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let mut loader = PayloadLoader::new();
        let err = loader
            .load_file(Path::new("/definitely/not/here.json"))
            .expect_err("missing file");
        assert!(matches!(err, PayloadError::Io(_)));
        assert!(loader.payload().is_none());
    }

    #[test]
    fn invalid_json_document_is_a_parse_error() {
        let err = PayloadLoader::parse("{not json").expect_err("bad json");
        assert!(matches!(err, PayloadError::Json(_)));
    }
}
