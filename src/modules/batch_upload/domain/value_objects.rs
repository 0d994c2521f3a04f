/// Value objects for the batch upload domain
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

/// Opaque server-assigned upload identifier
///
/// Unique per submission; two submissions of the same file yield two ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(String);

impl UploadId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UploadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A file staged for upload: declared name plus content bytes
///
/// Exists only for validation and submission; never persisted.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    file_name: String,
    content: Vec<u8>,
}

impl UploadCandidate {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// Read a candidate from disk, keeping only the file name component
    pub async fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                AppError::Validation(format!("Invalid file path: {}", path.display()))
            })?
            .to_string();

        let content = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Validation(format!("Cannot read '{}': {}", file_name, e)))?;

        Ok(Self { file_name, content })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Lowercased extension without the leading dot, if any
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_lowercase())
    }

    pub fn size_bytes(&self) -> u64 {
        self.content.len() as u64
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }
}
