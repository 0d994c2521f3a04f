/// Pre-flight validation of upload candidates
///
/// Runs before any network call; a rejected candidate never creates a job.
use crate::shared::errors::{AppError, AppResult};

use super::super::value_objects::UploadCandidate;

/// File extensions the Import Processing Service accepts
pub const ALLOWED_EXTENSIONS: &[&str] = &["csv", "xlsx", "xls"];

/// Upload size ceiling: 10 MiB
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

pub struct UploadValidator;

impl UploadValidator {
    /// Check extension and size; pure function of the candidate's metadata
    pub fn validate(candidate: &UploadCandidate) -> AppResult<()> {
        Self::validate_extension(candidate)?;
        Self::validate_size(candidate)?;
        Ok(())
    }

    fn validate_extension(candidate: &UploadCandidate) -> AppResult<()> {
        let allowed = || {
            ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect::<Vec<_>>()
                .join(", ")
        };

        match candidate.extension() {
            Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
            Some(ext) => Err(AppError::Validation(format!(
                "Unsupported file type '.{}': allowed types are {}",
                ext,
                allowed()
            ))),
            None => Err(AppError::Validation(format!(
                "File '{}' has no extension: allowed types are {}",
                candidate.file_name(),
                allowed()
            ))),
        }
    }

    fn validate_size(candidate: &UploadCandidate) -> AppResult<()> {
        if candidate.size_bytes() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "File size {} bytes exceeds the {} MiB limit",
                candidate.size_bytes(),
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        Ok(())
    }
}
