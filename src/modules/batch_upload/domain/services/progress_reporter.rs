/// Normalization of raw status payloads into observer-facing snapshots
use chrono::Utc;

use crate::shared::errors::{AppError, AppResult};

use super::super::api::UploadStatusResponse;
use super::super::entities::{JobStatus, RowError, UploadSnapshot};
use super::super::value_objects::UploadId;

/// Upper bound on row errors carried in a snapshot; the remainder is counted
/// in `truncated_errors` rather than dropped silently
pub const MAX_REPORTED_ERRORS: usize = 20;

pub struct ProgressReporter;

impl ProgressReporter {
    /// Build a snapshot from a raw status response
    ///
    /// Deterministic apart from the `received_at` stamp. An unrecognized
    /// `status` value is an error; the poller treats it like a failed query.
    pub fn normalize(upload_id: &UploadId, raw: &UploadStatusResponse) -> AppResult<UploadSnapshot> {
        let status: JobStatus = raw
            .status
            .parse()
            .map_err(|e: String| AppError::PollingTransport(e))?;

        let progress_percent = Self::normalize_percent(raw);

        let truncated_errors = raw.errors.len().saturating_sub(MAX_REPORTED_ERRORS);
        let errors = raw
            .errors
            .iter()
            .take(MAX_REPORTED_ERRORS)
            .map(|raw_error| RowError {
                row: raw_error.row,
                message: raw_error.error.clone(),
            })
            .collect();

        Ok(UploadSnapshot {
            upload_id: upload_id.clone(),
            status,
            total_rows: raw.total_rows,
            processed_rows: raw.processed_rows,
            successful_imports: raw.successful_imports,
            failed_imports: raw.failed_imports,
            progress_percent,
            errors,
            truncated_errors,
            received_at: Utc::now(),
        })
    }

    /// Clamp the server's percent to 0-100, or derive it from row counts
    fn normalize_percent(raw: &UploadStatusResponse) -> u8 {
        match raw.progress {
            Some(percent) => percent.clamp(0, 100) as u8,
            None if raw.total_rows == 0 => 0,
            None => {
                let derived = raw.processed_rows.saturating_mul(100) / raw.total_rows;
                derived.min(100) as u8
            }
        }
    }
}
