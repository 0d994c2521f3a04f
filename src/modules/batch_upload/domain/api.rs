/// Contract with the Import Processing Service
///
/// The trait is the seam between orchestration and transport: the controller
/// and poller depend on it, the HTTP client implements it, and tests swap in
/// scripted doubles.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::errors::AppResult;

use super::value_objects::{UploadCandidate, UploadId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchUploadApi: Send + Sync {
    /// Submit a validated file as one multipart request
    ///
    /// Exactly one outbound request per call; no automatic retry. Submitting
    /// the same file twice yields two independent jobs.
    async fn submit(&self, candidate: &UploadCandidate) -> AppResult<UploadId>;

    /// Query the current status of a submitted upload
    async fn fetch_status(&self, upload_id: &UploadId) -> AppResult<UploadStatusResponse>;
}

/// Response body of `POST /employees/batch-upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub upload_id: String,
}

/// Error body the service returns on a rejected submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: String,
}

/// Raw status payload of `GET /employees/batch-upload/{upload_id}/status`
///
/// Taken as-is from the wire; `ProgressReporter::normalize` turns it into an
/// `UploadSnapshot` for observers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadStatusResponse {
    pub status: String,
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub processed_rows: u64,
    #[serde(default)]
    pub successful_imports: u64,
    #[serde(default)]
    pub failed_imports: u64,
    /// Explicit percent; the server may omit it while queued
    #[serde(default)]
    pub progress: Option<i64>,
    /// Truncated sample of row-level errors, server-capped
    #[serde(default)]
    pub errors: Vec<RawRowError>,
}

/// One row-level error as reported on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRowError {
    pub row: u64,
    pub error: String,
}
