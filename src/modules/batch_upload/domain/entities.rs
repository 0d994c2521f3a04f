/// Domain entities for the batch upload subsystem
///
/// An upload job lives on the server; the client only ever holds immutable
/// snapshots of its status, replaced wholesale with each poll response.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::UploadId;

/// Server-side job status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Terminal statuses produce no further progress updates
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Processing => write!(f, "processing"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "queued" => Ok(JobStatus::Queued),
            "processing" => Ok(JobStatus::Processing),
            "completed" => Ok(JobStatus::Completed),
            "failed" => Ok(JobStatus::Failed),
            _ => Err(format!("Invalid job status: {}", s)),
        }
    }
}

/// A single row-level import error reported by the server
///
/// Row errors are informational: they never fail the job on their own and
/// are always reported alongside the success/failure counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub row: u64,
    pub message: String,
}

/// Immutable snapshot of an upload job's status at one point in time
///
/// Handed to observers by value; the controller owns the only mutable slot
/// and replaces it wholesale per status response (no partial merge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSnapshot {
    pub upload_id: UploadId,
    pub status: JobStatus,
    pub total_rows: u64,
    pub processed_rows: u64,
    pub successful_imports: u64,
    pub failed_imports: u64,
    /// Normalized to 0-100
    pub progress_percent: u8,
    /// Capped sample of row-level errors (first N entries)
    pub errors: Vec<RowError>,
    /// How many server-reported errors fell outside the cap
    pub truncated_errors: usize,
    /// When the client received the status response this snapshot reflects
    pub received_at: DateTime<Utc>,
}

impl UploadSnapshot {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// How a poll session ended
///
/// A transport error during polling is kept distinct from a server-declared
/// failure so callers can offer a manual retry instead of reporting row-level
/// failures that do not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum UploadOutcome {
    /// Server reports the job finished; all rows accounted for
    Completed(UploadSnapshot),
    /// Server reports the job finished unsuccessfully, with error samples
    Failed(UploadSnapshot),
    /// A status query could not be completed; the job's true state is unknown
    TransportError { upload_id: UploadId, message: String },
}

impl UploadOutcome {
    pub fn upload_id(&self) -> &UploadId {
        match self {
            UploadOutcome::Completed(snapshot) | UploadOutcome::Failed(snapshot) => {
                &snapshot.upload_id
            }
            UploadOutcome::TransportError { upload_id, .. } => upload_id,
        }
    }

    /// The final snapshot, when the server produced one
    pub fn snapshot(&self) -> Option<&UploadSnapshot> {
        match self {
            UploadOutcome::Completed(snapshot) | UploadOutcome::Failed(snapshot) => Some(snapshot),
            UploadOutcome::TransportError { .. } => None,
        }
    }
}
