/// Outward event surface of the upload subsystem
use super::entities::{UploadOutcome, UploadSnapshot};

/// Receives lifecycle events for one upload
///
/// Snapshots arrive by reference but are plain data; observers clone what
/// they keep and must never assume a shared mutable job object exists.
/// Callbacks are invoked synchronously from the poller task, so they should
/// return quickly.
pub trait UploadObserver: Send + Sync {
    /// A new non-terminal snapshot replaced the previous one
    fn on_progress(&self, snapshot: &UploadSnapshot);

    /// The job reached a terminal outcome; fires at most once per upload
    fn on_terminal(&self, outcome: &UploadOutcome);

    /// The candidate was rejected locally; no request was made
    fn on_validation_error(&self, message: &str);

    /// The submission request failed; no job was created
    fn on_submission_error(&self, message: &str);
}
