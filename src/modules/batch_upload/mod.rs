pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod poller;

// Re-exports for easy external access
pub use application::service::BatchUploadService;
pub use domain::api::BatchUploadApi;
pub use domain::observer::UploadObserver;
pub use poller::{PollSession, StatusPoller};

// Re-export common types for shorter imports
pub use domain::entities::{JobStatus, RowError, UploadOutcome, UploadSnapshot};
pub use domain::value_objects::{UploadCandidate, UploadId};
