pub mod modules;
pub mod shared;

// Re-exports for easy external access
pub use modules::batch_upload::{
    application::service::{BatchUploadService, UploadPhase},
    domain::{
        api::BatchUploadApi,
        entities::{JobStatus, RowError, UploadOutcome, UploadSnapshot},
        observer::UploadObserver,
        value_objects::{UploadCandidate, UploadId},
    },
    infrastructure::http_client::HttpBatchUploadApi,
    poller::{PollSession, StatusPoller},
};
pub use shared::config::ApiConfig;
pub use shared::errors::{AppError, AppResult};
pub use shared::utils::logger::init_logger;
