pub mod api;
pub mod entities;
pub mod observer;
pub mod services;
pub mod value_objects;

pub use entities::{JobStatus, RowError, UploadOutcome, UploadSnapshot};
pub use value_objects::{UploadCandidate, UploadId};
