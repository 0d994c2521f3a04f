pub mod service;

pub use service::{BatchUploadService, UploadPhase};
