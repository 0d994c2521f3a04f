pub mod csv_template;
pub mod progress_reporter;
pub mod upload_validator;

pub use progress_reporter::ProgressReporter;
pub use upload_validator::UploadValidator;
