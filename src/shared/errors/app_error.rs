use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Status polling failed: {0}")]
    PollingTransport(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Validation("bad extension".to_string());
        assert_eq!(err.to_string(), "Validation error: bad extension");

        let err = AppError::PollingTransport("connection reset".to_string());
        assert_eq!(err.to_string(), "Status polling failed: connection reset");
    }

    #[test]
    fn test_error_serializes_tagged() {
        let err = AppError::Submission("bad column headers".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Submission");
        assert_eq!(json["message"], "bad column headers");
    }
}
