/// Builders for wire-level status payloads with sensible defaults
use healthverify_client::modules::batch_upload::domain::api::{
    RawRowError, UploadStatusResponse,
};

pub fn status(status: &str) -> UploadStatusResponse {
    UploadStatusResponse {
        status: status.to_string(),
        total_rows: 0,
        processed_rows: 0,
        successful_imports: 0,
        failed_imports: 0,
        progress: None,
        errors: vec![],
    }
}

pub fn processing(total_rows: u64, processed_rows: u64) -> UploadStatusResponse {
    UploadStatusResponse {
        total_rows,
        processed_rows,
        ..status("processing")
    }
}

pub fn completed(total_rows: u64, successful: u64, failed: u64) -> UploadStatusResponse {
    UploadStatusResponse {
        total_rows,
        processed_rows: total_rows,
        successful_imports: successful,
        failed_imports: failed,
        progress: Some(100),
        ..status("completed")
    }
}

pub fn failed_with_errors(rows: &[(u64, &str)]) -> UploadStatusResponse {
    UploadStatusResponse {
        total_rows: rows.len() as u64,
        processed_rows: rows.len() as u64,
        failed_imports: rows.len() as u64,
        progress: Some(100),
        errors: rows
            .iter()
            .map(|(row, error)| RawRowError {
                row: *row,
                error: error.to_string(),
            })
            .collect(),
        ..status("failed")
    }
}
