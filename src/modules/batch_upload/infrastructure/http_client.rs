/// HTTP implementation of the Import Processing Service contract
use async_trait::async_trait;
use reqwest::multipart;
use reqwest::Client;
use tracing::{debug, warn};

use crate::shared::config::ApiConfig;
use crate::shared::errors::{AppError, AppResult};

use super::super::domain::api::{
    ApiErrorResponse, BatchUploadApi, SubmitResponse, UploadStatusResponse,
};
use super::super::domain::value_objects::{UploadCandidate, UploadId};

const USER_AGENT: &str = "HealthVerify-Client/1.0";

pub struct HttpBatchUploadApi {
    client: Client,
    base_url: String,
}

impl HttpBatchUploadApi {
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    fn submit_url(&self) -> String {
        format!("{}/employees/batch-upload", self.base_url)
    }

    fn status_url(&self, upload_id: &UploadId) -> String {
        format!("{}/employees/batch-upload/{}/status", self.base_url, upload_id)
    }
}

#[async_trait]
impl BatchUploadApi for HttpBatchUploadApi {
    async fn submit(&self, candidate: &UploadCandidate) -> AppResult<UploadId> {
        let url = self.submit_url();
        debug!("POST {} ({} bytes)", url, candidate.size_bytes());

        let part = multipart::Part::bytes(candidate.content().to_vec())
            .file_name(candidate.file_name().to_string());
        let form = multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                AppError::Submission(format!("Failed to reach the import service: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Upload rejected with HTTP {}: {}", status, body);
            // The service explains rejections in a `detail` field
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.detail)
                .unwrap_or_else(|_| format!("Upload rejected with HTTP {}", status));
            return Err(AppError::Submission(message));
        }

        let submitted = response.json::<SubmitResponse>().await.map_err(|e| {
            AppError::Submission(format!("Malformed submission response: {}", e))
        })?;

        debug!("Upload accepted as {}", submitted.upload_id);
        Ok(UploadId::new(submitted.upload_id))
    }

    async fn fetch_status(&self, upload_id: &UploadId) -> AppResult<UploadStatusResponse> {
        let url = self.status_url(upload_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::PollingTransport(format!("Status query failed to complete: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Status query for {} returned HTTP {}", upload_id, status);
            return Err(AppError::PollingTransport(format!(
                "Status query returned HTTP {}",
                status
            )));
        }

        response.json::<UploadStatusResponse>().await.map_err(|e| {
            AppError::PollingTransport(format!("Malformed status response: {}", e))
        })
    }
}
