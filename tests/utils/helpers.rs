/// Test doubles and helpers for upload orchestration tests
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use healthverify_client::modules::batch_upload::domain::api::{
    BatchUploadApi, UploadStatusResponse,
};
use healthverify_client::{
    AppError, AppResult, UploadCandidate, UploadId, UploadObserver, UploadOutcome, UploadSnapshot,
};

/// Scripted stand-in for the Import Processing Service
///
/// Status responses are served in order; counters record exactly how many
/// requests the orchestration issued.
pub struct ScriptedApi {
    submit_result: Mutex<Option<AppResult<UploadId>>>,
    responses: Mutex<VecDeque<AppResult<UploadStatusResponse>>>,
    submit_delay: Duration,
    status_delay: Duration,
    submit_calls: AtomicUsize,
    status_calls: AtomicUsize,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self {
            submit_result: Mutex::new(None),
            responses: Mutex::new(VecDeque::new()),
            submit_delay: Duration::ZERO,
            status_delay: Duration::ZERO,
            submit_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_submit_ok(self, upload_id: &str) -> Self {
        *self.submit_result.lock().unwrap() = Some(Ok(UploadId::new(upload_id)));
        self
    }

    pub fn with_submit_err(self, message: &str) -> Self {
        *self.submit_result.lock().unwrap() =
            Some(Err(AppError::Submission(message.to_string())));
        self
    }

    pub fn with_responses(
        self,
        responses: impl IntoIterator<Item = AppResult<UploadStatusResponse>>,
    ) -> Self {
        self.responses.lock().unwrap().extend(responses);
        self
    }

    /// Delay every submit call, to hold the controller in `Submitting`
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    /// Delay every status call, to keep a query in flight
    pub fn with_status_delay(mut self, delay: Duration) -> Self {
        self.status_delay = delay;
        self
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BatchUploadApi for ScriptedApi {
    async fn submit(&self, _candidate: &UploadCandidate) -> AppResult<UploadId> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }
        self.submit_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(UploadId::new("upload-1")))
    }

    async fn fetch_status(&self, _upload_id: &UploadId) -> AppResult<UploadStatusResponse> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        if !self.status_delay.is_zero() {
            tokio::time::sleep(self.status_delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(AppError::PollingTransport(
                    "scripted responses exhausted".to_string(),
                ))
            })
    }
}

/// Observer that records every event it receives
#[derive(Default)]
pub struct RecordingObserver {
    pub progress: Mutex<Vec<UploadSnapshot>>,
    pub terminals: Mutex<Vec<UploadOutcome>>,
    pub validation_errors: Mutex<Vec<String>>,
    pub submission_errors: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress_count(&self) -> usize {
        self.progress.lock().unwrap().len()
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.lock().unwrap().len()
    }

    pub fn last_terminal(&self) -> Option<UploadOutcome> {
        self.terminals.lock().unwrap().last().cloned()
    }
}

impl UploadObserver for RecordingObserver {
    fn on_progress(&self, snapshot: &UploadSnapshot) {
        self.progress.lock().unwrap().push(snapshot.clone());
    }

    fn on_terminal(&self, outcome: &UploadOutcome) {
        self.terminals.lock().unwrap().push(outcome.clone());
    }

    fn on_validation_error(&self, message: &str) {
        self.validation_errors.lock().unwrap().push(message.to_string());
    }

    fn on_submission_error(&self, message: &str) {
        self.submission_errors.lock().unwrap().push(message.to_string());
    }
}

/// Poll `condition` until it holds or `timeout` elapses
pub async fn wait_until(condition: impl Fn() -> bool, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}

/// A small valid candidate: 2 data rows of employee CSV
pub fn two_row_csv() -> UploadCandidate {
    let body = "first_name,last_name,email\n\
                John,Doe,john.doe@example.com\n\
                Jane,Smith,jane.smith@example.com\n";
    UploadCandidate::new("employees.csv", body.as_bytes().to_vec())
}
