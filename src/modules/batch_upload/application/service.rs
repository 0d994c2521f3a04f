/// Upload lifecycle controller
///
/// Ties validation, submission and polling together behind one state
/// machine. All mutable upload state is owned here; observers only ever see
/// immutable copies.
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::shared::errors::{AppError, AppResult};
use crate::{log_info, log_warn};

use super::super::domain::api::BatchUploadApi;
use super::super::domain::entities::{UploadOutcome, UploadSnapshot};
use super::super::domain::observer::UploadObserver;
use super::super::domain::services::upload_validator::UploadValidator;
use super::super::domain::value_objects::{UploadCandidate, UploadId};
use super::super::poller::{PollSession, StatusPoller};

/// Where the controller currently is in an upload's life
///
/// Tagged variants instead of boolean/nullable flag combinations: a phase
/// carries exactly the data that is valid in it.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadPhase {
    Idle,
    Validating,
    Submitting,
    Polling { upload_id: UploadId },
    Terminal(UploadOutcome),
}

impl UploadPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, UploadPhase::Idle)
    }
}

struct ControllerState {
    phase: UploadPhase,
    session: Option<PollSession>,
    snapshot: Option<UploadSnapshot>,
    /// Incremented per submission attempt; a cancelled attempt's in-flight
    /// submit result must not touch a newer attempt's state
    attempt: u64,
}

impl ControllerState {
    fn release_job(&mut self) {
        // Stop-on-drop: taking the session cancels any live timer
        self.session = None;
        self.snapshot = None;
        self.phase = UploadPhase::Idle;
    }
}

/// Coordinates one upload at a time from validation to acknowledgement
pub struct BatchUploadService {
    api: Arc<dyn BatchUploadApi>,
    poller: StatusPoller,
    observer: Arc<dyn UploadObserver>,
    state: Arc<Mutex<ControllerState>>,
}

impl BatchUploadService {
    pub fn new(api: Arc<dyn BatchUploadApi>, observer: Arc<dyn UploadObserver>) -> Self {
        Self {
            poller: StatusPoller::new(api.clone()),
            api,
            observer,
            state: Arc::new(Mutex::new(ControllerState {
                phase: UploadPhase::Idle,
                session: None,
                snapshot: None,
                attempt: 0,
            })),
        }
    }

    /// Override the poll period (tests use millisecond intervals)
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poller = self.poller.with_interval(poll_interval);
        self
    }

    /// Validate, submit and begin polling one candidate file
    ///
    /// Returns the server-assigned upload id; by the time it returns the
    /// controller is already in `Polling` with its single live session.
    /// Rejected while any other upload is active.
    pub async fn start_upload(&self, candidate: UploadCandidate) -> AppResult<UploadId> {
        let attempt = {
            let mut state = self.lock_state();
            if !state.phase.is_idle() {
                return Err(AppError::InvalidState(
                    "An upload is already in progress; cancel or acknowledge it first".to_string(),
                ));
            }
            state.phase = UploadPhase::Validating;
            state.attempt += 1;
            state.attempt
        };

        if let Err(e) = UploadValidator::validate(&candidate) {
            let message = match &e {
                AppError::Validation(message) => message.clone(),
                other => other.to_string(),
            };
            log_warn!("Rejected '{}': {}", candidate.file_name(), message);
            self.observer.on_validation_error(&message);
            self.lock_state().release_job();
            return Err(e);
        }

        self.lock_state().phase = UploadPhase::Submitting;
        log_info!(
            "Submitting '{}' ({} bytes)",
            candidate.file_name(),
            candidate.size_bytes()
        );

        match self.api.submit(&candidate).await {
            Ok(upload_id) => {
                // Session creation and the phase change happen under one
                // lock so no intermediate state is observable
                let mut state = self.lock_state();
                let still_current =
                    state.attempt == attempt && matches!(state.phase, UploadPhase::Submitting);
                if !still_current {
                    // cancel() won while the submission was in flight; the
                    // job exists server-side but is abandoned unobserved
                    log_info!("Upload {} discarded: cancelled during submission", upload_id);
                    return Err(AppError::InvalidState(
                        "Upload cancelled during submission".to_string(),
                    ));
                }
                let lifecycle = Arc::new(LifecycleObserver {
                    state: self.state.clone(),
                    inner: self.observer.clone(),
                });
                state.session = Some(self.poller.start(upload_id.clone(), lifecycle));
                state.snapshot = None;
                state.phase = UploadPhase::Polling {
                    upload_id: upload_id.clone(),
                };
                log_info!("Upload accepted as {}", upload_id);
                Ok(upload_id)
            }
            Err(e) => {
                let message = match &e {
                    AppError::Submission(message) => message.clone(),
                    other => other.to_string(),
                };
                let was_current = {
                    let mut state = self.lock_state();
                    let was_current = state.attempt == attempt
                        && matches!(state.phase, UploadPhase::Submitting);
                    if was_current {
                        state.release_job();
                    }
                    was_current
                };
                log_warn!("Submission of '{}' failed: {}", candidate.file_name(), message);
                if was_current {
                    self.observer.on_submission_error(&message);
                }
                Err(e)
            }
        }
    }

    /// Abandon the current upload, whatever phase it is in
    ///
    /// Stops any live poll session and returns to `Idle` without terminal
    /// callbacks. Safe to call repeatedly; a no-op when idle.
    pub fn cancel(&self) {
        let mut state = self.lock_state();
        if state.phase.is_idle() {
            return;
        }
        if let Some(session) = state.session.take() {
            session.stop();
            log_info!("Cancelled polling for upload {}", session.upload_id());
        }
        state.snapshot = None;
        state.phase = UploadPhase::Idle;
    }

    /// Caller has seen the terminal result; release the job and return to
    /// `Idle` so a new file can be uploaded
    pub fn acknowledge(&self) {
        let mut state = self.lock_state();
        if matches!(state.phase, UploadPhase::Terminal(_)) {
            state.release_job();
        } else {
            log_warn!("acknowledge() called outside a terminal phase; ignoring");
        }
    }

    /// Current phase (cloned)
    pub fn phase(&self) -> UploadPhase {
        self.lock_state().phase.clone()
    }

    /// Latest snapshot applied for the active or just-finished job
    pub fn latest_snapshot(&self) -> Option<UploadSnapshot> {
        self.lock_state().snapshot.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ControllerState> {
        // A poisoned lock means an observer panicked; the state itself is
        // still coherent because every mutation is a whole-value assignment
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Applies poller events to controller state before forwarding them outward
///
/// The phase/id guard makes stale events inert: a late callback from a
/// cancelled or superseded session matches neither the phase nor the active
/// upload id and is dropped.
struct LifecycleObserver {
    state: Arc<Mutex<ControllerState>>,
    inner: Arc<dyn UploadObserver>,
}

impl LifecycleObserver {
    fn is_current(state: &ControllerState, id: &UploadId) -> bool {
        matches!(&state.phase, UploadPhase::Polling { upload_id } if upload_id == id)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl UploadObserver for LifecycleObserver {
    fn on_progress(&self, snapshot: &UploadSnapshot) {
        {
            let mut state = self.lock_state();
            if !Self::is_current(&state, &snapshot.upload_id) {
                return;
            }
            state.snapshot = Some(snapshot.clone());
        }
        self.inner.on_progress(snapshot);
    }

    fn on_terminal(&self, outcome: &UploadOutcome) {
        {
            let mut state = self.lock_state();
            if !Self::is_current(&state, outcome.upload_id()) {
                return;
            }
            if let Some(snapshot) = outcome.snapshot() {
                state.snapshot = Some(snapshot.clone());
            }
            // The poll task is exiting; dropping the session here releases
            // the timer handle with it
            state.session = None;
            state.phase = UploadPhase::Terminal(outcome.clone());
        }
        self.inner.on_terminal(outcome);
    }

    fn on_validation_error(&self, message: &str) {
        self.inner.on_validation_error(message);
    }

    fn on_submission_error(&self, message: &str) {
        self.inner.on_submission_error(message);
    }
}
