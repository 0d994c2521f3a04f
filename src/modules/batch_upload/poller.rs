/// Status polling for submitted uploads
///
/// Each submission gets exactly one PollSession: an owned task that queries
/// the service on a fixed period until a terminal status arrives, a query
/// fails, or the session is stopped. The session is the only place a poll
/// timer lives, so stopping it (or dropping it) cannot leak a timer.
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::shared::errors::AppError;
use crate::{log_debug, log_info, log_warn};

use super::domain::api::BatchUploadApi;
use super::domain::entities::{JobStatus, UploadOutcome};
use super::domain::observer::UploadObserver;
use super::domain::services::progress_reporter::ProgressReporter;
use super::domain::value_objects::UploadId;

/// Fixed period between status queries
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Spawns poll sessions against one API endpoint
pub struct StatusPoller {
    api: Arc<dyn BatchUploadApi>,
    poll_interval: Duration,
}

impl StatusPoller {
    pub fn new(api: Arc<dyn BatchUploadApi>) -> Self {
        Self {
            api,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the poll period (tests use millisecond intervals)
    pub fn with_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Start polling `upload_id`; the first query is issued immediately
    pub fn start(&self, upload_id: UploadId, observer: Arc<dyn UploadObserver>) -> PollSession {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(Self::run(
            self.api.clone(),
            self.poll_interval,
            upload_id.clone(),
            observer,
            cancel.clone(),
        ));

        PollSession {
            upload_id,
            cancel,
            handle,
        }
    }

    async fn run(
        api: Arc<dyn BatchUploadApi>,
        poll_interval: Duration,
        upload_id: UploadId,
        observer: Arc<dyn UploadObserver>,
        cancel: CancellationToken,
    ) {
        let mut ticker = interval(poll_interval);
        // A query that outlasts its period must not cause a burst of
        // catch-up queries afterwards
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        log_info!(
            "Polling upload {} every {:?}",
            upload_id,
            poll_interval
        );

        loop {
            tokio::select! {
                // Cancellation wins over a tick that is due at the same time
                biased;
                _ = cancel.cancelled() => {
                    log_debug!("Poll session for upload {} stopped", upload_id);
                    return;
                }
                _ = ticker.tick() => {}
            }

            // The query is awaited before the next tick is taken, so at most
            // one is in flight per session
            let result = api.fetch_status(&upload_id).await;

            if cancel.is_cancelled() {
                // stop() arrived while the query was in flight; its result
                // must not be applied
                log_debug!(
                    "Discarding late status response for stopped upload {}",
                    upload_id
                );
                return;
            }

            let normalized =
                result.and_then(|raw| ProgressReporter::normalize(&upload_id, &raw));

            match normalized {
                Ok(snapshot) if snapshot.is_terminal() => {
                    log_info!(
                        "Upload {} finished with status '{}': {} imported, {} failed",
                        upload_id,
                        snapshot.status,
                        snapshot.successful_imports,
                        snapshot.failed_imports
                    );
                    let outcome = if snapshot.status == JobStatus::Failed {
                        UploadOutcome::Failed(snapshot)
                    } else {
                        UploadOutcome::Completed(snapshot)
                    };
                    observer.on_terminal(&outcome);
                    return;
                }
                Ok(snapshot) => {
                    log_debug!(
                        "Upload {} at {}% ({}/{} rows)",
                        upload_id,
                        snapshot.progress_percent,
                        snapshot.processed_rows,
                        snapshot.total_rows
                    );
                    observer.on_progress(&snapshot);
                }
                Err(e) => {
                    log_warn!("Status query for upload {} failed: {}", upload_id, e);
                    let message = match e {
                        AppError::PollingTransport(message) => message,
                        other => other.to_string(),
                    };
                    observer.on_terminal(&UploadOutcome::TransportError {
                        upload_id: upload_id.clone(),
                        message,
                    });
                    return;
                }
            }
        }
    }
}

/// Handle to one running poll loop
///
/// `stop()` is idempotent and safe after the loop has already ended on its
/// own; dropping the session stops it too.
pub struct PollSession {
    upload_id: UploadId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl PollSession {
    pub fn upload_id(&self) -> &UploadId {
        &self.upload_id
    }

    /// Cancel the pending timer without invoking terminal callbacks
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the poll task has exited (terminal, error, or stopped)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
