use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chart_api::{AnalyzeResponse, ApiConfig, ApiError, ChartApi, UploadResponse};
use chrono::Utc;
use common::models::{AnalysisResult, SelectedFile};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    error::{Operation, ValidationError, WorkflowError},
    state::{SessionSnapshot, SessionState, StatusMessage, UPLOAD_SUCCESS},
};

/// Drives one select → upload → analyze session against a `ChartApi`.
///
/// All state lives behind a single mutex that is never held across an
/// `.await`. Each request remembers the selection generation it was started
/// for and its outcome is dropped if the user picked another file meanwhile.
pub struct WorkflowController<A: ChartApi> {
    id: Uuid,
    api: A,
    request_timeout: Duration,
    state: Mutex<SessionState>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl<A: ChartApi> WorkflowController<A> {
    pub fn new(api: A, request_timeout: Duration) -> Self {
        let id = Uuid::new_v4();
        let state = SessionState::default();
        let (snapshot_tx, _) = watch::channel(state.snapshot(id));

        Self {
            id,
            api,
            request_timeout,
            state: Mutex::new(state),
            snapshot_tx,
        }
    }

    pub fn with_config(api: A, config: &ApiConfig) -> Self {
        Self::new(api, config.request_timeout)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Runs `f` under the lock and publishes the resulting snapshot.
    fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let out = f(&mut state);
        self.snapshot_tx.send_replace(state.snapshot(self.id));
        out
    }

    async fn call<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ApiError::Timeout(self.request_timeout)),
        }
    }

    pub fn select_file(&self, file: SelectedFile) {
        info!(session = %self.id, "Selected {} ({} bytes)", file.name, file.len());
        self.update(|s| s.select(file));
    }

    pub fn reset(&self) {
        debug!(session = %self.id, "Session reset");
        self.update(SessionState::reset);
    }

    pub async fn upload_selected(&self) -> Result<String, WorkflowError> {
        let (file, generation) = self
            .update(|s| -> Result<_, WorkflowError> {
                let file = s.selected.clone().ok_or(ValidationError::NoFileSelected)?;
                if s.upload_in_flight {
                    return Err(WorkflowError::Busy(Operation::Upload));
                }
                s.upload_in_flight = true;
                s.status = None;
                Ok((file, s.generation))
            })
            .inspect_err(|e| warn!(session = %self.id, "Upload refused: {}", e))?;

        let outcome = self
            .call(self.api.upload(&file))
            .await
            .and_then(UploadResponse::into_filename)
            .map_err(WorkflowError::from);

        self.update(|s| {
            if s.generation != generation {
                debug!(session = %self.id, "Discarding upload response for {}", file.name);
                return Err(WorkflowError::Stale(Operation::Upload));
            }
            s.upload_in_flight = false;

            match outcome {
                Ok(filename) => {
                    info!(session = %self.id, "Uploaded {} as {}", file.name, filename);
                    s.uploaded_filename = Some(filename.clone());
                    s.status = Some(StatusMessage::Success(UPLOAD_SUCCESS.to_string()));
                    Ok(filename)
                }
                Err(e) => {
                    error!(session = %self.id, "Upload of {} failed: {}", file.name, e);
                    s.status = Some(StatusMessage::Failure(format!("Upload failed: {}", e)));
                    Err(e)
                }
            }
        })
    }

    pub async fn analyze_uploaded(&self) -> Result<AnalysisResult, WorkflowError> {
        let (filename, generation) = self
            .update(|s| -> Result<_, WorkflowError> {
                let filename = s
                    .uploaded_filename
                    .clone()
                    .ok_or(ValidationError::NothingUploaded)?;
                if s.analysis_in_flight {
                    return Err(WorkflowError::Busy(Operation::Analyze));
                }
                s.analysis_in_flight = true;
                if s.status.as_ref().is_some_and(StatusMessage::is_failure) {
                    s.status = None;
                }
                s.result = None;
                s.analyzed_at = None;
                Ok((filename, s.generation))
            })
            .inspect_err(|e| warn!(session = %self.id, "Analysis refused: {}", e))?;

        let outcome = self
            .call(self.api.analyze(&filename))
            .await
            .and_then(AnalyzeResponse::into_result)
            .map_err(WorkflowError::from);

        self.update(|s| {
            if s.generation != generation {
                debug!(session = %self.id, "Discarding analysis of {}", filename);
                return Err(WorkflowError::Stale(Operation::Analyze));
            }
            s.analysis_in_flight = false;

            match outcome {
                Ok(result) => {
                    info!(session = %self.id, "Analysis of {}: {} @ {}", filename, result.signal, result.entry);
                    s.result = Some(result.clone());
                    s.analyzed_at = Some(Utc::now());
                    Ok(result)
                }
                Err(e) => {
                    error!(session = %self.id, "Analysis of {} failed: {}", filename, e);
                    s.status = Some(StatusMessage::Failure(format!("Analysis failed: {}", e)));
                    Err(e)
                }
            }
        })
    }
}
