use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use common::models::{AnalysisResult, SelectedFile};
use uuid::Uuid;

pub const UPLOAD_SUCCESS: &str = "Image uploaded successfully";

/// Where the session sits in the select → upload → analyze flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Selected,
    Uploaded,
    Analyzing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Success(String),
    Failure(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Mutable session state. Only `WorkflowController` writes to it.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub selected: Option<Arc<SelectedFile>>,
    pub uploaded_filename: Option<String>,
    pub status: Option<StatusMessage>,
    pub result: Option<AnalysisResult>,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub upload_in_flight: bool,
    pub analysis_in_flight: bool,
    /// Bumped on every selection; requests carry the value they started with.
    pub generation: u64,
}

impl SessionState {
    pub fn stage(&self) -> Stage {
        if self.selected.is_none() {
            Stage::Idle
        } else if self.analysis_in_flight {
            Stage::Analyzing
        } else if self.uploaded_filename.is_some() {
            Stage::Uploaded
        } else {
            Stage::Selected
        }
    }

    /// Replaces the selection and drops everything derived from the old one.
    pub fn select(&mut self, file: SelectedFile) {
        self.generation += 1;
        self.selected = Some(Arc::new(file));
        self.clear_downstream();
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.selected = None;
        self.clear_downstream();
    }

    fn clear_downstream(&mut self) {
        self.uploaded_filename = None;
        self.status = None;
        self.result = None;
        self.analyzed_at = None;
        // requests still running belong to the old generation and will be dropped
        self.upload_in_flight = false;
        self.analysis_in_flight = false;
    }

    pub fn snapshot(&self, session_id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            stage: self.stage(),
            selected_name: self.selected.as_ref().map(|f| f.name.clone()),
            uploaded_filename: self.uploaded_filename.clone(),
            status: self.status.clone(),
            result: self.result.clone(),
            analyzed_at: self.analyzed_at,
            upload_in_flight: self.upload_in_flight,
            analysis_in_flight: self.analysis_in_flight,
        }
    }
}

/// Read-only view of a session, published to renderers on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub stage: Stage,
    pub selected_name: Option<String>,
    pub uploaded_filename: Option<String>,
    pub status: Option<StatusMessage>,
    pub result: Option<AnalysisResult>,
    pub analyzed_at: Option<DateTime<Utc>>,
    pub upload_in_flight: bool,
    pub analysis_in_flight: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_follows_fields() {
        let mut state = SessionState::default();
        assert_eq!(state.stage(), Stage::Idle);

        state.select(SelectedFile::new("a.png", vec![1]));
        assert_eq!(state.stage(), Stage::Selected);

        state.uploaded_filename = Some("f1".into());
        assert_eq!(state.stage(), Stage::Uploaded);

        state.analysis_in_flight = true;
        assert_eq!(state.stage(), Stage::Analyzing);

        state.reset();
        assert_eq!(state.stage(), Stage::Idle);
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_select_clears_downstream() {
        let mut state = SessionState::default();
        state.select(SelectedFile::new("a.png", vec![1]));
        state.uploaded_filename = Some("f1".into());
        state.status = Some(StatusMessage::Success(UPLOAD_SUCCESS.into()));
        state.analyzed_at = Some(Utc::now());
        state.upload_in_flight = true;

        state.select(SelectedFile::new("b.png", vec![2]));
        let snap = state.snapshot(Uuid::nil());

        assert_eq!(snap.selected_name.as_deref(), Some("b.png"));
        assert_eq!(snap.uploaded_filename, None);
        assert_eq!(snap.status, None);
        assert_eq!(snap.analyzed_at, None);
        assert!(!snap.upload_in_flight);
        assert_eq!(snap.stage, Stage::Selected);
    }
}
