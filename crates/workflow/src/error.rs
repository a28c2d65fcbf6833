use chart_api::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Upload,
    Analyze,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upload => write!(f, "upload"),
            Self::Analyze => write!(f, "analysis"),
        }
    }
}

/// Preconditions the user has to satisfy before a stage may run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select an image")]
    NoFileSelected,
    #[error("Upload image first")]
    NothingUploaded,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("An {0} is already in progress")]
    Busy(Operation),
    #[error("The selected image changed while the {0} was in flight")]
    Stale(Operation),
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Unexpected server response: {0}")]
    Protocol(String),
}

impl From<ApiError> for WorkflowError {
    fn from(err: ApiError) -> Self {
        if err.is_protocol() {
            Self::Protocol(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl WorkflowError {
    /// Validation, busy and stale rejections never reach the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Protocol(_))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_api_errors_split_into_transport_and_protocol() {
        let timeout = WorkflowError::from(ApiError::Timeout(Duration::from_secs(30)));
        assert!(matches!(timeout, WorkflowError::Transport(_)));

        let rejected = WorkflowError::from(ApiError::Rejected("upload was not accepted".into()));
        assert_eq!(
            rejected,
            WorkflowError::Protocol("Server rejected the request: upload was not accepted".into())
        );
        assert!(rejected.is_remote());
    }

    #[test]
    fn test_validation_prompts() {
        assert_eq!(
            WorkflowError::from(ValidationError::NoFileSelected).to_string(),
            "Please select an image"
        );
        assert_eq!(ValidationError::NothingUploaded.to_string(), "Upload image first");
        assert!(!WorkflowError::Busy(Operation::Analyze).is_remote());
        assert_eq!(
            WorkflowError::Busy(Operation::Upload).to_string(),
            "An upload is already in progress"
        );
    }
}
