use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Server rejected the request: {0}")]
    Rejected(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// True when a response arrived but could not be used.
    pub fn is_protocol(&self) -> bool {
        match self {
            Self::Decode(_) | Self::Rejected(_) => true,
            Self::Http(e) => e.is_decode(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_classification() {
        let decode = serde_json::from_str::<u8>("nope").unwrap_err();

        assert!(ApiError::Decode(decode).is_protocol());
        assert!(ApiError::Rejected("success=false".into()).is_protocol());
        assert!(!ApiError::Timeout(Duration::from_secs(30)).is_protocol());
        assert!(
            !ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: String::new(),
            }
            .is_protocol()
        );
    }

    #[test]
    fn test_status_message_includes_body() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            body: "no file".into(),
        };
        assert_eq!(err.to_string(), "Server responded with 400 Bad Request: no file");
    }
}
