use serde::Deserialize;

use crate::error::ApiError;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    pub fn accepted(filename: impl Into<String>) -> Self {
        Self {
            success: true,
            filename: Some(filename.into()),
            message: None,
        }
    }

    /// The server-assigned filename, or `Rejected` when the server said no
    /// or forgot to say where it stored the file.
    pub fn into_filename(self) -> Result<String, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(
                self.message
                    .unwrap_or_else(|| "upload was not accepted".to_string()),
            ));
        }

        match self.filename {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(ApiError::Rejected(
                "upload succeeded without a filename".to_string(),
            )),
        }
    }
}
