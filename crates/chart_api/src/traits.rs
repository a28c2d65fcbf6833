use async_trait::async_trait;
use common::models::SelectedFile;

use crate::{
    error::ApiError,
    remote::{AnalyzeResponse, UploadResponse},
};

/// The backend contract consumed by the workflow. Implementations perform
/// exactly one round trip per call and never retry.
#[async_trait]
pub trait ChartApi: Send + Sync {
    /// `POST /upload` with the file as the `chart` multipart field.
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, ApiError>;

    /// `POST /api/analyze` with `{ "filename": ... }`.
    async fn analyze(&self, filename: &str) -> Result<AnalyzeResponse, ApiError>;
}
