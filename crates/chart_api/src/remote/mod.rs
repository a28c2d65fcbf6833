pub mod analyze_response;
pub mod chart_client;
pub mod upload_response;

pub use analyze_response::{AnalyzeRequest, AnalyzeResponse};
pub use chart_client::ChartApiClient;
pub use upload_response::UploadResponse;

/// Multipart field name the upload endpoint reads the image from.
pub const UPLOAD_FIELD: &str = "chart";
