pub mod config;
pub mod error;
pub mod remote;
pub mod traits;

pub use config::ApiConfig;
pub use error::ApiError;
pub use remote::{AnalyzeResponse, ChartApiClient, UploadResponse};
pub use traits::ChartApi;
