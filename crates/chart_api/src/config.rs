use std::env;
use std::time::Duration;

use url::Url;

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const UPLOAD_PATH: &str = "upload";
const ANALYZE_PATH: &str = "api/analyze";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: Url,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl ApiConfig {
    /// Reads `CHART_API_BASE_URL` and `CHART_API_TIMEOUT_SECS`. Call `dotenvy::dotenv()` first
    /// if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_vars(
            env::var("CHART_API_BASE_URL").ok(),
            env::var("CHART_API_TIMEOUT_SECS").ok(),
        )
    }

    pub fn from_vars(base_url: Option<String>, timeout_secs: Option<String>) -> Result<Self, ApiError> {
        let base = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&base)
            .map_err(|e| ApiError::Config(format!("CHART_API_BASE_URL '{}': {}", base, e)))?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "CHART_API_BASE_URL must be http(s), got '{}'",
                base_url.scheme()
            )));
        }

        let secs = match timeout_secs {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ApiError::Config(format!("CHART_API_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if secs == 0 {
            return Err(ApiError::Config("CHART_API_TIMEOUT_SECS must be positive".into()));
        }

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(secs),
            user_agent: format!("chart_analyzer/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn upload_url(&self) -> Result<Url, ApiError> {
        self.endpoint(UPLOAD_PATH)
    }

    pub fn analyze_url(&self) -> Result<Url, ApiError> {
        self.endpoint(ANALYZE_PATH)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let joined = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| ApiError::Config(format!("endpoint '{}': {}", joined, e)))
    }
}
