use std::time::Duration;

use async_trait::async_trait;
use common::models::SelectedFile;
use reqwest::{
    Client, Response,
    multipart::{Form, Part},
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use url::Url;

use crate::{
    config::ApiConfig,
    error::ApiError,
    remote::{AnalyzeRequest, AnalyzeResponse, UPLOAD_FIELD, UploadResponse},
    traits::ChartApi,
};

#[derive(Clone)]
pub struct ChartApiClient {
    client: Client,
    upload_url: Url,
    analyze_url: Url,
    timeout: Duration,
}

impl ChartApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            upload_url: config.upload_url()?,
            analyze_url: config.analyze_url()?,
            timeout: config.request_timeout,
        })
    }

    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Http(err)
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        let url = resp.url().clone();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!("{} failed with {}: {}", url, status, body);
            return Err(ApiError::Status { status, body });
        }

        let bytes = resp.bytes().await.map_err(|e| self.classify(e))?;
        debug!("{} answered {} bytes", url, bytes.len());

        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Malformed response from {}: {}", url, e);
            ApiError::Decode(e)
        })
    }
}

#[async_trait]
impl ChartApi for ChartApiClient {
    async fn upload(&self, file: &SelectedFile) -> Result<UploadResponse, ApiError> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if let Some(mime) = &file.mime {
            part = part.mime_str(mime)?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        info!("Uploading {} ({} bytes) to {}", file.name, file.len(), self.upload_url);

        let resp = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.read_json(resp).await
    }

    async fn analyze(&self, filename: &str) -> Result<AnalyzeResponse, ApiError> {
        info!("Requesting analysis of {} from {}", filename, self.analyze_url);

        let resp = self
            .client
            .post(self.analyze_url.clone())
            .json(&AnalyzeRequest { filename })
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        self.read_json(resp).await
    }
}
