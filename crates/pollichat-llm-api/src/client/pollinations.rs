use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use pollichat_logging::{log_request, log_response};
use pollichat_models::{ChatRequest, ModelInfo};
use crate::client::{ByteStream, ChatBackend};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// Client for the Pollinations text API
#[derive(Debug, Clone)]
pub struct PollinationsClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl PollinationsClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    pub fn with_http_client(config: ClientConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Turn a non-success response into `ApiError::Http`, keeping the body for diagnostics
    async fn reject(&self, response: reqwest::Response) -> ApiError {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error body".to_string());

        log_response(&status, &headers, &body, self.config.verbose);

        ApiError::Http {
            status: status.as_u16(),
            body,
        }
    }
}

#[async_trait]
impl ChatBackend for PollinationsClient {
    async fn chat_streaming(&self, request: &ChatRequest) -> Result<ByteStream, ApiError> {
        let url = self.config.chat_completions_url();
        log_request(&url, request, self.config.verbose);
        log::debug!("POST {} (model: {}, {} messages)", url, request.model, request.messages.len());

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(ApiError::from))
            .boxed();

        Ok(stream)
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ApiError> {
        let url = self.config.models_url();
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(self.reject(response).await);
        }

        let response_text = response.text().await?;
        let models: Vec<ModelInfo> = serde_json::from_str(&response_text)?;
        log::debug!("Loaded {} models from catalog", models.len());

        Ok(models)
    }
}
