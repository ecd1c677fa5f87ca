use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::ProviderError;
use crate::providers::{DetectRequest, DetectedLanguage, Provider, TranslateRequest, TranslateResponse};

/// Characters of an error body kept in log lines and error messages
const ERROR_BODY_PREVIEW_CHARS: usize = 300;

/// LibreTranslate client for interacting with a LibreTranslate-compatible API
#[derive(Debug, Clone)]
pub struct LibreTranslate {
    /// HTTP client for API requests
    client: Client,
    /// Base URL without trailing slash
    endpoint: String,
    /// Timeout applied to detect calls
    detect_timeout: Duration,
}

impl LibreTranslate {
    /// Create a new client with explicit timeouts
    ///
    /// The client keeps idle connections alive so that parallel chunk
    /// requests reuse them.
    pub fn new(endpoint: impl Into<String>, timeout: Duration, detect_timeout: Duration) -> Result<Self, ProviderError> {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(16)
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .map_err(|e| ProviderError::ConnectionError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            detect_timeout,
        })
    }

    /// Create a client from the translation configuration
    pub fn from_config(config: &TranslationConfig) -> Result<Self, ProviderError> {
        Self::new(&config.endpoint, config.timeout(), config.detect_timeout())
    }

    /// Base URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path)
    }

    /// Turn a response into `T`, mapping non-2xx statuses to `ApiError`
    async fn read_json<T: DeserializeOwned>(response: Response, operation: &str) -> Result<T, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            error!("LibreTranslate {} error ({}): {}", operation, status, preview);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: preview,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            let preview: String = body.chars().take(ERROR_BODY_PREVIEW_CHARS).collect();
            ProviderError::ParseError(format!("{} response: {} (body: {})", operation, e, preview))
        })
    }
}

#[async_trait]
impl Provider for LibreTranslate {
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, ProviderError> {
        debug!(
            "POST {} ({} chars, {} -> {})",
            self.url("translate"),
            request.q.chars().count(),
            request.source,
            request.target
        );

        let response = self
            .client
            .post(self.url("translate"))
            .json(&request)
            .send()
            .await?;

        Self::read_json::<TranslateResponse>(response, "translate").await
    }

    async fn detect(&self, request: DetectRequest) -> Result<Vec<DetectedLanguage>, ProviderError> {
        let response = self
            .client
            .post(self.url("detect"))
            .timeout(self.detect_timeout)
            .json(&request)
            .send()
            .await?;

        Self::read_json::<Vec<DetectedLanguage>>(response, "detect").await
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let response = self.client.get(self.url("languages")).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: format!("Connection test against {} failed", self.endpoint),
            })
        }
    }
}
