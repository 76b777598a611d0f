// OpenAI Images API client

use super::models::{ImageGenerationRequest, ImagesResponse};
use crate::config::{OpenAiConfig, PerformanceConfig};
use crate::error::{ApiError, Result};
use crate::generation::backend::ImageBackend;
use crate::generation::models::{GeneratedBatch, GenerationOptions};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Client for the OpenAI Images API.
///
/// Handles authentication and request submission for image generation.
/// Retry, caching and rate limiting live in the generation service; this
/// client performs exactly one HTTP call per invocation.
pub struct OpenAiClient {
    http_client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client with a pooled HTTP connection.
    pub fn new(config: &OpenAiConfig, performance: &PerformanceConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(performance.connection_pool_size)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Some(Duration::from_secs(60)))
            .use_rustls_tls()
            .build()
            .map_err(|e| ApiError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        debug!("Created HTTP client with connection pooling and keep-alive");

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Get the API base_url
    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    /// Extract error message from API response JSON
    fn extract_error_message(response_text: &str) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorResponse {
            error: Option<ErrorDetail>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorDetail {
            message: Option<String>,
            code: Option<String>,
        }

        if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(response_text) {
            if let Some(error) = error_resp.error {
                return error.message.or(error.code);
            }
        }
        None
    }

    /// Check connectivity to the OpenAI API.
    ///
    /// Sends a lightweight `GET /models` request to verify the API is
    /// reachable and the credential is accepted.
    pub async fn check_connectivity(&self) -> Result<Duration> {
        let url = format!("{}/models", self.config.api_base_url);

        debug!("Checking connectivity via {}", url);

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(self.config.api_key.expose())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("Connectivity check failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(ApiError::Upstream(format!(
                "API check failed: HTTP {}: {}",
                status, message
            )));
        }

        let latency = start.elapsed();
        debug!("API connectivity check passed in {:?}", latency);

        Ok(latency)
    }
}

#[async_trait]
impl ImageBackend for OpenAiClient {
    fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<GeneratedBatch> {
        let url = format!("{}/images/generations", self.config.api_base_url);
        debug!(model = %options.model, "Calling image generation API");

        // quality/style are dall-e-3 parameters; older models reject them
        let dall_e_3 = options.model == "dall-e-3";
        let request = ImageGenerationRequest {
            model: options.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: options.size.clone(),
            quality: dall_e_3.then(|| options.quality.clone()),
            style: dall_e_3.then(|| options.style.clone()),
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("HTTP error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(
                "Image API error: HTTP {} - Response body: {}",
                status, error_text
            );
            let message = Self::extract_error_message(&error_text).unwrap_or(error_text);
            return Err(ApiError::Upstream(format!("HTTP {}: {}", status, message)));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| ApiError::Upstream(format!("Failed to read response body: {}", e)))?;

        let images_response: ImagesResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!("Failed to parse image API response: {}", e);
            ApiError::Upstream(format!("Response parsing error: {}", e))
        })?;

        debug!(
            images = images_response.data.len(),
            "Received image API response"
        );
        Ok(images_response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_error_message() {
        let body = r#"{"error": {"message": "Billing hard limit reached", "type": "invalid_request_error"}}"#;
        assert_eq!(
            OpenAiClient::extract_error_message(body).as_deref(),
            Some("Billing hard limit reached")
        );
    }

    #[test]
    fn test_extract_error_message_falls_back_to_code() {
        let body = r#"{"error": {"code": "content_policy_violation"}}"#;
        assert_eq!(
            OpenAiClient::extract_error_message(body).as_deref(),
            Some("content_policy_violation")
        );
    }

    #[test]
    fn test_extract_error_message_on_garbage() {
        assert!(OpenAiClient::extract_error_message("not json").is_none());
        assert!(OpenAiClient::extract_error_message("{}").is_none());
    }
}
