use crate::api::models::GenerateRequest;
use crate::api::response::extract_reply;
use crate::api::service::CompletionService;
use crate::error::{RelayError, Result};
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, endpoint: &str, model: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| RelayError::ConfigError(format!("Invalid API key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// Send the prompt and return the raw JSON body.
    pub async fn generate_raw(&self, prompt: &str) -> Result<Value> {
        let request_body = GenerateRequest::from_prompt(prompt);
        let response = self
            .http
            .post(self.generate_url())
            .json(&request_body)
            .send()
            .await?;

        debug!(status = %response.status(), model = %self.model, "completion response");

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RelayError::ApiError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await?;
        Ok(serde_json::from_str(&response_text)?)
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<String> {
        let response_json = self.generate_raw(prompt).await?;
        extract_reply(&response_json)
    }
}

impl CompletionService for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        self.generate_content(prompt).boxed()
    }
}
