// Upstream client implementation
// Thin wrapper over the public Gemini generateContent endpoint.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tokio::time::Duration;

use super::error::UpstreamError;
use crate::models::GeminiConfig;
use crate::proxy::mappers::gemini::{GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Anything that can answer a generateContent request.
///
/// The chat handler only talks to this trait so tests can swap the network
/// client for an in-memory fake.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError>;

    fn model(&self) -> &str;
}

pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, api_key: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(Duration::from_secs(config.request_timeout))
            .user_agent(crate::constants::USER_AGENT.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn build_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl ChatBackend for GeminiClient {
    async fn generate(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        let url = self.build_url();
        let api_key = header::HeaderValue::from_str(&self.api_key)
            .map_err(|e| UpstreamError::Communication(format!("invalid API key header: {}", e)))?;

        tracing::debug!(
            "[Gemini] POST {} ({} contents)",
            url,
            request.contents.len()
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(UpstreamError::Communication(describe_error_status(
                status, &body,
            )));
        }

        serde_json::from_slice::<GenerateContentResponse>(&body)
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Prefer the API's own error message over the raw body when it has one.
fn describe_error_status(status: StatusCode, body: &[u8]) -> String {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| {
            String::from_utf8_lossy(body)
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect()
        });

    format!("HTTP {}: {}", status, message)
}
