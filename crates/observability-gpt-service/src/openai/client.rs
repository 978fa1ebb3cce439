//! `OpenAI` API client implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use observability_gpt_payments::GatewayConfig;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, OpenAiErrorResponse};

/// Error type for language-model calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error.
    #[error("OpenAI API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Chat-completion provider.
#[async_trait]
pub trait ChatCompletions: Send + Sync {
    /// Run a chat completion through `gateway`.
    async fn chat_completion(
        &self,
        gateway: &GatewayConfig,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError>;
}

/// `OpenAI` API client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    /// Create a new `OpenAI` client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - `OpenAI` API key
    /// * `timeout` - Per-request timeout
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Configuration("API key must not be empty".into()));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl ChatCompletions for OpenAiClient {
    async fn chat_completion(
        &self,
        gateway: &GatewayConfig,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let url = format!(
            "{}/chat/completions",
            gateway.base_url.trim_end_matches('/')
        );

        let mut builder = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request);
        for (name, value) in &gateway.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<OpenAiErrorResponse, _> = response.json().await;
        let message = match error_body {
            Ok(body) => body.error.message,
            Err(_) => format!("HTTP {status}"),
        };

        Err(LlmError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
