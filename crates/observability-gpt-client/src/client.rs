//! Agent HTTP client implementation.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

use observability_gpt_core::{
    AgentId, CombinedResult, GptResult, ImageResult, PlanId, SongResult, VideoResult,
};
use observability_gpt_payments::PaymentsApi;

use crate::error::ClientError;
use crate::types::{ApiErrorResponse, GenerationRequest, GenerationResponse};

/// Default service URL.
pub const DEFAULT_AGENT_URL: &str = "http://localhost:3000";

/// Client for the metered generation endpoints.
///
/// Obtain an access token with [`AgentClient::initialize`] (or supply one
/// with [`AgentClient::with_access_token`]) before making requests.
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl AgentClient {
    /// Create a new client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(ClientError::Configuration(
                "base URL must not be empty".into(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
        })
    }

    /// Use an existing access token.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Base URL of the service.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Obtain an access token for `agent_id` under `plan_id` with the
    /// subscriber's payments client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Payments`] if the billing backend refuses.
    pub async fn initialize(
        &mut self,
        payments: &dyn PaymentsApi,
        plan_id: &PlanId,
        agent_id: &AgentId,
    ) -> Result<&str, ClientError> {
        let creds = payments.get_agent_access_token(plan_id, agent_id).await?;
        tracing::info!(agent_id = %agent_id, "Access token obtained for agent operations");

        let token = self.access_token.insert(creds.access_token);
        Ok(token.as_str())
    }

    /// `POST /gpt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn call_gpt(&self, prompt: &str, credit_amount: u64) -> Result<GptResult, ClientError> {
        self.make_request("/gpt", prompt, credit_amount).await
    }

    /// `POST /song`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn generate_song(
        &self,
        prompt: &str,
        credit_amount: u64,
    ) -> Result<SongResult, ClientError> {
        self.make_request("/song", prompt, credit_amount).await
    }

    /// `POST /image`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn generate_image(
        &self,
        prompt: &str,
        credit_amount: u64,
    ) -> Result<ImageResult, ClientError> {
        self.make_request("/image", prompt, credit_amount).await
    }

    /// `POST /video`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn generate_video(
        &self,
        prompt: &str,
        credit_amount: u64,
    ) -> Result<VideoResult, ClientError> {
        self.make_request("/video", prompt, credit_amount).await
    }

    /// `POST /combined`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn generate_combined(
        &self,
        prompt: &str,
        credit_amount: u64,
    ) -> Result<CombinedResult, ClientError> {
        self.make_request("/combined", prompt, credit_amount).await
    }

    /// POST a generation request and unwrap its `result`.
    async fn make_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        prompt: &str,
        credit_amount: u64,
    ) -> Result<T, ClientError> {
        let access_token = self
            .access_token
            .as_deref()
            .ok_or(ClientError::NotInitialized)?;
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .bearer_auth(access_token)
            .json(&GenerationRequest {
                prompt,
                credit_amount,
            })
            .send()
            .await?;

        let envelope: GenerationResponse<T> = Self::handle_response(response).await?;
        Ok(envelope.result)
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<ApiErrorResponse, _> = response.json().await;
        Err(match error_body {
            Ok(api_error) => ClientError::Api {
                code: api_error.error.code,
                message: api_error.error.message,
                status: status.as_u16(),
            },
            Err(_) => ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            },
        })
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 120).
    ///
    /// A combined request runs four operations back to back.
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 120,
        }
    }
}
