//! Billing backend HTTP client implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use observability_gpt_core::{AgentId, AgentRequestId, CreditAmount, PlanId};

use crate::environment::Environment;
use crate::error::PaymentsError;
use crate::types::{
    AgentAccessToken, AgentRequest, PaymentsErrorResponse, RedeemCreditsBody, RedemptionResult,
    StartAgentRequestBody,
};

/// Billing operations used by agents and their subscribers.
///
/// Implemented over HTTP by [`PaymentsClient`]; tests substitute in-process
/// fakes.
#[async_trait]
pub trait PaymentsApi: Send + Sync {
    /// Obtain an access token for calling `agent_id` under `plan_id`.
    async fn get_agent_access_token(
        &self,
        plan_id: &PlanId,
        agent_id: &AgentId,
    ) -> Result<AgentAccessToken, PaymentsError>;

    /// Start a billable agent request for a call to `url` with `method`.
    ///
    /// `auth_header` is the caller's `Authorization` header value.
    async fn start_processing_request(
        &self,
        agent_id: &AgentId,
        auth_header: &str,
        url: &str,
        method: &str,
    ) -> Result<AgentRequest, PaymentsError>;

    /// Redeem `credits` against a previously started agent request.
    async fn redeem_credits_from_request(
        &self,
        agent_request_id: &AgentRequestId,
        access_token: &str,
        credits: CreditAmount,
    ) -> Result<RedemptionResult, PaymentsError>;
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct PaymentsOptions {
    /// Backend deployment.
    pub environment: Environment,
    /// Override for the protocol API URL.
    pub backend_url: Option<String>,
    /// Override for the observability URL.
    pub observability_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for PaymentsOptions {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            backend_url: None,
            observability_url: None,
            timeout_seconds: 30,
        }
    }
}

impl PaymentsOptions {
    /// Options for a named environment.
    #[must_use]
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            ..Self::default()
        }
    }
}

/// Billing backend API client.
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    pub(crate) client: Client,
    pub(crate) backend_url: String,
    pub(crate) observability_url: String,
    pub(crate) api_key: String,
}

impl PaymentsClient {
    /// Create a new payments client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Billing API key of the builder or subscriber
    /// * `options` - Environment and URL overrides
    pub fn new(api_key: impl Into<String>, options: PaymentsOptions) -> Result<Self, PaymentsError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(PaymentsError::Configuration("API key must not be empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()?;

        let backend_url = options
            .backend_url
            .unwrap_or_else(|| options.environment.backend_url().to_string());
        let observability_url = options
            .observability_url
            .unwrap_or_else(|| options.environment.observability_url().to_string());

        Ok(Self {
            client,
            backend_url: backend_url.trim_end_matches('/').to_string(),
            observability_url: observability_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Handle API response and convert errors.
    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PaymentsError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        Err(Self::api_error(status, response).await)
    }

    /// Build an API error from a non-success response.
    pub(crate) async fn api_error(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> PaymentsError {
        let error_body: Result<PaymentsErrorResponse, _> = response.json().await;

        let message = match error_body {
            Ok(body) => body.message,
            Err(_) => format!("HTTP {status}"),
        };

        PaymentsError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl PaymentsApi for PaymentsClient {
    async fn get_agent_access_token(
        &self,
        plan_id: &PlanId,
        agent_id: &AgentId,
    ) -> Result<AgentAccessToken, PaymentsError> {
        let url = format!(
            "{}/api/v1/protocol/token/{}/{}",
            self.backend_url, plan_id, agent_id
        );

        tracing::debug!(plan_id = %plan_id, agent_id = %agent_id, "Requesting agent access token");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::handle_response(response).await
    }

    async fn start_processing_request(
        &self,
        agent_id: &AgentId,
        auth_header: &str,
        url: &str,
        method: &str,
    ) -> Result<AgentRequest, PaymentsError> {
        let endpoint = format!(
            "{}/api/v1/protocol/agents/initialize/{}",
            self.backend_url, agent_id
        );
        let access_token = auth_header
            .strip_prefix("Bearer ")
            .unwrap_or(auth_header)
            .to_string();
        let body = StartAgentRequestBody {
            access_token,
            endpoint: url.to_string(),
            http_verb: method.to_string(),
        };

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let request: AgentRequest = Self::handle_response(response).await?;

        tracing::debug!(
            agent_id = %agent_id,
            agent_request_id = %request.agent_request_id,
            endpoint = %url,
            "Agent request started"
        );

        Ok(request)
    }

    async fn redeem_credits_from_request(
        &self,
        agent_request_id: &AgentRequestId,
        access_token: &str,
        credits: CreditAmount,
    ) -> Result<RedemptionResult, PaymentsError> {
        let url = format!("{}/api/v1/protocol/agents/redeem", self.backend_url);
        let body = RedeemCreditsBody {
            agent_request_id: agent_request_id.to_string(),
            request_access_token: access_token.to_string(),
            amount: credits.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_uses_environment_urls() {
        let client = PaymentsClient::new(
            "nvm-key",
            PaymentsOptions::for_environment(Environment::Live),
        )
        .unwrap();
        assert_eq!(client.backend_url, Environment::Live.backend_url());
        assert_eq!(client.observability_url, Environment::Live.observability_url());
    }

    #[test]
    fn client_trims_trailing_slash() {
        let options = PaymentsOptions {
            backend_url: Some("http://localhost:3001/".into()),
            observability_url: Some("http://localhost:8585/".into()),
            ..PaymentsOptions::default()
        };
        let client = PaymentsClient::new("nvm-key", options).unwrap();
        assert_eq!(client.backend_url, "http://localhost:3001");
        assert_eq!(client.observability_url, "http://localhost:8585");
    }

    #[test]
    fn client_rejects_empty_key() {
        assert!(matches!(
            PaymentsClient::new(" ", PaymentsOptions::default()),
            Err(PaymentsError::Configuration(_))
        ));
    }
}
