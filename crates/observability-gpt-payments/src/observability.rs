//! Observability logging for model and operation calls.
//!
//! Two paths exist:
//! - Chat completions are routed through the observability gateway, which
//!   records them itself. [`ObservabilityApi::openai_gateway`] supplies the
//!   gateway URL and the headers carrying the custom properties.
//! - Operations with no real provider (simulated media generation) are
//!   recorded explicitly with [`with_logging`], which posts an
//!   [`OperationLog`] after the operation completes.

use std::future::Future;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use observability_gpt_core::{CustomProperties, TokenUsage};

use crate::client::PaymentsClient;
use crate::error::PaymentsError;
use crate::types::{OperationLog, ProviderRequest, ProviderResponse, Timing};

/// Header authenticating gateway calls against the observability backend.
pub const GATEWAY_AUTH_HEADER: &str = "Helicone-Auth";

/// Where to send chat completions so the gateway records them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// OpenAI-compatible base URL.
    pub base_url: String,
    /// Extra headers to send with every call.
    pub headers: Vec<(String, String)>,
}

/// Observability backend operations.
#[async_trait]
pub trait ObservabilityApi: Send + Sync {
    /// Record one operation log entry.
    async fn log_operation(&self, entry: &OperationLog) -> Result<(), PaymentsError>;

    /// Gateway routing for chat completions tagged with `properties`.
    fn openai_gateway(&self, properties: &CustomProperties) -> GatewayConfig;
}

#[async_trait]
impl ObservabilityApi for PaymentsClient {
    async fn log_operation(&self, entry: &OperationLog) -> Result<(), PaymentsError> {
        let url = format!("{}/custom/v1/log", self.observability_url);

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(entry);
        for (name, value) in entry.properties.to_headers() {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        tracing::debug!(
            agent_name = %entry.agent_name,
            response_id = %entry.provider_response.id,
            "Operation logged"
        );
        Ok(())
    }

    fn openai_gateway(&self, properties: &CustomProperties) -> GatewayConfig {
        let mut headers = vec![(
            GATEWAY_AUTH_HEADER.to_string(),
            format!("Bearer {}", self.api_key),
        )];
        headers.extend(properties.to_headers());

        GatewayConfig {
            base_url: format!("{}/jawn/v1/gateway/oai/v1", self.observability_url),
            headers,
        }
    }
}

/// Description of a logged call.
#[derive(Debug, Clone)]
pub struct LoggedCall<'a> {
    /// Logical agent name (e.g. `ImageGeneratorAgent`).
    pub agent_name: &'a str,
    /// Model name.
    pub model: String,
    /// Provider-specific input.
    pub input: serde_json::Value,
    /// Prefix of the generated response id (e.g. `img`).
    pub response_id_prefix: &'a str,
}

/// Run `operation` and record it with the observability backend.
///
/// `usage` derives the billing figure from the raw output and `extract`
/// turns the raw output into the value returned to the caller. A failing
/// operation is returned as-is and not logged. A failure to deliver the log
/// entry is reported with `tracing::warn!` and does not affect the result.
pub async fn with_logging<R, T, E, F, Fut>(
    api: &dyn ObservabilityApi,
    call: LoggedCall<'_>,
    properties: &CustomProperties,
    operation: F,
    extract: impl FnOnce(R) -> T,
    usage: impl FnOnce(&R) -> TokenUsage,
) -> Result<T, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, E>>,
    T: Serialize,
{
    let started = Utc::now();
    let raw = operation().await?;
    let finished = Utc::now();

    let usage = usage(&raw);
    let output = extract(raw);

    let entry = OperationLog {
        agent_name: call.agent_name.to_string(),
        provider_request: ProviderRequest {
            model: call.model.clone(),
            input: call.input,
        },
        provider_response: ProviderResponse {
            id: format!("{}-{}", call.response_id_prefix, uuid::Uuid::new_v4()),
            model: call.model,
            output: serde_json::to_value(&output).unwrap_or_default(),
            usage,
        },
        timing: Timing {
            start_time_ms: started.timestamp_millis(),
            end_time_ms: finished.timestamp_millis(),
        },
        properties: properties.clone(),
    };

    if let Err(e) = api.log_operation(&entry).await {
        tracing::warn!(
            error = %e,
            agent_name = %entry.agent_name,
            "Failed to record operation log"
        );
    }

    Ok(output)
}
