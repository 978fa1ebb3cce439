//! Billing backend API types.

use observability_gpt_core::{AgentRequestId, TokenUsage};
use serde::{Deserialize, Serialize};

/// Access token issued to a subscriber for calling an agent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAccessToken {
    /// Bearer token to present to the agent.
    pub access_token: String,
    /// Proxy endpoints the token is valid for.
    #[serde(default)]
    pub proxies: Vec<String>,
}

/// Request body for starting an agent request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAgentRequestBody {
    /// Subscriber access token (without the `Bearer ` prefix).
    pub access_token: String,
    /// Endpoint URL being called.
    pub endpoint: String,
    /// HTTP method being called.
    pub http_verb: String,
}

/// Handle for one billable unit of work.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    /// Request id to redeem credits against.
    pub agent_request_id: AgentRequestId,
    /// Agent name.
    #[serde(default)]
    pub agent_name: Option<String>,
    /// Agent id.
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Whether the endpoint matched the agent registration.
    #[serde(default)]
    pub url_matching: Option<bool>,
    /// Whether the HTTP method matched the agent registration.
    #[serde(default)]
    pub verb_matching: Option<bool>,
    /// Subscriber balance at request start.
    #[serde(default)]
    pub balance: Option<serde_json::Value>,
}

/// Request body for redeeming credits.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedeemCreditsBody {
    /// Agent request to redeem against.
    pub agent_request_id: String,
    /// The subscriber access token the request was started with.
    pub request_access_token: String,
    /// Credits to redeem, as a decimal string.
    pub amount: String,
}

/// Result of a credit redemption.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionResult {
    /// Whether the backend accepted the redemption.
    #[serde(default)]
    pub success: Option<bool>,
    /// On-chain transaction hash.
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// Error body returned by the billing backend.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsErrorResponse {
    /// Error message.
    #[serde(alias = "error")]
    pub message: String,
}

/// Model call being logged.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderRequest {
    /// Model name, e.g. `fal-ai/flux-schnell/text-to-image`.
    pub model: String,
    /// Provider-specific request input.
    pub input: serde_json::Value,
}

/// Response side of a logged model call.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderResponse {
    /// Response id (`<prefix>-<uuid>`).
    pub id: String,
    /// Model name.
    pub model: String,
    /// Extracted operation output.
    pub output: serde_json::Value,
    /// Usage figure for billing.
    pub usage: TokenUsage,
}

/// Start and end of the logged call, in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    /// Call start.
    pub start_time_ms: i64,
    /// Call end.
    pub end_time_ms: i64,
}

/// One custom observability log entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLog {
    /// Logical agent that performed the call (e.g. `SunoClient`).
    pub agent_name: String,
    /// Request side.
    pub provider_request: ProviderRequest,
    /// Response side.
    pub provider_response: ProviderResponse,
    /// Call timing.
    pub timing: Timing,
    /// Custom properties of the operation.
    pub properties: observability_gpt_core::CustomProperties,
}
