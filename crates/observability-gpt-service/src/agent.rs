//! Standalone GPT agent.
//!
//! Calls the language model through the observability gateway for a fixed
//! set of prompts, without the HTTP server. Calls are tagged with the agent's
//! properties but no agent request is started and no credits are redeemed.

use std::sync::Arc;
use std::time::Duration;

use observability_gpt_core::{CreditAmount, CustomProperties, OperationProperties, SessionId};
use observability_gpt_payments::{ObservabilityApi, PaymentsClient};

use crate::config::{AgentConfig, ConfigError, ModelSettings};
use crate::openai::{ChatCompletions, LlmError, OpenAiClient};
use crate::operations::gpt;
use crate::operations::OperationKind;

/// Credit cost recorded in the agent's properties.
pub const AGENT_CREDIT_COST: u64 = 10;

/// Request timeout for the agent's model calls.
const AGENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Prompts run by [`StandaloneAgent::run_test_prompts`].
pub const TEST_PROMPTS: &[&str] = &[
    "Write a haiku about artificial intelligence",
    "Explain quantum computing in one sentence",
    "What's the meaning of life in 10 words or less?",
];

/// A GPT agent with one session for its whole lifetime.
pub struct StandaloneAgent {
    llm: Arc<dyn ChatCompletions>,
    observability: Arc<dyn ObservabilityApi>,
    model: ModelSettings,
    session_id: SessionId,
    properties: CustomProperties,
}

impl StandaloneAgent {
    /// Create an agent with HTTP clients for every backend.
    pub fn new(config: AgentConfig) -> Result<Self, ConfigError> {
        let observability = PaymentsClient::new(
            config.billing.nvm_api_key.clone(),
            config.billing.payments_options(),
        )
        .map_err(|e| ConfigError::Client {
            client: "payments",
            message: e.to_string(),
        })?;

        let llm = OpenAiClient::new(config.openai_api_key.clone(), AGENT_TIMEOUT).map_err(|e| {
            ConfigError::Client {
                client: "OpenAI",
                message: e.to_string(),
            }
        })?;

        Self::with_backends(&config, Arc::new(llm), Arc::new(observability))
    }

    /// Create an agent from explicit backends.
    pub fn with_backends(
        config: &AgentConfig,
        llm: Arc<dyn ChatCompletions>,
        observability: Arc<dyn ObservabilityApi>,
    ) -> Result<Self, ConfigError> {
        let credit_amount =
            CreditAmount::new(AGENT_CREDIT_COST).map_err(|e| ConfigError::Invalid {
                var: "credit_amount",
                message: e.to_string(),
            })?;

        let session_id = SessionId::generate();
        let properties = OperationProperties {
            agent_id: &config.billing.agent_id,
            plan_id: &config.billing.plan_id,
            plan_type: &config.billing.plan_type,
            credit_amount,
            operation: OperationKind::Gpt.label(),
            batch_id: None,
        }
        .build_with_session(&session_id);

        tracing::info!(
            agent_id = %config.billing.agent_id,
            session_id = %session_id,
            "Standalone agent created"
        );

        Ok(Self {
            llm,
            observability,
            model: config.model.clone(),
            session_id,
            properties,
        })
    }

    /// The agent's session id.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The properties attached to every call.
    #[must_use]
    pub fn properties(&self) -> &CustomProperties {
        &self.properties
    }

    /// Answer `prompt` with the language model.
    pub async fn call_gpt(&self, prompt: &str) -> Result<String, LlmError> {
        tracing::info!(prompt = %prompt, "Calling GPT");

        let gateway = self.observability.openai_gateway(&self.properties);
        let response = gpt::complete(self.llm.as_ref(), &self.model, &gateway, prompt)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Error calling OpenAI API");
                e
            })?;

        tracing::info!(response = %response, "GPT response");
        Ok(response)
    }

    /// Run every prompt in [`TEST_PROMPTS`].
    ///
    /// A failing prompt is logged and does not stop the run. Returns the
    /// number of prompts that succeeded.
    pub async fn run_test_prompts(&self) -> usize {
        tracing::info!("Running test prompts");

        let mut succeeded = 0;
        for prompt in TEST_PROMPTS {
            match self.call_gpt(prompt).await {
                Ok(_) => succeeded += 1,
                Err(e) => tracing::error!(error = %e, prompt = %prompt, "Failed to process prompt"),
            }
        }
        succeeded
    }
}
