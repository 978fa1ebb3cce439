//! Application state.

use std::sync::Arc;
use std::time::Duration;

use observability_gpt_payments::{ObservabilityApi, PaymentsApi, PaymentsClient};

use crate::config::{ConfigError, ServiceConfig};
use crate::openai::{ChatCompletions, OpenAiClient};

/// Application state shared across handlers.
///
/// Holds only handles to stateless backend clients; requests share no
/// mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Billing backend (agent requests and credit redemption).
    pub payments: Arc<dyn PaymentsApi>,

    /// Observability backend (operation logs and model gateway).
    pub observability: Arc<dyn ObservabilityApi>,

    /// Language model.
    pub llm: Arc<dyn ChatCompletions>,
}

impl AppState {
    /// Create the application state with HTTP clients for every backend.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        let payments = PaymentsClient::new(
            config.billing.nvm_api_key.clone(),
            config.billing.payments_options(),
        )
        .map_err(|e| ConfigError::Client {
            client: "payments",
            message: e.to_string(),
        })?;
        tracing::info!(
            environment = %config.billing.environment,
            "Payments integration enabled"
        );

        let llm = OpenAiClient::new(
            config.openai_api_key.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )
        .map_err(|e| ConfigError::Client {
            client: "OpenAI",
            message: e.to_string(),
        })?;

        let payments = Arc::new(payments);

        Ok(Self::with_backends(
            config,
            payments.clone(),
            payments,
            Arc::new(llm),
        ))
    }

    /// Create the application state from explicit backends.
    #[must_use]
    pub fn with_backends(
        config: ServiceConfig,
        payments: Arc<dyn PaymentsApi>,
        observability: Arc<dyn ObservabilityApi>,
        llm: Arc<dyn ChatCompletions>,
    ) -> Self {
        Self {
            config,
            payments,
            observability,
            llm,
        }
    }
}
