//! Service configuration.

use observability_gpt_core::{AgentId, PlanId, DEFAULT_PLAN_TYPE};
use observability_gpt_payments::{Environment, PaymentsOptions};

/// Default listening port.
const DEFAULT_PORT: u16 = 3000;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("invalid {var}: {message}")]
    Invalid {
        /// Variable name.
        var: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A backend client could not be built.
    #[error("failed to create {client} client: {message}")]
    Client {
        /// Which client.
        client: &'static str,
        /// Underlying error.
        message: String,
    },
}

/// Chat-completion settings for the GPT operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    /// Model name.
    pub model: String,
    /// System prompt sent before the user prompt.
    pub system_prompt: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum output tokens.
    pub max_tokens: u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".into(),
            system_prompt:
                "You are a simulacrum of a mind that provides concise and creative responses."
                    .into(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

/// Billing identity and backend settings shared by the server and the
/// standalone agent.
#[derive(Debug, Clone)]
pub struct BillingConfig {
    /// The billed agent (`NVM_AGENT_DID`).
    pub agent_id: AgentId,

    /// Plan the credits belong to (`NVM_PLAN_DID`).
    pub plan_id: PlanId,

    /// Plan type label (`NVM_PLAN_TYPE`, default: `credit_based`).
    pub plan_type: String,

    /// Billing API key.
    pub nvm_api_key: String,

    /// Backend deployment (`NVM_ENVIRONMENT`, default: `sandbox`).
    pub environment: Environment,

    /// Protocol API override (`NVM_BACKEND_URL`).
    pub backend_url: Option<String>,

    /// Observability URL override (`NVM_OBSERVABILITY_URL`).
    pub observability_url: Option<String>,
}

impl BillingConfig {
    /// Options for building the payments client.
    #[must_use]
    pub fn payments_options(&self) -> PaymentsOptions {
        PaymentsOptions {
            environment: self.environment,
            backend_url: self.backend_url.clone(),
            observability_url: self.observability_url.clone(),
            ..PaymentsOptions::default()
        }
    }

    fn from_lookup<F>(lookup: &F, api_key_var: &'static str) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let agent_id = required(lookup, "NVM_AGENT_DID")?
            .parse::<AgentId>()
            .map_err(|e| ConfigError::Invalid {
                var: "NVM_AGENT_DID",
                message: e.to_string(),
            })?;

        let plan_id = match non_empty(lookup, "NVM_PLAN_DID") {
            Some(value) => value.parse::<PlanId>().map_err(|e| {
                ConfigError::Invalid {
                    var: "NVM_PLAN_DID",
                    message: e.to_string(),
                }
            })?,
            None => PlanId::placeholder(),
        };

        let environment = match non_empty(lookup, "NVM_ENVIRONMENT") {
            Some(value) => value.parse::<Environment>().map_err(|e| {
                ConfigError::Invalid {
                    var: "NVM_ENVIRONMENT",
                    message: e.to_string(),
                }
            })?,
            None => Environment::default(),
        };

        Ok(Self {
            agent_id,
            plan_id,
            plan_type: non_empty(lookup, "NVM_PLAN_TYPE")
                .unwrap_or_else(|| DEFAULT_PLAN_TYPE.into()),
            nvm_api_key: required(lookup, api_key_var)?,
            environment,
            backend_url: non_empty(lookup, "NVM_BACKEND_URL"),
            observability_url: non_empty(lookup, "NVM_OBSERVABILITY_URL"),
        })
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (`LISTEN_ADDR`, default: `0.0.0.0:$PORT`).
    pub listen_addr: String,

    /// Base URL the agent is registered under (`AGENT_HOST`, default:
    /// `http://localhost:$PORT`). Agent requests are scoped to
    /// `<agent_host><path>`.
    pub agent_host: String,

    /// Billing identity (API key from `BUILDER_NVM_API_KEY`).
    pub billing: BillingConfig,

    /// `OpenAI` API key (`OPENAI_API_KEY`, required).
    pub openai_api_key: String,

    /// Chat-completion settings.
    pub model: ModelSettings,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_key = required(&lookup, "OPENAI_API_KEY")?;

        let port = match non_empty(&lookup, "PORT") {
            Some(value) => value.parse::<u16>().map_err(|e| ConfigError::Invalid {
                var: "PORT",
                message: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            listen_addr: non_empty(&lookup, "LISTEN_ADDR")
                .unwrap_or_else(|| format!("0.0.0.0:{port}")),
            agent_host: non_empty(&lookup, "AGENT_HOST")
                .unwrap_or_else(|| format!("http://localhost:{port}"))
                .trim_end_matches('/')
                .to_string(),
            billing: BillingConfig::from_lookup(&lookup, "BUILDER_NVM_API_KEY")?,
            openai_api_key,
            model: ModelSettings::default(),
            cors_origins: non_empty(&lookup, "CORS_ORIGINS")
                .unwrap_or_else(|| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: non_empty(&lookup, "MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: non_empty(&lookup, "REQUEST_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(60),
        })
    }
}

/// Configuration of the standalone agent binary.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Billing identity (API key from `NVM_API_KEY`).
    pub billing: BillingConfig,

    /// `OpenAI` API key (`OPENAI_API_KEY`, required).
    pub openai_api_key: String,

    /// Chat-completion settings.
    pub model: ModelSettings,
}

impl AgentConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            openai_api_key: required(&lookup, "OPENAI_API_KEY")?,
            billing: BillingConfig::from_lookup(&lookup, "NVM_API_KEY")?,
            model: ModelSettings::default(),
        })
    }
}

fn non_empty<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).filter(|v| !v.trim().is_empty())
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, var).ok_or(ConfigError::Missing(var))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("OPENAI_API_KEY", "sk-test"),
        ("NVM_AGENT_DID", "did:nv:agent"),
        ("BUILDER_NVM_API_KEY", "builder-key"),
    ];

    #[test]
    fn defaults() {
        let config = ServiceConfig::from_lookup(vars(BASE)).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:3000");
        assert_eq!(config.agent_host, "http://localhost:3000");
        assert_eq!(config.billing.plan_id, PlanId::placeholder());
        assert_eq!(config.billing.plan_type, "credit_based");
        assert_eq!(config.billing.environment, Environment::Sandbox);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.model, ModelSettings::default());
    }

    #[test]
    fn port_drives_listen_addr_and_agent_host() {
        let mut pairs = BASE.to_vec();
        pairs.push(("PORT", "8080"));
        let config = ServiceConfig::from_lookup(vars(&pairs)).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.agent_host, "http://localhost:8080");
    }

    #[test]
    fn missing_openai_key_is_fatal() {
        let pairs: Vec<_> = BASE
            .iter()
            .copied()
            .filter(|(k, _)| *k != "OPENAI_API_KEY")
            .collect();
        let err = ServiceConfig::from_lookup(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("OPENAI_API_KEY")));
    }

    #[test]
    fn missing_builder_key_is_fatal() {
        let pairs: Vec<_> = BASE
            .iter()
            .copied()
            .filter(|(k, _)| *k != "BUILDER_NVM_API_KEY")
            .collect();
        let err = ServiceConfig::from_lookup(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("BUILDER_NVM_API_KEY")));
    }

    #[test]
    fn invalid_environment_is_rejected() {
        let mut pairs = BASE.to_vec();
        pairs.push(("NVM_ENVIRONMENT", "mainnet"));
        let err = ServiceConfig::from_lookup(vars(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "NVM_ENVIRONMENT", .. }));
    }

    #[test]
    fn agent_config_uses_nvm_api_key() {
        let config = AgentConfig::from_lookup(vars(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("NVM_AGENT_DID", "did:nv:agent"),
            ("NVM_API_KEY", "agent-key"),
        ]))
        .unwrap();
        assert_eq!(config.billing.nvm_api_key, "agent-key");
    }
}
