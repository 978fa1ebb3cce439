//! Common test utilities for service integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};

use observability_gpt_core::{
    AgentId, AgentRequestId, CreditAmount, CustomProperties, PlanId, DEFAULT_PLAN_TYPE,
};
use observability_gpt_payments::{
    AgentAccessToken, AgentRequest, Environment, GatewayConfig, ObservabilityApi, OperationLog,
    PaymentsApi, PaymentsError, RedemptionResult,
};
use observability_gpt_service::config::BillingConfig;
use observability_gpt_service::openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatCompletions, LlmError,
};
use observability_gpt_service::{create_router, AppState, ModelSettings, ServiceConfig};

pub const TEST_TOKEN: &str = "subscriber-token";
pub const GPT_REPLY: &str = "Silicon dreams awake";

/// A recorded `start_processing_request` call.
#[derive(Debug, Clone)]
pub struct StartCall {
    pub auth_header: String,
    pub endpoint: String,
    pub method: String,
}

/// A recorded `redeem_credits_from_request` call.
#[derive(Debug, Clone)]
pub struct RedeemCall {
    pub agent_request_id: String,
    pub access_token: String,
    pub credits: u64,
}

/// In-memory billing backend.
#[derive(Default)]
pub struct FakePayments {
    pub starts: Mutex<Vec<StartCall>>,
    pub redeems: Mutex<Vec<RedeemCall>>,
    pub fail_start: AtomicBool,
    pub fail_redeem: AtomicBool,
    /// Answer redemptions with `success: false`.
    pub reject_redeem: AtomicBool,
}

#[async_trait]
impl PaymentsApi for FakePayments {
    async fn get_agent_access_token(
        &self,
        _plan_id: &PlanId,
        _agent_id: &AgentId,
    ) -> Result<AgentAccessToken, PaymentsError> {
        Ok(AgentAccessToken {
            access_token: TEST_TOKEN.into(),
            proxies: Vec::new(),
        })
    }

    async fn start_processing_request(
        &self,
        _agent_id: &AgentId,
        auth_header: &str,
        url: &str,
        method: &str,
    ) -> Result<AgentRequest, PaymentsError> {
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(PaymentsError::Api {
                status: 402,
                message: "insufficient balance".into(),
            });
        }

        let mut starts = self.starts.lock().unwrap();
        starts.push(StartCall {
            auth_header: auth_header.into(),
            endpoint: url.into(),
            method: method.into(),
        });

        Ok(AgentRequest {
            agent_request_id: format!("req-{}", starts.len()).parse().unwrap(),
            agent_name: Some("Observability GPT".into()),
            agent_id: None,
            url_matching: Some(true),
            verb_matching: Some(true),
            balance: None,
        })
    }

    async fn redeem_credits_from_request(
        &self,
        agent_request_id: &AgentRequestId,
        access_token: &str,
        credits: CreditAmount,
    ) -> Result<RedemptionResult, PaymentsError> {
        if self.fail_redeem.load(Ordering::SeqCst) {
            return Err(PaymentsError::Api {
                status: 500,
                message: "redeem failed".into(),
            });
        }

        self.redeems.lock().unwrap().push(RedeemCall {
            agent_request_id: agent_request_id.to_string(),
            access_token: access_token.into(),
            credits: credits.get(),
        });

        if self.reject_redeem.load(Ordering::SeqCst) {
            return Ok(RedemptionResult {
                success: Some(false),
                tx_hash: None,
            });
        }

        Ok(RedemptionResult {
            success: Some(true),
            tx_hash: Some("0xfeed".into()),
        })
    }
}

/// In-memory observability backend.
#[derive(Default)]
pub struct FakeObservability {
    /// Logged operation entries, serialized.
    pub logs: Mutex<Vec<Value>>,
    /// Properties handed to the model gateway.
    pub gateway_properties: Mutex<Vec<CustomProperties>>,
    pub fail_log: AtomicBool,
}

impl FakeObservability {
    /// Properties of every recorded call, gateway calls first.
    pub fn all_properties(&self) -> Vec<Value> {
        let mut all: Vec<Value> = self
            .gateway_properties
            .lock()
            .unwrap()
            .iter()
            .map(|p| serde_json::to_value(p).unwrap())
            .collect();
        all.extend(
            self.logs
                .lock()
                .unwrap()
                .iter()
                .map(|entry| entry["properties"].clone()),
        );
        all
    }
}

#[async_trait]
impl ObservabilityApi for FakeObservability {
    async fn log_operation(&self, entry: &OperationLog) -> Result<(), PaymentsError> {
        if self.fail_log.load(Ordering::SeqCst) {
            return Err(PaymentsError::Api {
                status: 503,
                message: "unavailable".into(),
            });
        }
        self.logs
            .lock()
            .unwrap()
            .push(serde_json::to_value(entry).unwrap());
        Ok(())
    }

    fn openai_gateway(&self, properties: &CustomProperties) -> GatewayConfig {
        self.gateway_properties
            .lock()
            .unwrap()
            .push(properties.clone());
        GatewayConfig {
            base_url: "http://gateway.test".into(),
            headers: properties.to_headers(),
        }
    }
}

/// Canned language model.
#[derive(Default)]
pub struct FakeLlm {
    pub requests: Mutex<Vec<ChatCompletionRequest>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl ChatCompletions for FakeLlm {
    async fn chat_completion(
        &self,
        _gateway: &GatewayConfig,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LlmError::Api {
                status: 429,
                message: "rate limited".into(),
            });
        }
        self.requests.lock().unwrap().push(request.clone());

        Ok(serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": GPT_REPLY}}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 4, "total_tokens": 24}
        }))
        .unwrap())
    }
}

pub fn test_config() -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        agent_host: "http://agent.test".into(),
        billing: BillingConfig {
            agent_id: "did:nv:agent".parse().unwrap(),
            plan_id: PlanId::placeholder(),
            plan_type: DEFAULT_PLAN_TYPE.into(),
            nvm_api_key: "builder-key".into(),
            environment: Environment::Sandbox,
            backend_url: None,
            observability_url: None,
        },
        openai_api_key: "sk-test".into(),
        model: ModelSettings::default(),
        cors_origins: vec!["*".into()],
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 30,
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    pub payments: Arc<FakePayments>,
    pub observability: Arc<FakeObservability>,
    pub llm: Arc<FakeLlm>,
}

impl TestHarness {
    pub fn new() -> Self {
        let payments = Arc::new(FakePayments::default());
        let observability = Arc::new(FakeObservability::default());
        let llm = Arc::new(FakeLlm::default());

        let state = AppState::with_backends(
            test_config(),
            payments.clone(),
            observability.clone(),
            llm.clone(),
        );

        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        Self {
            server,
            payments,
            observability,
            llm,
        }
    }

    /// Authorized POST with a `{prompt, credit_amount}` body.
    pub fn generate(&self, path: &str, prompt: &str, credit_amount: u64) -> TestRequest {
        self.server
            .post(path)
            .add_header(authorization(), bearer(TEST_TOKEN))
            .json(&json!({"prompt": prompt, "credit_amount": credit_amount}))
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn authorization() -> HeaderName {
    HeaderName::from_static("authorization")
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}
