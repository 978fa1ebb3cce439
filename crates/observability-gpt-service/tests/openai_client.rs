//! `OpenAI` client tests against a mock gateway.

use std::time::Duration;

use observability_gpt_payments::GatewayConfig;
use observability_gpt_service::openai::{ChatCompletions, LlmError, OpenAiClient};
use observability_gpt_service::operations::gpt::{complete, NO_RESPONSE};
use observability_gpt_service::ModelSettings;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> GatewayConfig {
    GatewayConfig {
        base_url: format!("{}/jawn/v1/gateway/oai/v1", server.uri()),
        headers: vec![
            ("Helicone-Auth".into(), "Bearer nvm-key".into()),
            ("Helicone-Property-operation".into(), "gpt_completion".into()),
        ],
    }
}

fn client() -> OpenAiClient {
    OpenAiClient::new("sk-test", Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn completion_goes_through_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/jawn/v1/gateway/oai/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(header("helicone-auth", "Bearer nvm-key"))
        .and(header("helicone-property-operation", "gpt_completion"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.7,
            "max_tokens": 500,
            "messages": [
                {"role": "system", "content": "You are a simulacrum of a mind that provides concise and creative responses."},
                {"role": "user", "content": "Explain quantum computing in one sentence"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-42",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Qubits superpose."}}],
            "usage": {"prompt_tokens": 30, "completion_tokens": 3, "total_tokens": 33}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = complete(
        &client(),
        &ModelSettings::default(),
        &gateway_for(&server),
        "Explain quantum computing in one sentence",
    )
    .await
    .unwrap();

    assert_eq!(text, "Qubits superpose.");
}

#[tokio::test]
async fn empty_choices_fall_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-43",
            "choices": []
        })))
        .mount(&server)
        .await;

    let text = complete(
        &client(),
        &ModelSettings::default(),
        &gateway_for(&server),
        "hello",
    )
    .await
    .unwrap();

    assert_eq!(text, NO_RESPONSE);
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
        })))
        .mount(&server)
        .await;

    let request = observability_gpt_service::openai::ChatCompletionRequest::from_prompt(
        &ModelSettings::default(),
        "hello",
    );
    let err = client()
        .chat_completion(&gateway_for(&server), &request)
        .await
        .unwrap_err();

    match err {
        LlmError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("unexpected error: {other}"),
    }
}
