//! Agent client tests against a mock service.

use observability_gpt_client::demo::{run_test_prompts, total_prompts};
use observability_gpt_client::{AgentClient, ClientError};
use observability_gpt_core::{AgentId, PlanId};
use observability_gpt_payments::{PaymentsClient, PaymentsOptions};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AgentClient {
    AgentClient::new(server.uri())
        .expect("client")
        .with_access_token("subscriber-token")
}

#[tokio::test]
async fn initialize_fetches_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/protocol/token/did:nv:plan/did:nv:agent"))
        .and(header("authorization", "Bearer subscriber-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh-token"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/gpt"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "hi"})))
        .expect(1)
        .mount(&server)
        .await;

    let payments = PaymentsClient::new(
        "subscriber-key",
        PaymentsOptions {
            backend_url: Some(server.uri()),
            ..PaymentsOptions::default()
        },
    )
    .unwrap();
    let plan_id: PlanId = "did:nv:plan".parse().unwrap();
    let agent_id: AgentId = "did:nv:agent".parse().unwrap();

    let mut client = AgentClient::new(server.uri()).unwrap();
    let token = client
        .initialize(&payments, &plan_id, &agent_id)
        .await
        .unwrap();
    assert_eq!(token, "fresh-token");

    assert_eq!(client.call_gpt("hello", 1).await.unwrap(), "hi");
}

#[tokio::test]
async fn request_body_and_result_unwrapping() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/image"))
        .and(header("authorization", "Bearer subscriber-token"))
        .and(body_json(json!({"prompt": "A wizard", "credit_amount": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "url": "https://v3.fal.media/files/lion/sGrK0XLGX-V2-LOCMN6aW.png",
                "width": 1024,
                "height": 576,
                "pixels": 589_824
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = client_for(&server)
        .generate_image("A wizard", 2)
        .await
        .unwrap();

    assert_eq!(image.width, 1024);
    assert_eq!(image.pixels, 589_824);
}

#[tokio::test]
async fn combined_result_is_typed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/combined"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "gptResult": "text",
                "imageResult": {"url": "u", "width": 1024, "height": 576, "pixels": 589_824},
                "songResult": {
                    "jobId": "simulated-job-7",
                    "music": {
                        "musicId": "music-simulated-job-7",
                        "title": "AI Generated Simulated Song",
                        "audioUrl": "https://download.samplelib.com/wav/sample-15s.wav",
                        "duration": 15
                    }
                },
                "videoResult": {
                    "url": "v",
                    "duration": 10,
                    "aspectRatio": "16:9",
                    "mode": "std",
                    "version": "1.6"
                }
            }
        })))
        .mount(&server)
        .await;

    let combined = client_for(&server)
        .generate_combined("ontologies", 3)
        .await
        .unwrap();

    assert_eq!(combined.gpt_result, "text");
    assert_eq!(combined.song_result.music.duration, 15);
    assert_eq!(combined.video_result.duration, 10);
}

#[tokio::test]
async fn error_response_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/song"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": "bad_request", "message": "prompt must not be empty"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_song("", 1)
        .await
        .unwrap_err();

    match err {
        ClientError::Api {
            code,
            message,
            status,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, "bad_request");
            assert_eq!(message, "prompt must not be empty");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn error_without_body_maps_to_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server).call_gpt("hi", 1).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Api { status: 502, ref code, .. } if code == "unknown"
    ));
}

#[tokio::test]
async fn demo_run_survives_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/gpt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "ok"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": {"code": "internal_error", "message": "An internal error occurred"}
        })))
        .mount(&server)
        .await;

    let summary = run_test_prompts(&client_for(&server)).await;

    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, total_prompts() - 3);
}
