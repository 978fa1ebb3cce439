//! Combined generation tests.

mod common;

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use common::{TestHarness, GPT_REPLY};
use serde_json::Value;

#[tokio::test]
async fn combined_returns_all_results() {
    let harness = TestHarness::new();

    let response = harness
        .generate("/combined", "A music video about ontologies for a teenager", 3)
        .await;

    response.assert_status_ok();
    let result = &response.json::<Value>()["result"];
    assert_eq!(result["gptResult"], GPT_REPLY);
    assert_eq!(result["imageResult"]["width"], 1024);
    assert!(result["songResult"]["jobId"].is_string());
    assert_eq!(result["videoResult"]["aspectRatio"], "16:9");
}

#[tokio::test]
async fn combined_shares_one_batch_id() {
    let harness = TestHarness::new();

    harness.generate("/combined", "ontologies", 3).await.assert_status_ok();

    let props = harness.observability.all_properties();
    assert_eq!(props.len(), 4);

    let batch_id = props[0]["batch_id"].as_str().unwrap();
    assert_eq!(batch_id.len(), 36);
    for p in &props {
        assert_eq!(p["batch_id"], batch_id);
        assert_eq!(p["is_batch_request"], serde_json::json!(1));
    }

    let operations: Vec<&str> = props
        .iter()
        .map(|p| p["operation"].as_str().unwrap())
        .collect();
    assert_eq!(
        operations,
        [
            "gpt_completion",
            "simulated_image_generation",
            "simulated_song_generation",
            "simulated_video_generation",
        ]
    );
}

#[tokio::test]
async fn combined_meters_each_operation() {
    let harness = TestHarness::new();

    harness.generate("/combined", "ontologies", 3).await.assert_status_ok();

    let endpoints: Vec<String> = harness
        .payments
        .starts
        .lock()
        .unwrap()
        .iter()
        .map(|s| s.endpoint.clone())
        .collect();
    assert_eq!(
        endpoints,
        [
            "http://agent.test/gpt",
            "http://agent.test/image",
            "http://agent.test/song",
            "http://agent.test/video",
        ]
    );

    let redeems = harness.payments.redeems.lock().unwrap();
    assert_eq!(redeems.len(), 4);
    assert!(redeems.iter().all(|r| r.credits == 3));
}

#[tokio::test]
async fn combined_failure_returns_no_partial_result() {
    let harness = TestHarness::new();
    harness.llm.fail.store(true, Ordering::SeqCst);

    let response = harness.generate("/combined", "ontologies", 3).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json::<Value>().get("result").is_none());
    assert_eq!(harness.payments.starts.lock().unwrap().len(), 1);
    assert!(harness.observability.logs.lock().unwrap().is_empty());
}
