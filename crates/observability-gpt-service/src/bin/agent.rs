//! Observability GPT Agent - runs test prompts through the observability
//! gateway without the HTTP server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use observability_gpt_service::agent::{StandaloneAgent, TEST_PROMPTS};
use observability_gpt_service::AgentConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,observability_gpt=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AgentConfig::from_env()?;
    let agent = StandaloneAgent::new(config)?;

    let succeeded = agent.run_test_prompts().await;
    tracing::info!(
        succeeded,
        total = TEST_PROMPTS.len(),
        "Agent completed"
    );

    Ok(())
}
