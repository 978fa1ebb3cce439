//! Observability GPT Client - runs the demo prompts against a running
//! service.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use observability_gpt_client::demo::{run_test_prompts, total_prompts};
use observability_gpt_client::{AgentClient, DEFAULT_AGENT_URL};
use observability_gpt_core::{AgentId, PlanId};
use observability_gpt_payments::{Environment, PaymentsClient, PaymentsOptions};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Subscriber API key used to obtain the access token.
    #[arg(long, env = "SUBSCRIBER_NVM_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Plan the subscriber holds credits in.
    #[arg(long, env = "NVM_PLAN_DID")]
    plan_id: PlanId,

    /// Agent to call.
    #[arg(long, env = "NVM_AGENT_DID")]
    agent_id: AgentId,

    /// Service base URL.
    #[arg(long, env = "AGENT_URL", default_value = DEFAULT_AGENT_URL)]
    agent_url: String,

    /// Billing environment.
    #[arg(long, env = "NVM_ENVIRONMENT", default_value = "sandbox")]
    environment: Environment,

    /// Protocol API override.
    #[arg(long, env = "NVM_BACKEND_URL")]
    backend_url: Option<String>,
}

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

    let args = Args::parse();

    let payments = PaymentsClient::new(
        args.api_key,
        PaymentsOptions {
            backend_url: args.backend_url,
            ..PaymentsOptions::for_environment(args.environment)
        },
    )?;

    let mut client = AgentClient::new(args.agent_url)?;
    tracing::info!(agent_url = %client.base_url(), "Client initialized");
    client
        .initialize(&payments, &args.plan_id, &args.agent_id)
        .await?;

    let summary = run_test_prompts(&client).await;
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        total = total_prompts(),
        "Client completed"
    );

    Ok(())
}
