//! Observability GPT Service - metered GPT and simulated media generation
//!
//! This is the main entry point for the HTTP server.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use observability_gpt_service::{create_router, AppState, ServiceConfig};

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

    tracing::info!("Starting Observability GPT Service");

    let config = ServiceConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        agent_host = %config.agent_host,
        agent_id = %config.billing.agent_id,
        plan_id = %config.billing.plan_id,
        environment = %config.billing.environment,
        "Service configuration loaded"
    );

    let listen_addr = config.listen_addr.clone();
    let state = AppState::new(config)?;
    let app = create_router(state);

    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
