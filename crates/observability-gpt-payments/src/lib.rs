//! Billing and observability backend adapter.
//!
//! This crate wraps the billing backend used by the observability GPT agent:
//!
//! - Subscriber access tokens for calling an agent
//! - Agent requests (one billable unit of work each)
//! - Credit redemption against an agent request
//! - Observability logging and the model gateway
//!
//! # Example
//!
//! ```no_run
//! use observability_gpt_core::{AgentId, PlanId};
//! use observability_gpt_payments::{Environment, PaymentsApi, PaymentsClient, PaymentsOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let payments = PaymentsClient::new(
//!     "subscriber-api-key",
//!     PaymentsOptions::for_environment(Environment::Sandbox),
//! )?;
//!
//! let plan_id: PlanId = "did:nv:plan".parse()?;
//! let agent_id: AgentId = "did:nv:agent".parse()?;
//! let token = payments.get_agent_access_token(&plan_id, &agent_id).await?;
//! println!("access token: {}", token.access_token);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod client;
mod environment;
mod error;
pub mod observability;
mod types;

pub use client::{PaymentsApi, PaymentsClient, PaymentsOptions};
pub use environment::Environment;
pub use error::PaymentsError;
pub use observability::{with_logging, GatewayConfig, LoggedCall, ObservabilityApi};
pub use types::*;
