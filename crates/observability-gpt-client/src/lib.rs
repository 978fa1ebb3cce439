//! Observability GPT Client.
//!
//! Client library for the metered generation endpoints of the Observability
//! GPT service.
//!
//! # Example
//!
//! ```no_run
//! use observability_gpt_client::AgentClient;
//! use observability_gpt_payments::{PaymentsClient, PaymentsOptions};
//!
//! # async fn example() -> Result<(), observability_gpt_client::ClientError> {
//! let payments = PaymentsClient::new("subscriber-api-key", PaymentsOptions::default())?;
//! let plan_id = "did:nv:plan".parse().expect("plan id");
//! let agent_id = "did:nv:agent".parse().expect("agent id");
//!
//! let mut client = AgentClient::new("http://localhost:3000")?;
//! client.initialize(&payments, &plan_id, &agent_id).await?;
//!
//! let image = client.generate_image("A wizard teaching calculus", 2).await?;
//! println!("{}x{} at {}", image.width, image.height, image.url);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
pub mod demo;
mod error;
mod types;

pub use client::{AgentClient, ClientOptions, DEFAULT_AGENT_URL};
pub use error::ClientError;
pub use types::*;
