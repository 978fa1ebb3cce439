//! # Observability GPT Service
//!
//! HTTP server that meters GPT completions and simulated media generation
//! against a subscriber's credits.
//!
//! Each request starts an agent request with the billing backend, runs the
//! operation with observability logging, then redeems the caller's credits.
//!
//! ## Endpoints
//!
//! - `POST /gpt`, `/song`, `/image`, `/video`, `/combined` with
//!   `{"prompt": "...", "credit_amount": 1}` and `Authorization: Bearer <token>`
//! - `GET /health`
//!
//! The crate also provides the [`agent::StandaloneAgent`], which calls the
//! model through the observability gateway without serving HTTP.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod agent;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod openai;
pub mod operations;
pub mod routes;
pub mod state;

pub use config::{AgentConfig, ConfigError, ModelSettings, ServiceConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
