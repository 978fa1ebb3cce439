//! `OpenAI` chat-completion client.
//!
//! Calls are routed through the observability gateway described by a
//! [`GatewayConfig`](observability_gpt_payments::GatewayConfig), which records
//! them with the operation's custom properties.

pub mod client;
pub mod types;

pub use client::{ChatCompletions, LlmError, OpenAiClient};
pub use types::*;
