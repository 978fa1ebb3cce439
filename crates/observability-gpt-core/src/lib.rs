//! Core types for the observability GPT agent.
//!
//! This crate provides the value types shared by the server, the payments
//! adapter and the client:
//!
//! - **Identifiers**: `AgentId`, `PlanId`, `AgentRequestId`, `BatchId`, `SessionId`
//! - **Credits**: `CreditAmount`, `RedemptionOutcome`
//! - **Properties**: `CustomProperties`, `OperationProperties`
//! - **Usage**: `TokenUsage`
//! - **Results**: `SongResult`, `ImageResult`, `VideoResult`, `CombinedResult`
//!
//! # Credit accounting
//!
//! Credits are redeemed 1:1 against an agent request, and only after the
//! operation that produced the result has succeeded.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod credits;
pub mod error;
pub mod generation;
pub mod ids;
pub mod properties;
pub mod usage;

pub use credits::{CreditAmount, RedemptionOutcome, CREDIT_USD_RATE};
pub use error::{CoreError, Result};
pub use generation::{CombinedResult, GptResult, ImageResult, Music, SongResult, VideoResult};
pub use ids::{AgentId, AgentRequestId, BatchId, IdError, PlanId, SessionId};
pub use properties::{
    CustomProperties, OperationProperties, PropertyValue, DEFAULT_PLAN_TYPE,
    PROPERTY_HEADER_PREFIX,
};
pub use usage::TokenUsage;
