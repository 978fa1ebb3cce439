//! Metered operations.
//!
//! Every operation follows the same sequence:
//!
//! 1. Start an agent request with the billing backend, scoped to the
//!    configured agent and the endpoint being served.
//! 2. Build the operation's custom properties.
//! 3. Run the action (GPT completion or a simulated generation), which logs
//!    itself with the observability backend.
//! 4. Redeem the caller's credits against the agent request. Redemption is
//!    best-effort and never fails the operation.
//!
//! [`metered`] implements the sequence once; the operation modules supply the
//! action.

use std::future::Future;

use observability_gpt_core::{BatchId, CreditAmount, CustomProperties, OperationProperties};
use observability_gpt_payments::PaymentsError;

use crate::openai::LlmError;
use crate::state::AppState;

pub mod combined;
pub mod gpt;
pub mod image;
pub mod redeem;
pub mod song;
pub mod video;

pub use combined::generate_combined;
pub use gpt::call_gpt;
pub use image::generate_image;
pub use song::generate_song;
pub use video::generate_video;

/// HTTP method the agent endpoints are registered with.
const AGENT_METHOD: &str = "POST";

/// Errors that abort an operation.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    /// The billing backend failed.
    #[error("payments backend error: {0}")]
    Payments(#[from] PaymentsError),

    /// The language model failed.
    #[error("language model error: {0}")]
    Llm(#[from] LlmError),
}

/// The kinds of metered operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// GPT chat completion.
    Gpt,
    /// Simulated song generation.
    Song,
    /// Simulated image generation.
    Image,
    /// Simulated video generation.
    Video,
}

impl OperationKind {
    /// Endpoint path serving this operation.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Gpt => "/gpt",
            Self::Song => "/song",
            Self::Image => "/image",
            Self::Video => "/video",
        }
    }

    /// Value of the `operation` property.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Gpt => "gpt_completion",
            Self::Song => "simulated_song_generation",
            Self::Image => "simulated_image_generation",
            Self::Video => "simulated_video_generation",
        }
    }
}

/// Caller input for one metered operation.
#[derive(Debug, Clone, Copy)]
pub struct MeteredCall<'a> {
    /// User prompt.
    pub prompt: &'a str,
    /// Credits to redeem on success.
    pub credit_amount: CreditAmount,
    /// The caller's bearer token.
    pub access_token: &'a str,
    /// Batch id when part of a combined request.
    pub batch_id: Option<BatchId>,
}

impl<'a> MeteredCall<'a> {
    /// A standalone call (no batch).
    #[must_use]
    pub fn new(prompt: &'a str, credit_amount: CreditAmount, access_token: &'a str) -> Self {
        Self {
            prompt,
            credit_amount,
            access_token,
            batch_id: None,
        }
    }

    /// The same call as part of `batch_id`.
    #[must_use]
    pub fn in_batch(self, batch_id: BatchId) -> Self {
        Self {
            batch_id: Some(batch_id),
            ..self
        }
    }
}

/// Run `action` inside a metered agent request.
///
/// Credits are redeemed only after `action` succeeds.
pub async fn metered<T, F, Fut>(
    state: &AppState,
    kind: OperationKind,
    call: &MeteredCall<'_>,
    action: F,
) -> Result<T, OperationError>
where
    F: FnOnce(CustomProperties) -> Fut,
    Fut: Future<Output = Result<T, OperationError>>,
{
    let billing = &state.config.billing;
    let endpoint = format!("{}{}", state.config.agent_host, kind.path());
    let auth_header = format!("Bearer {}", call.access_token);

    let agent_request = state
        .payments
        .start_processing_request(&billing.agent_id, &auth_header, &endpoint, AGENT_METHOD)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, endpoint = %endpoint, "Failed to start agent request");
            e
        })?;

    let properties = OperationProperties {
        agent_id: &billing.agent_id,
        plan_id: &billing.plan_id,
        plan_type: &billing.plan_type,
        credit_amount: call.credit_amount,
        operation: kind.label(),
        batch_id: call.batch_id,
    }
    .build();

    tracing::info!(
        operation = kind.label(),
        agent_request_id = %agent_request.agent_request_id,
        batch_id = ?call.batch_id,
        "Processing {} request",
        kind.path()
    );

    let result = action(properties).await.map_err(|e| {
        tracing::error!(error = %e, operation = kind.label(), "Operation failed");
        e
    })?;

    let outcome = redeem::redeem_credits(
        state.payments.as_ref(),
        &agent_request.agent_request_id,
        call.access_token,
        call.credit_amount,
    )
    .await;

    tracing::info!(
        operation = kind.label(),
        redeemed = outcome.is_redeemed(),
        credits_redeemed = outcome.credits_redeemed,
        "Request completed"
    );

    Ok(result)
}
