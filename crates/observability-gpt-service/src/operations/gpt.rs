//! GPT completion.

use observability_gpt_core::GptResult;
use observability_gpt_payments::GatewayConfig;

use super::{metered, MeteredCall, OperationError, OperationKind};
use crate::config::ModelSettings;
use crate::openai::{ChatCompletionRequest, ChatCompletions, LlmError};
use crate::state::AppState;

/// Returned when the model produces no text.
pub const NO_RESPONSE: &str = "No response generated";

/// Answer `call.prompt` with the language model, routed through the
/// observability gateway.
pub async fn call_gpt(
    state: &AppState,
    call: &MeteredCall<'_>,
) -> Result<GptResult, OperationError> {
    metered(state, OperationKind::Gpt, call, |properties| async move {
        let gateway = state.observability.openai_gateway(&properties);
        let text = complete(state.llm.as_ref(), &state.config.model, &gateway, call.prompt).await?;
        Ok(text)
    })
    .await
}

/// Run one chat completion and return the first choice's text, or
/// [`NO_RESPONSE`] when there is none.
pub async fn complete(
    llm: &dyn ChatCompletions,
    settings: &ModelSettings,
    gateway: &GatewayConfig,
    prompt: &str,
) -> Result<String, LlmError> {
    tracing::debug!(model = %settings.model, "Calling GPT");

    let request = ChatCompletionRequest::from_prompt(settings, prompt);
    let response = llm.chat_completion(gateway, &request).await?;

    let text = response.first_content().unwrap_or(NO_RESPONSE).to_string();
    let usage = response.usage.unwrap_or_default();
    tracing::debug!(
        response_id = ?response.id,
        prompt_tokens = usage.prompt_tokens,
        completion_tokens = usage.completion_tokens,
        total_tokens = usage.total_tokens,
        chars = text.len(),
        "GPT response received"
    );
    Ok(text)
}
