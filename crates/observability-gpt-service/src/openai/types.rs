//! `OpenAI` API types.

use serde::{Deserialize, Serialize};

use observability_gpt_core::TokenUsage;

use crate::config::ModelSettings;

/// Chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions.
    System,
    /// End-user input.
    User,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author role.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name.
    pub model: String,
    /// Conversation.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum output tokens.
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// System prompt from `settings` followed by `prompt`.
    #[must_use]
    pub fn from_prompt(settings: &ModelSettings, prompt: &str) -> Self {
        Self {
            model: settings.model.clone(),
            messages: vec![
                ChatMessage::system(settings.system_prompt.clone()),
                ChatMessage::user(prompt),
            ],
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

/// Chat-completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion id.
    #[serde(default)]
    pub id: Option<String>,
    /// Candidate completions.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Token usage.
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any.
    #[must_use]
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

/// One candidate completion.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Generated message.
    pub message: ResponseMessage,
}

/// Message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Generated text (absent for tool calls).
    #[serde(default)]
    pub content: Option<String>,
}

/// Error body returned by the `OpenAI` API.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorResponse {
    /// Error details.
    pub error: OpenAiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiErrorBody {
    /// Error message.
    pub message: String,
}
