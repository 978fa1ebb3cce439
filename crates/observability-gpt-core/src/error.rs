//! Error types for the observability GPT agent.

use crate::ids::IdError;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while building core values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Credit amounts must be positive.
    #[error("invalid credit amount: {0}")]
    InvalidCreditAmount(String),

    /// The prompt was empty.
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}
