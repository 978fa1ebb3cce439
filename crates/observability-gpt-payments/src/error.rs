//! Payments adapter error types.

/// Errors that can occur when talking to the billing backend.
#[derive(Debug, thiserror::Error)]
pub enum PaymentsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned an error response.
    #[error("payments API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// A success response whose body could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
