//! Client error types.

use observability_gpt_payments::PaymentsError;

/// Errors that can occur when using the agent client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// A request was made before an access token was obtained.
    #[error("client not initialized: call initialize() first")]
    NotInitialized,

    /// The billing backend refused the access token request.
    #[error("payments error: {0}")]
    Payments(#[from] PaymentsError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
