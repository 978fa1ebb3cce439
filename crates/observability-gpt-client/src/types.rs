//! Wire types for the service endpoints.

use serde::{Deserialize, Serialize};

/// Body of every generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    /// User prompt.
    pub prompt: &'a str,
    /// Credits to redeem for the call.
    pub credit_amount: u64,
}

/// Successful response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse<T> {
    /// The operation's output.
    pub result: T,
}

/// Error response from the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    /// Error details.
    pub error: ApiErrorBody,
}

/// Error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error code (e.g. `bad_request`).
    pub code: String,
    /// Human-readable message.
    pub message: String,
}
