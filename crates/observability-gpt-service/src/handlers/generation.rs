//! Generation endpoint handlers.
//!
//! Every endpoint takes the same body and bearer token. The body is
//! validated before the token, so a request that is both malformed and
//! unauthenticated is rejected with 400.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use observability_gpt_core::{
    CombinedResult, CoreError, CreditAmount, GptResult, ImageResult, SongResult, VideoResult,
};

use crate::auth::BearerToken;
use crate::error::ApiError;
use crate::operations::{
    call_gpt, generate_combined, generate_image, generate_song, generate_video, MeteredCall,
};
use crate::state::AppState;

/// Request body shared by the generation endpoints.
#[derive(Debug, Deserialize)]
pub struct GenerationRequest {
    /// User prompt.
    pub prompt: Option<String>,
    /// Credits to redeem for the call.
    pub credit_amount: Option<u64>,
}

/// A validated generation request.
#[derive(Debug)]
struct ValidRequest {
    prompt: String,
    credit_amount: CreditAmount,
}

impl GenerationRequest {
    fn validate(self) -> Result<ValidRequest, ApiError> {
        let prompt = self
            .prompt
            .filter(|p| !p.trim().is_empty())
            .ok_or(CoreError::EmptyPrompt)?;

        let credit_amount = self.credit_amount.ok_or_else(|| {
            ApiError::BadRequest("credit_amount is required".into())
        })?;

        Ok(ValidRequest {
            prompt,
            credit_amount: CreditAmount::new(credit_amount)?,
        })
    }
}

/// Successful generation response.
#[derive(Debug, Serialize)]
pub struct GenerationResponse<T> {
    /// The operation's output.
    pub result: T,
}

type Body = Result<Json<GenerationRequest>, JsonRejection>;
type Auth = Result<BearerToken, ApiError>;

/// Validate the body, then the token.
fn accept(body: Body, auth: Auth) -> Result<(ValidRequest, BearerToken), ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = request.validate()?;
    let token = auth?;
    Ok((request, token))
}

/// `POST /gpt` - answer a prompt with the language model.
pub async fn gpt(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    body: Body,
) -> Result<Json<GenerationResponse<GptResult>>, ApiError> {
    let (request, token) = accept(body, auth)?;
    let call = MeteredCall::new(&request.prompt, request.credit_amount, token.as_str());

    let result = call_gpt(&state, &call).await?;
    Ok(Json(GenerationResponse { result }))
}

/// `POST /song` - generate a simulated song.
pub async fn song(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    body: Body,
) -> Result<Json<GenerationResponse<SongResult>>, ApiError> {
    let (request, token) = accept(body, auth)?;
    let call = MeteredCall::new(&request.prompt, request.credit_amount, token.as_str());

    let result = generate_song(&state, &call).await?;
    Ok(Json(GenerationResponse { result }))
}

/// `POST /image` - generate a simulated image.
pub async fn image(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    body: Body,
) -> Result<Json<GenerationResponse<ImageResult>>, ApiError> {
    let (request, token) = accept(body, auth)?;
    let call = MeteredCall::new(&request.prompt, request.credit_amount, token.as_str());

    let result = generate_image(&state, &call).await?;
    Ok(Json(GenerationResponse { result }))
}

/// `POST /video` - generate a simulated video.
pub async fn video(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    body: Body,
) -> Result<Json<GenerationResponse<VideoResult>>, ApiError> {
    let (request, token) = accept(body, auth)?;
    let call = MeteredCall::new(&request.prompt, request.credit_amount, token.as_str());

    let result = generate_video(&state, &call).await?;
    Ok(Json(GenerationResponse { result }))
}

/// `POST /combined` - run every operation for one prompt.
pub async fn combined(
    State(state): State<Arc<AppState>>,
    auth: Auth,
    body: Body,
) -> Result<Json<GenerationResponse<CombinedResult>>, ApiError> {
    let (request, token) = accept(body, auth)?;
    let call = MeteredCall::new(&request.prompt, request.credit_amount, token.as_str());

    let result = generate_combined(&state, &call).await?;
    Ok(Json(GenerationResponse { result }))
}
