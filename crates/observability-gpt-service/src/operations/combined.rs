//! Combined generation: every operation for one prompt, as one batch.

use observability_gpt_core::{BatchId, CombinedResult};

use super::{call_gpt, generate_image, generate_song, generate_video, MeteredCall, OperationError};
use crate::state::AppState;

/// Run GPT, image, song and video generation for `call.prompt`.
///
/// The four operations run in that order and share one batch id. Each is
/// metered on its own, so each redeems `call.credit_amount`. The first
/// failure aborts the remaining operations; credits already redeemed for
/// earlier ones stay redeemed.
pub async fn generate_combined(
    state: &AppState,
    call: &MeteredCall<'_>,
) -> Result<CombinedResult, OperationError> {
    let batch_id = BatchId::generate();
    let call = call.in_batch(batch_id);
    tracing::info!(batch_id = %batch_id, "Starting combined generation");

    let gpt_result = call_gpt(state, &call).await?;
    let image_result = generate_image(state, &call).await?;
    let song_result = generate_song(state, &call).await?;
    let video_result = generate_video(state, &call).await?;

    tracing::info!(batch_id = %batch_id, "Combined generation completed");

    Ok(CombinedResult {
        gpt_result,
        image_result,
        song_result,
        video_result,
    })
}
