//! Simulated image generation.

use rand::seq::SliceRandom;
use serde_json::json;

use observability_gpt_core::{ImageResult, TokenUsage};
use observability_gpt_payments::{with_logging, LoggedCall};

use super::{metered, MeteredCall, OperationError, OperationKind};
use crate::state::AppState;

/// Generated image width.
pub const IMAGE_WIDTH: u32 = 1024;

/// Generated image height.
pub const IMAGE_HEIGHT: u32 = 576;

/// Sample images returned by the simulation.
pub const SIMULATED_IMAGE_URLS: &[&str] = &[
    "https://v3.fal.media/files/kangaroo/OyJfXujVSXxPby1bjYe--.png",
    "https://v3.fal.media/files/rabbit/iGjlnk6hZqq5LPtOOSdiu.png",
    "https://v3.fal.media/files/lion/sGrK0XLGX-V2-LOCMN6aW.png",
    "https://v3.fal.media/files/panda/VytitIH7qWYfrXzLvITxi.png",
    "https://v3.fal.media/files/panda/XJb6IFiXFUxxWvn6tyDBl.png",
    "https://v3.fal.media/files/zebra/7sNOX9UH0mLjndayQsIYw.png",
    "https://v3.fal.media/files/lion/Y5MynHlT3LFGUf-BrD6Dd.png",
    "https://v3.fal.media/files/rabbit/EmyU04RwnZGlODQt9z9WZ.png",
    "https://v3.fal.media/files/koala/9cnEfODPJLdoKLiM2_pND.png",
];

/// Generate a simulated image for `call.prompt`.
pub async fn generate_image(
    state: &AppState,
    call: &MeteredCall<'_>,
) -> Result<ImageResult, OperationError> {
    metered(state, OperationKind::Image, call, |properties| async move {
        let logged = LoggedCall {
            agent_name: "ImageGeneratorAgent",
            model: "fal-ai/flux-schnell/text-to-image".to_string(),
            input: json!({
                "prompt": call.prompt,
                "image_size": "landscape_16_9",
                "num_inference_steps": 4,
                "num_images": 1,
                "enable_safety_checker": true
            }),
            response_id_prefix: "img",
        };

        with_logging(
            state.observability.as_ref(),
            logged,
            &properties,
            || async { Ok::<_, OperationError>(simulate_image()) },
            |image| image,
            |image| TokenUsage::image(image.pixels),
        )
        .await
    })
    .await
}

fn simulate_image() -> ImageResult {
    let url = SIMULATED_IMAGE_URLS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SIMULATED_IMAGE_URLS[0]);
    let image = ImageResult::new(url, IMAGE_WIDTH, IMAGE_HEIGHT);
    tracing::debug!(pixels = image.pixels, "Generated image pixels");
    image
}
