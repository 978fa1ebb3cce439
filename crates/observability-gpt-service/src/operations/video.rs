//! Simulated video generation.

use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

use observability_gpt_core::{TokenUsage, VideoResult};
use observability_gpt_payments::{with_logging, LoggedCall};

use super::{metered, MeteredCall, OperationError, OperationKind};
use crate::state::AppState;

/// Aspect ratio of every generated video.
pub const ASPECT_RATIO: &str = "16:9";

const MODE: &str = "std";
const MODEL_VERSION: &str = "1.6";

/// Sample videos returned by the simulation.
pub const SIMULATED_VIDEO_URLS: &[&str] = &[
    "https://download.samplelib.com/mp4/sample-5s.mp4",
    "https://download.samplelib.com/mp4/sample-10s.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
];

/// Generate a simulated video for `call.prompt`.
pub async fn generate_video(
    state: &AppState,
    call: &MeteredCall<'_>,
) -> Result<VideoResult, OperationError> {
    metered(state, OperationKind::Video, call, |properties| async move {
        let duration = pick_duration();
        tracing::debug!(duration, "Simulating video generation");

        let logged = LoggedCall {
            agent_name: "VideoGeneratorAgent",
            model: model_name(MODE, duration, MODEL_VERSION),
            input: json!({
                "prompt": call.prompt,
                "duration": duration,
                "mode": MODE,
                "aspect_ratio": ASPECT_RATIO,
                "version": MODEL_VERSION
            }),
            response_id_prefix: "video",
        };

        with_logging(
            state.observability.as_ref(),
            logged,
            &properties,
            move || async move { Ok::<_, OperationError>(simulate_video(duration)) },
            |video| video,
            |_| TokenUsage::video(),
        )
        .await
    })
    .await
}

/// 5 or 10 seconds with equal probability.
fn pick_duration() -> u32 {
    if rand::thread_rng().gen_bool(0.5) {
        5
    } else {
        10
    }
}

fn model_name(mode: &str, duration: u32, version: &str) -> String {
    format!("piapi/kling-v{version}/text-to-video/{mode}-{duration}s")
}

fn simulate_video(duration: u32) -> VideoResult {
    let url = SIMULATED_VIDEO_URLS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(SIMULATED_VIDEO_URLS[0]);

    VideoResult {
        url: url.to_string(),
        duration,
        aspect_ratio: ASPECT_RATIO.to_string(),
        mode: MODE.to_string(),
        version: MODEL_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_five_or_ten() {
        let durations: Vec<u32> = (0..200).map(|_| pick_duration()).collect();
        assert!(durations.iter().all(|d| *d == 5 || *d == 10));
        assert!(durations.contains(&5));
        assert!(durations.contains(&10));
    }

    #[test]
    fn model_name_encodes_mode_and_duration() {
        assert_eq!(
            model_name("std", 10, "1.6"),
            "piapi/kling-v1.6/text-to-video/std-10s"
        );
    }

    #[test]
    fn simulated_video_shape() {
        let video = simulate_video(5);
        assert_eq!(video.aspect_ratio, "16:9");
        assert_eq!(video.mode, "std");
        assert_eq!(video.version, "1.6");
        assert!(SIMULATED_VIDEO_URLS.contains(&video.url.as_str()));
    }
}
