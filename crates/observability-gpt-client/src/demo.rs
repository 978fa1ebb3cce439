//! Demo run against a live service.

use crate::client::AgentClient;

/// A prompt and the credits to spend on it.
#[derive(Debug, Clone, Copy)]
pub struct DemoPrompt {
    /// User prompt.
    pub prompt: &'static str,
    /// Credits to redeem.
    pub credit_amount: u64,
}

const fn demo(prompt: &'static str, credit_amount: u64) -> DemoPrompt {
    DemoPrompt {
        prompt,
        credit_amount,
    }
}

/// Prompts for `/gpt`.
pub const TEXT_PROMPTS: &[DemoPrompt] = &[
    demo("Write a haiku about artificial intelligence", 5),
    demo("Explain quantum computing in one sentence", 8),
    demo("What's the meaning of life in 10 words or less?", 12),
];

/// Prompts for `/song`.
pub const SONG_PROMPTS: &[DemoPrompt] = &[
    demo("A melancholy ballad about debugging at 3am", 3),
    demo("Jazz fusion for coffee shop philosophers", 7),
];

/// Prompts for `/image`.
pub const IMAGE_PROMPTS: &[DemoPrompt] = &[
    demo("A wizard teaching calculus to manifolds", 2),
    demo("Time itself having an existential crisis", 4),
];

/// Prompts for `/video`.
pub const VIDEO_PROMPTS: &[DemoPrompt] = &[
    demo("Gravity deciding to take a day off", 6),
    demo("Colors arguing about who's most important", 9),
];

/// Prompts for `/combined`.
pub const COMBINED_PROMPTS: &[DemoPrompt] = &[demo(
    "A music video about ontologies for a teenager",
    3,
)];

/// Counts of a demo run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoSummary {
    /// Requests that returned a result.
    pub succeeded: usize,
    /// Requests that failed.
    pub failed: usize,
}

impl DemoSummary {
    fn record<T, E: std::fmt::Display>(&mut self, what: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => {
                self.succeeded += 1;
                Some(value)
            }
            Err(e) => {
                self.failed += 1;
                tracing::error!(error = %e, "Failed to {what}");
                None
            }
        }
    }
}

/// Run every demo prompt set against the service.
///
/// A failing request is logged and does not stop the run.
pub async fn run_test_prompts(client: &AgentClient) -> DemoSummary {
    let mut summary = DemoSummary::default();

    tracing::info!("=== Running Test Prompts ===");
    for p in TEXT_PROMPTS {
        let result = client.call_gpt(p.prompt, p.credit_amount).await;
        if let Some(text) = summary.record("process prompt", result) {
            tracing::info!(prompt = p.prompt, "GPT Result: {text}");
        }
    }

    tracing::info!("=== Testing Simulated Song Generation ===");
    for p in SONG_PROMPTS {
        let result = client.generate_song(p.prompt, p.credit_amount).await;
        if let Some(song) = summary.record("generate song", result) {
            tracing::info!(
                title = %song.music.title,
                audio_url = %song.music.audio_url,
                duration = song.music.duration,
                "Song generated"
            );
        }
    }

    tracing::info!("=== Testing Simulated Image Generation ===");
    for p in IMAGE_PROMPTS {
        let result = client.generate_image(p.prompt, p.credit_amount).await;
        if let Some(image) = summary.record("generate image", result) {
            tracing::info!(
                url = %image.url,
                pixels = image.pixels,
                "Image generated: {}x{}",
                image.width,
                image.height
            );
        }
    }

    tracing::info!("=== Testing Simulated Video Generation ===");
    for p in VIDEO_PROMPTS {
        let result = client.generate_video(p.prompt, p.credit_amount).await;
        if let Some(video) = summary.record("generate video", result) {
            tracing::info!(
                url = %video.url,
                mode = %video.mode,
                version = %video.version,
                "Video generated: {}s ({})",
                video.duration,
                video.aspect_ratio
            );
        }
    }

    tracing::info!("=== Testing Combined Prompts ===");
    for p in COMBINED_PROMPTS {
        let result = client.generate_combined(p.prompt, p.credit_amount).await;
        if let Some(combined) = summary.record("generate combined generation", result) {
            match serde_json::to_string(&combined) {
                Ok(json) => tracing::info!("Combined result: {json}"),
                Err(e) => tracing::warn!(error = %e, "Failed to serialize combined result"),
            }
        }
    }

    summary
}

/// Total number of requests made by [`run_test_prompts`].
#[must_use]
pub fn total_prompts() -> usize {
    [
        TEXT_PROMPTS,
        SONG_PROMPTS,
        IMAGE_PROMPTS,
        VIDEO_PROMPTS,
        COMBINED_PROMPTS,
    ]
    .iter()
    .map(|set| set.len())
    .sum()
}
