//! Results returned by the generation endpoints.
//!
//! Field names follow the JSON the endpoints emit (`camelCase`).

use serde::{Deserialize, Serialize};

/// Text returned by a GPT completion.
pub type GptResult = String;

/// A simulated song generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongResult {
    /// Provider job id.
    pub job_id: String,
    /// Generated track.
    pub music: Music,
}

/// A generated track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Music {
    /// Track id.
    pub music_id: String,
    /// Track title.
    pub title: String,
    /// Audio file URL.
    pub audio_url: String,
    /// Duration in seconds.
    pub duration: u32,
}

/// A simulated image generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    /// Image URL.
    pub url: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height`.
    pub pixels: u64,
}

impl ImageResult {
    /// Build an image result, computing the pixel count.
    #[must_use]
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            pixels: u64::from(width) * u64::from(height),
        }
    }
}

/// A simulated video generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    /// Video URL.
    pub url: String,
    /// Duration in seconds (5 or 10).
    pub duration: u32,
    /// Aspect ratio, e.g. `16:9`.
    pub aspect_ratio: String,
    /// Generation mode.
    pub mode: String,
    /// Model version.
    pub version: String,
}

/// Aggregate of a combined generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResult {
    /// GPT completion text.
    pub gpt_result: GptResult,
    /// Image generation.
    pub image_result: ImageResult,
    /// Song generation.
    pub song_result: SongResult,
    /// Video generation.
    pub video_result: VideoResult,
}
