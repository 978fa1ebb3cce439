//! Usage figures reported to the observability backend.
//!
//! Simulated generations have no real token counts, so each media kind maps
//! its natural unit onto the completion side of a token usage record.

use serde::{Deserialize, Serialize};

/// Token usage in the shape chat-completion responses report it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens.
    pub prompt_tokens: u64,
    /// Completion tokens.
    pub completion_tokens: u64,
    /// Total tokens.
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Usage of a chat completion.
    #[must_use]
    pub const fn tokens(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Usage of an image generation, billed by pixel count.
    #[must_use]
    pub const fn image(pixels: u64) -> Self {
        Self::tokens(0, pixels)
    }

    /// Usage of a song generation, billed by provider quota.
    #[must_use]
    pub const fn song(quota: u64) -> Self {
        Self::tokens(0, quota)
    }

    /// Usage of a video generation (not billed by usage).
    #[must_use]
    pub const fn video() -> Self {
        Self::tokens(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_usage_counts_pixels() {
        let usage = TokenUsage::image(1024 * 576);
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, 589_824);
        assert_eq!(usage.total_tokens, 589_824);
    }

    #[test]
    fn song_and_video_usage() {
        assert_eq!(TokenUsage::song(6).total_tokens, 6);
        assert_eq!(TokenUsage::video(), TokenUsage::default());
    }
}
