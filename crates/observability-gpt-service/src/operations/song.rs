//! Simulated song generation.
//!
//! No music provider is called: the result is a canned track, logged as if a
//! provider had produced it.

use rand::Rng;
use serde_json::json;

use observability_gpt_core::{Music, SongResult, TokenUsage};
use observability_gpt_payments::{with_logging, LoggedCall};

use super::{metered, MeteredCall, OperationError, OperationKind};
use crate::state::AppState;

/// Music model version.
const MODEL_VERSION: &str = "chirp-v4";

/// Provider quota consumed per song.
const SONG_QUOTA: u64 = 6;

/// Simulated track.
const TRACK_TITLE: &str = "AI Generated Simulated Song";
const TRACK_URL: &str = "https://download.samplelib.com/wav/sample-15s.wav";
const TRACK_DURATION_SECONDS: u32 = 15;

/// Provider output before extraction.
struct SimulatedSong {
    song: SongResult,
    quota: u64,
}

/// Generate a simulated song for `call.prompt`.
pub async fn generate_song(
    state: &AppState,
    call: &MeteredCall<'_>,
) -> Result<SongResult, OperationError> {
    metered(state, OperationKind::Song, call, |properties| async move {
        let job_id = simulated_job_id();
        tracing::debug!(job_id = %job_id, "Simulating song generation");

        let logged = LoggedCall {
            agent_name: "SunoClient",
            model: format!("ttapi/suno/{MODEL_VERSION}"),
            input: json!({
                "jobId": job_id,
                "operation": "fetch_song",
                "requestData": {
                    "prompt": call.prompt,
                    "options": {
                        "title": "AI Generated Song",
                        "tags": ["ai-generated", "simulated"],
                        "lyrics": "This is a simulated song for testing purposes"
                    },
                    "mv": MODEL_VERSION
                }
            }),
            response_id_prefix: "song",
        };

        with_logging(
            state.observability.as_ref(),
            logged,
            &properties,
            move || async move { Ok::<_, OperationError>(simulate_song(job_id)) },
            |raw| raw.song,
            |raw| TokenUsage::song(raw.quota),
        )
        .await
    })
    .await
}

fn simulated_job_id() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("simulated-job-{n}")
}

fn simulate_song(job_id: String) -> SimulatedSong {
    SimulatedSong {
        song: SongResult {
            music: Music {
                music_id: format!("music-{job_id}"),
                title: TRACK_TITLE.to_string(),
                audio_url: TRACK_URL.to_string(),
                duration: TRACK_DURATION_SECONDS,
            },
            job_id,
        },
        quota: SONG_QUOTA,
    }
}
