//! Groq Whisper transcription client.
//!
//! Uploads the recording as multipart form data and asks for
//! `verbose_json` so the response carries timestamped segments, not
//! just the flat text.

use async_trait::async_trait;
use lectern_core::TranscriptSegment;
use lectern_pipeline::traits::{MediaFile, TranscriptionOutput, Transcriber};
use lectern_pipeline::PipelineError;
use reqwest::multipart;
use serde::Deserialize;

use crate::error::ProviderError;

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/audio/transcriptions";

/// Whisper model used for all transcriptions.
const MODEL: &str = "whisper-large-v3";

/// Whisper offers no diarization, so every segment gets this label.
const SPEAKER_LABEL: &str = "Speaker";

/// Client for the Groq-hosted Whisper transcription endpoint.
#[derive(Clone)]
pub struct TranscriptionClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

/// `verbose_json` response body, reduced to the fields we consume.
#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    segments: Vec<RawSegment>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    start: f64,
    end: f64,
    text: String,
}

impl TranscriptionClient {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self {
            client,
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
        }
    }

    async fn request(&self, media: MediaFile) -> Result<TranscriptionOutput, ProviderError> {
        let file_part = multipart::Part::bytes(media.bytes)
            .file_name(media.filename.clone())
            .mime_str("audio/mpeg")
            .map_err(|e| ProviderError::Malformed {
                provider: "groq",
                message: e.to_string(),
            })?;
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", MODEL)
            .text("response_format", "verbose_json")
            .text("language", "en");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Api {
                provider: "groq",
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: VerboseTranscription =
            response.json().await.map_err(|e| ProviderError::Malformed {
                provider: "groq",
                message: e.to_string(),
            })?;

        tracing::debug!(
            filename = %media.filename,
            segments = body.segments.len(),
            "transcription complete"
        );
        Ok(normalize(body))
    }
}

/// Renumber segments 1-based, trim text, and attach the speaker label.
fn normalize(body: VerboseTranscription) -> TranscriptionOutput {
    let segments = body
        .segments
        .into_iter()
        .enumerate()
        .map(|(idx, seg)| TranscriptSegment {
            id: (idx + 1).to_string(),
            start: seg.start,
            end: seg.end,
            text: seg.text.trim().to_string(),
            speaker: Some(SPEAKER_LABEL.to_string()),
        })
        .collect();
    TranscriptionOutput {
        text: body.text,
        segments,
    }
}

#[async_trait]
impl Transcriber for TranscriptionClient {
    async fn transcribe(&self, media: MediaFile) -> Result<TranscriptionOutput, PipelineError> {
        Ok(self.request(media).await?)
    }
}
