//! Adapter traits between the orchestrator and the outside world.
//!
//! Each trait covers one external concern. Production wiring binds them
//! to HTTP provider clients and the database; tests bind them to
//! in-memory fakes.

use async_trait::async_trait;
use lectern_core::{EntitlementState, Lecture, QuizQuestion, SummaryDocument, TranscriptSegment};

use crate::error::PipelineError;

/// A downloaded media file ready for transcription.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub bytes: Vec<u8>,
    /// Original filename, used for upload metadata and as a title
    /// fallback.
    pub filename: String,
}

/// Transcription result: the full text plus timestamped segments.
#[derive(Debug, Clone)]
pub struct TranscriptionOutput {
    pub text: String,
    pub segments: Vec<TranscriptSegment>,
}

/// Summarization result. The title is best-effort: `None` means the
/// provider could not be coaxed into a usable one, and the pipeline
/// falls back to the filename.
#[derive(Debug, Clone)]
pub struct SummaryOutput {
    pub document: SummaryDocument,
    pub title: Option<String>,
}

/// Downloads recording files by URL.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<MediaFile, PipelineError>;
}

/// Speech-to-text over a downloaded media file.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, media: MediaFile) -> Result<TranscriptionOutput, PipelineError>;
}

/// Retrieves an existing transcript for a hosted video URL.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    async fn fetch_transcript(&self, url: &str) -> Result<Vec<TranscriptSegment>, PipelineError>;
}

/// Produces the structured summary (and a candidate title) from
/// transcript text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript_text: &str) -> Result<SummaryOutput, PipelineError>;
}

/// Produces multiple-choice quiz questions from the generated summary.
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate_quiz(
        &self,
        summary: &SummaryDocument,
    ) -> Result<Vec<QuizQuestion>, PipelineError>;
}

/// Persists finished lectures. Returns the storage-assigned ID.
#[async_trait]
pub trait LectureStore: Send + Sync {
    async fn save(&self, lecture: &Lecture) -> anyhow::Result<String>;
}

/// Reads and mutates caller entitlement for the usage gate.
#[async_trait]
pub trait EntitlementStore: Send + Sync {
    /// The caller's entitlement record, if one exists. Absence means
    /// free tier.
    async fn entitlement(&self, user_id: &str) -> anyhow::Result<Option<EntitlementState>>;

    /// How many lectures the caller has already stored.
    async fn lecture_count(&self, user_id: &str) -> anyhow::Result<i64>;

    /// Atomically spend one credit. `None` when no credit was
    /// available to spend.
    async fn consume_credit(&self, user_id: &str) -> anyhow::Result<Option<i64>>;
}
