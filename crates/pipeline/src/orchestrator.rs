//! The sequential processing pipeline.
//!
//! One run: acquire a transcript (file upload, hosted video captions,
//! or pasted text), summarize it, generate a quiz, then persist and
//! report the finished lecture. Stages run strictly in order; the
//! first failing stage ends the run with a single `error` event.
//!
//! Persistence is the one stage allowed to fail softly. A lecture the
//! caller can read right now beats a clean error, so a failed or
//! unconfigured save still yields a `done` event, with a local ID
//! marking the lecture as unsaved.

use std::sync::Arc;

use chrono::Utc;
use lectern_core::lecture::local_lecture_id;
use lectern_core::transcript::join_text;
use lectern_core::{
    chunk_raw_text, resolve_title, share_slug, transcript_duration, validate_quiz, ContentSource,
    Lecture, QuizQuestion, Submission, SummaryDocument, TranscriptSegment,
};
use serde::Serialize;

use crate::error::PipelineError;
use crate::progress::{ProgressSender, Stage};
use crate::traits::{
    CaptionSource, LectureStore, MediaFetcher, QuizGenerator, Summarizer, Transcriber,
};

/// Everything a finished run hands back to the caller. Flattened into
/// the terminal `done` event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    /// Storage ID, or `local-<millis>` when the lecture was not saved.
    pub lecture_id: String,
    pub title: String,
    pub transcript: Vec<TranscriptSegment>,
    pub summary: SummaryDocument,
    pub quiz: Vec<QuizQuestion>,
    pub file_url: String,
    pub slug: String,
}

/// Drives one submission through every stage.
///
/// Holds adapter handles only, so it is cheap to clone and share. A
/// `None` store means persistence is not configured; runs still
/// succeed, producing local IDs.
#[derive(Clone)]
pub struct Orchestrator {
    media: Arc<dyn MediaFetcher>,
    transcriber: Arc<dyn Transcriber>,
    captions: Arc<dyn CaptionSource>,
    summarizer: Arc<dyn Summarizer>,
    quiz: Arc<dyn QuizGenerator>,
    store: Option<Arc<dyn LectureStore>>,
}

impl Orchestrator {
    pub fn new(
        media: Arc<dyn MediaFetcher>,
        transcriber: Arc<dyn Transcriber>,
        captions: Arc<dyn CaptionSource>,
        summarizer: Arc<dyn Summarizer>,
        quiz: Arc<dyn QuizGenerator>,
        store: Option<Arc<dyn LectureStore>>,
    ) -> Self {
        Self {
            media,
            transcriber,
            captions,
            summarizer,
            quiz,
            store,
        }
    }

    /// Run the pipeline for one submission, reporting progress on
    /// `progress`. Always emits exactly one terminal event.
    pub async fn process(&self, submission: Submission, progress: ProgressSender) {
        match self.run(&submission, &progress).await {
            Ok(outcome) => {
                tracing::info!(
                    lecture_id = %outcome.lecture_id,
                    title = %outcome.title,
                    "pipeline run complete"
                );
                progress.done(outcome).await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "pipeline run failed");
                progress.error(err.to_string()).await;
            }
        }
    }

    async fn run(
        &self,
        submission: &Submission,
        progress: &ProgressSender,
    ) -> Result<RunOutcome, PipelineError> {
        let submitted_at = Utc::now();

        // --- Acquisition: 0 -> 40 ------------------------------------
        let (segments, full_text) = self.acquire(submission, progress).await?;

        // --- Summary: 40 -> 70 ---------------------------------------
        progress
            .progress(Stage::Summarize, 50, "Generating summary...")
            .await;
        let summary = self.summarizer.summarize(&full_text).await?;
        progress
            .progress(Stage::Summarize, 70, "Summary complete")
            .await;

        // --- Quiz: 70 -> 90 ------------------------------------------
        progress
            .progress(Stage::Quiz, 80, "Creating quiz questions...")
            .await;
        let quiz = self.quiz.generate_quiz(&summary.document).await?;
        validate_quiz(&quiz).map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
        progress.progress(Stage::Quiz, 90, "Quiz ready").await;

        // --- Save: 90 -> 100 -----------------------------------------
        progress
            .progress(Stage::Save, 95, "Saving lecture...")
            .await;

        let title = resolve_title(summary.title.as_deref(), submission.filename.as_deref());
        let mut lecture = Lecture {
            id: local_lecture_id(submitted_at),
            slug: Some(share_slug()),
            user_id: submission.owner().to_string(),
            title,
            course: submission.course_name.clone(),
            professor: submission.professor_name.clone(),
            date: submitted_at,
            duration: transcript_duration(&segments),
            transcript: segments,
            summary: summary.document,
            quiz,
            file_url: submission.origin_url().to_string(),
        };

        if let Some(store) = &self.store {
            match store.save(&lecture).await {
                Ok(id) => lecture.id = id,
                Err(err) => {
                    // Tolerated: the caller still gets the full result,
                    // with a local ID marking it unsaved.
                    tracing::warn!(error = %err, "lecture save failed, returning unsaved result");
                }
            }
        }

        progress
            .progress(Stage::Complete, 100, "Processing complete!")
            .await;

        Ok(RunOutcome {
            lecture_id: lecture.id,
            title: lecture.title,
            transcript: lecture.transcript,
            summary: lecture.summary,
            quiz: lecture.quiz,
            file_url: lecture.file_url,
            // A freshly generated slug is always present.
            slug: lecture.slug.unwrap_or_default(),
        })
    }

    /// Resolve the submission's single content source into timestamped
    /// segments plus the joined text fed to the generation stages.
    async fn acquire(
        &self,
        submission: &Submission,
        progress: &ProgressSender,
    ) -> Result<(Vec<TranscriptSegment>, String), PipelineError> {
        let source = submission
            .source()
            .map_err(|e| PipelineError::InvalidInput(e.to_string()))?;

        let segments = match source {
            ContentSource::Paste { text } => {
                progress
                    .progress(Stage::Transcribe, 20, "Preparing pasted text...")
                    .await;
                let segments = chunk_raw_text(&text);
                if segments.is_empty() {
                    return Err(PipelineError::InvalidInput(
                        "rawText contains no usable text".to_string(),
                    ));
                }
                progress
                    .progress(Stage::Transcribe, 40, "Text prepared")
                    .await;
                segments
            }
            ContentSource::YouTube { url } => {
                progress
                    .progress(Stage::Transcribe, 20, "Fetching video transcript...")
                    .await;
                let segments = self.captions.fetch_transcript(&url).await?;
                progress
                    .progress(Stage::Transcribe, 40, "Transcript fetched")
                    .await;
                segments
            }
            ContentSource::File { url } => {
                progress
                    .progress(Stage::Transcribe, 20, "Transcribing audio...")
                    .await;
                let mut media = self.media.fetch(&url).await?;
                if let Some(name) = &submission.filename {
                    media.filename = name.clone();
                }
                let output = self.transcriber.transcribe(media).await?;
                progress
                    .progress(Stage::Transcribe, 40, "Transcription complete")
                    .await;
                output.segments
            }
        };

        let full_text = join_text(&segments);
        Ok((segments, full_text))
    }
}
