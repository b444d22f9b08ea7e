//! The persisted lecture aggregate and title resolution.

use serde::{Deserialize, Serialize};

use crate::quiz::QuizQuestion;
use crate::summary::SummaryDocument;
use crate::transcript::TranscriptSegment;
use crate::types::Timestamp;

/// `file_url` sentinel recorded for pasted-text submissions.
pub const PASTED_TEXT_SENTINEL: &str = "pasted-text";

/// Fallback title when neither the AI nor the caller supplied one.
pub const UNTITLED_LECTURE: &str = "Untitled Lecture";

/// The finished, persisted aggregate of one successful pipeline run.
///
/// Created once at the end of a run and never mutated by this core.
/// `id` is storage-assigned on successful persistence, or a
/// `local-<millis>` fallback when persistence failed or is not
/// configured -- persistence is best-effort, not required for the run
/// to be considered successful.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    pub id: String,
    /// Short shareable slug, 6 random alphanumerics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Owning user id; `"anonymous"` allowed.
    pub user_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
    pub date: Timestamp,
    /// End timestamp of the last transcript segment, or 0.
    pub duration: f64,
    pub transcript: Vec<TranscriptSegment>,
    pub summary: SummaryDocument,
    pub quiz: Vec<QuizQuestion>,
    /// Originating URL, or [`PASTED_TEXT_SENTINEL`].
    pub file_url: String,
}

/// Resolve the lecture title from the AI suggestion and the caller's
/// filename.
///
/// Policy (single, deliberate -- see DESIGN.md): prefer the AI title
/// whenever it is usable (non-empty after trim and longer than 2
/// characters), else fall back to the filename, else to
/// [`UNTITLED_LECTURE`]. An AI title is almost always better than a
/// filename like `audio_2023.mp3`.
pub fn resolve_title(ai_title: Option<&str>, filename: Option<&str>) -> String {
    if let Some(title) = ai_title {
        let title = title.trim();
        if title.len() > 2 {
            return title.to_string();
        }
    }

    match filename.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => UNTITLED_LECTURE.to_string(),
    }
}

/// Fallback lecture identifier used when persistence is unavailable.
pub fn local_lecture_id(submitted_at: Timestamp) -> String {
    format!("local-{}", submitted_at.timestamp_millis())
}
