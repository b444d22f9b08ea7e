//! Lecture entity model and insert DTO.

use lectern_core::types::Timestamp;
use lectern_core::{Lecture, QuizQuestion, SummaryDocument, TranscriptSegment};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `lectures` table. Transcript, summary and quiz are
/// stored as JSONB in the wire shape (camelCase keys).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LectureRow {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub course_name: Option<String>,
    pub professor_name: Option<String>,
    pub file_url: String,
    pub transcript: serde_json::Value,
    pub summary: serde_json::Value,
    pub quiz: serde_json::Value,
    pub duration: f64,
    pub slug: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for inserting a finished lecture.
#[derive(Debug, Clone)]
pub struct NewLecture {
    pub user_id: String,
    pub title: String,
    pub course_name: Option<String>,
    pub professor_name: Option<String>,
    pub file_url: String,
    pub transcript: serde_json::Value,
    pub summary: serde_json::Value,
    pub quiz: serde_json::Value,
    pub duration: f64,
    pub slug: Option<String>,
}

impl LectureRow {
    /// Deserialize the JSONB columns back into the typed domain
    /// aggregate. Fails if a stored document does not match the current
    /// shape (e.g. rows written by an incompatible version).
    pub fn into_lecture(self) -> Result<Lecture, serde_json::Error> {
        let transcript: Vec<TranscriptSegment> = serde_json::from_value(self.transcript)?;
        let summary: SummaryDocument = serde_json::from_value(self.summary)?;
        let quiz: Vec<QuizQuestion> = serde_json::from_value(self.quiz)?;

        Ok(Lecture {
            id: self.id.to_string(),
            slug: self.slug,
            user_id: self.user_id,
            title: self.title,
            course: self.course_name,
            professor: self.professor_name,
            date: self.created_at,
            duration: self.duration,
            transcript,
            summary,
            quiz,
            file_url: self.file_url,
        })
    }
}
