//! Lectern domain types and pure logic.
//!
//! Everything in this crate is side-effect free: submission validation,
//! transcript segment synthesis for pasted text, summary and quiz shapes,
//! the lecture aggregate, title resolution, share-slug generation, and
//! export formatting. Network adapters live in `lectern-providers`;
//! sequencing lives in `lectern-pipeline`.

pub mod entitlement;
pub mod error;
pub mod export;
pub mod lecture;
pub mod quiz;
pub mod slug;
pub mod submission;
pub mod summary;
pub mod transcript;
pub mod types;

pub use entitlement::{EntitlementState, Tier};
pub use error::CoreError;
pub use lecture::{resolve_title, Lecture, PASTED_TEXT_SENTINEL, UNTITLED_LECTURE};
pub use quiz::{validate_quiz, Difficulty, QuizQuestion};
pub use slug::share_slug;
pub use submission::{ContentSource, Submission};
pub use summary::SummaryDocument;
pub use transcript::{chunk_raw_text, transcript_duration, TranscriptSegment};
