//! HTTP clients for the external providers the pipeline depends on:
//! Groq Whisper for speech-to-text, Gemini for summary/title/quiz
//! generation, and YouTube caption scraping for hosted videos.
//!
//! Each client implements the corresponding adapter trait from
//! `lectern_pipeline::traits`, so the orchestrator never sees provider
//! specifics.

pub mod captions;
pub mod error;
pub mod extract;
pub mod generation;
pub mod media;
pub mod transcription;

pub use captions::CaptionClient;
pub use error::ProviderError;
pub use generation::GenerationClient;
pub use media::MediaClient;
pub use transcription::TranscriptionClient;
