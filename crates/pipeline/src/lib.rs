//! Lecture processing pipeline.
//!
//! Turns a [`Submission`](lectern_core::Submission) into a transcript,
//! an AI summary, and a quiz, reporting progress along the way. The
//! pipeline itself is provider-agnostic: transcription, generation,
//! captions, and persistence all arrive through the adapter traits in
//! [`traits`], so the orchestrator can be exercised end to end with
//! in-memory fakes.
//!
//! The [`gate`] module decides, before a run starts, whether the
//! caller's entitlement tier permits another run.

pub mod error;
pub mod gate;
pub mod orchestrator;
pub mod progress;
pub mod traits;

pub use error::PipelineError;
pub use gate::{DenyReason, GateDecision, UsageGate};
pub use orchestrator::{Orchestrator, RunOutcome};
pub use progress::{PipelineEvent, ProgressSender, ProgressUpdate, Stage};
