//! Pipeline error taxonomy.

use lectern_core::CoreError;

/// Errors that terminate a pipeline run.
///
/// Every variant carries a human-readable message that is safe to
/// surface to the caller in the terminal `error` event. Persistence
/// failures deliberately do *not* appear on the run's error path: the
/// orchestrator degrades to an unsaved result instead (see
/// [`Orchestrator`](crate::Orchestrator)). The variant exists for the
/// adapters that need to report storage problems outside a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The submission itself is unusable (no source, multiple sources,
    /// empty pasted text).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Fetching or transcribing the source content failed (media
    /// download, Whisper call, caption scrape).
    #[error("acquisition failed: {0}")]
    Acquisition(String),

    /// A provider answered, but not with anything we can use (JSON that
    /// does not parse, a quiz that fails validation).
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Storage failed outside the tolerated save-stage fallback.
    #[error("persistence failed: {0}")]
    Persistence(String),
}

impl From<CoreError> for PipelineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => PipelineError::InvalidInput(msg),
            other => PipelineError::Acquisition(other.to_string()),
        }
    }
}
