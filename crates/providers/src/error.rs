//! Shared error type for provider clients.

use lectern_pipeline::PipelineError;

/// Failure talking to, or interpreting, an external provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("{provider} returned HTTP {status}: {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The provider answered 200 but the payload is unusable.
    #[error("{provider} response unusable: {message}")]
    Malformed {
        provider: &'static str,
        message: String,
    },

    /// Every caption strategy failed for this video.
    #[error("no captions available for video {0}")]
    CaptionsUnavailable(String),

    /// The submitted URL is not a recognizable video URL.
    #[error("not a recognizable video URL: {0}")]
    InvalidVideoUrl(String),
}

impl From<ProviderError> for PipelineError {
    fn from(err: ProviderError) -> Self {
        match &err {
            ProviderError::Malformed { .. } => PipelineError::MalformedResponse(err.to_string()),
            ProviderError::InvalidVideoUrl(_) => PipelineError::InvalidInput(err.to_string()),
            _ => PipelineError::Acquisition(err.to_string()),
        }
    }
}
