//! Submission: the input to one pipeline run.

use serde::Deserialize;

use crate::error::CoreError;

/// One caller request to process a piece of content into a lecture.
///
/// Exactly one of `file_url`, `youtube_url`, `raw_text` must be set;
/// [`Submission::source`] enforces the invariant. Constructed at request
/// receipt, consumed once by the orchestrator, never persisted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub file_url: Option<String>,
    pub youtube_url: Option<String>,
    pub raw_text: Option<String>,
    pub filename: Option<String>,
    pub course_name: Option<String>,
    pub professor_name: Option<String>,
    /// Caller identity; `None` means anonymous.
    #[serde(skip)]
    pub user_id: Option<String>,
}

/// The single content source selected from a [`Submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A media file to fetch and transcribe.
    File { url: String },
    /// A video whose caption track should be fetched.
    YouTube { url: String },
    /// Pasted text, segmented locally with synthetic timestamps.
    Paste { text: String },
}

impl Submission {
    /// Select the content source, rejecting submissions with zero or
    /// more than one source set, and pasted text that is empty after
    /// trimming.
    ///
    /// Multi-source submissions are rejected outright rather than given
    /// a silent precedence; see DESIGN.md.
    pub fn source(&self) -> Result<ContentSource, CoreError> {
        let set = [
            self.raw_text.as_deref().map(|_| "rawText"),
            self.youtube_url.as_deref().map(|_| "youtubeUrl"),
            self.file_url.as_deref().map(|_| "fileUrl"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        match set.as_slice() {
            [] => Err(CoreError::Validation(
                "One of fileUrl, youtubeUrl or rawText is required".into(),
            )),
            [_] => Ok(if let Some(text) = &self.raw_text {
                if text.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "rawText contains no usable text".into(),
                    ));
                }
                ContentSource::Paste { text: text.clone() }
            } else if let Some(url) = &self.youtube_url {
                ContentSource::YouTube { url: url.clone() }
            } else {
                ContentSource::File {
                    url: self.file_url.clone().unwrap_or_default(),
                }
            }),
            multiple => Err(CoreError::Validation(format!(
                "Exactly one content source must be set, got {}",
                multiple.join(" and "),
            ))),
        }
    }

    /// The user id recorded on the persisted lecture; `"anonymous"`
    /// when the caller is unauthenticated.
    pub fn owner(&self) -> &str {
        self.user_id.as_deref().unwrap_or("anonymous")
    }

    /// The originating URL recorded on the lecture, or the
    /// `"pasted-text"` sentinel for pasted submissions.
    pub fn origin_url(&self) -> &str {
        self.file_url
            .as_deref()
            .or(self.youtube_url.as_deref())
            .unwrap_or(crate::lecture::PASTED_TEXT_SENTINEL)
    }
}
