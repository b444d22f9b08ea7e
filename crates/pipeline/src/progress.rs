//! Progress reporting for pipeline runs.
//!
//! A run emits a stream of [`PipelineEvent`]s over a bounded channel:
//! zero or more progress updates followed by exactly one terminal
//! event, either `done` (with the full result payload) or `error`.
//! The wire shape matches what clients already consume:
//!
//! ```json
//! {"stage": "transcribe", "progress": 20, "message": "Transcribing audio..."}
//! {"stage": "done", "lectureId": "...", "title": "...", ...}
//! {"stage": "error", "error": "acquisition failed: ..."}
//! ```

use serde::Serialize;
use tokio::sync::mpsc;

use crate::orchestrator::RunOutcome;

/// Channel capacity for progress events. A run emits at most a dozen
/// events, so a slow consumer only ever buffers a handful.
const CHANNEL_CAPACITY: usize = 16;

/// Named pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Transcribe,
    Summarize,
    Quiz,
    Save,
    Complete,
}

/// A non-terminal progress update.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    pub stage: Stage,
    /// Percentage through the whole run, 0..=100. Never decreases
    /// within a run.
    pub progress: u8,
    pub message: String,
}

/// One event in a run's progress stream.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PipelineEvent {
    Progress(ProgressUpdate),
    Done(DoneEvent),
    Error(ErrorEvent),
}

/// Terminal success event, carrying the complete lecture payload.
#[derive(Debug, Clone, Serialize)]
pub struct DoneEvent {
    /// Always `"done"`.
    pub stage: &'static str,
    #[serde(flatten)]
    pub outcome: RunOutcome,
}

/// Terminal failure event.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent {
    /// Always `"error"`.
    pub stage: &'static str,
    pub error: String,
}

/// Sending half of a run's progress stream.
///
/// Sends never fail: if the receiver has gone away (client
/// disconnected), events are dropped and the run continues to
/// completion.
#[derive(Clone)]
pub struct ProgressSender {
    tx: mpsc::Sender<PipelineEvent>,
}

impl ProgressSender {
    /// Create a connected sender/receiver pair for one run.
    pub fn channel() -> (Self, mpsc::Receiver<PipelineEvent>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        (Self { tx }, rx)
    }

    async fn send(&self, event: PipelineEvent) {
        if self.tx.send(event).await.is_err() {
            tracing::debug!("progress receiver dropped, event discarded");
        }
    }

    /// Emit a progress update.
    pub async fn progress(&self, stage: Stage, progress: u8, message: impl Into<String>) {
        self.send(PipelineEvent::Progress(ProgressUpdate {
            stage,
            progress,
            message: message.into(),
        }))
        .await;
    }

    /// Emit the terminal success event.
    pub async fn done(&self, outcome: RunOutcome) {
        self.send(PipelineEvent::Done(DoneEvent {
            stage: "done",
            outcome,
        }))
        .await;
    }

    /// Emit the terminal failure event.
    pub async fn error(&self, message: impl Into<String>) {
        self.send(PipelineEvent::Error(ErrorEvent {
            stage: "error",
            error: message.into(),
        }))
        .await;
    }
}
