//! POST /process -- run the pipeline for one submission, streaming
//! progress as Server-Sent Events.
//!
//! Submissions are validated before the entitlement gate runs, so an
//! unusable request never spends a pay-as-you-go credit. A denied
//! caller gets a plain 403 JSON response and no stream. Allowed runs
//! execute on a spawned task, so the run itself is not cancelled if
//! the client drops the stream early.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::{routing::post, Json, Router};
use lectern_core::Submission;
use lectern_pipeline::{DenyReason, GateDecision, PipelineEvent, ProgressSender};
use serde_json::json;

use crate::error::AppError;
use crate::identity::CallerIdentity;
use crate::state::AppState;

/// POST /process -- validate, gate, run, stream.
async fn process_lecture(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Json(mut submission): Json<Submission>,
) -> Response {
    if let Err(err) = submission.source() {
        return AppError::Core(err).into_response();
    }

    match state.gate.check(caller.user_id.as_deref()).await {
        GateDecision::Allow => {}
        GateDecision::Deny(reason) => {
            tracing::info!(user_id = ?caller.user_id, ?reason, "submission refused by gate");
            return deny_response(reason);
        }
    }

    submission.user_id = caller.user_id.clone();

    let (tx, mut rx) = ProgressSender::channel();
    let orchestrator = Arc::clone(&state.orchestrator);
    tokio::spawn(async move {
        orchestrator.process(submission, tx).await;
    });

    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            let terminal = matches!(
                event,
                PipelineEvent::Done(_) | PipelineEvent::Error(_)
            );
            match serde_json::to_string(&event) {
                Ok(json) => yield Ok::<_, Infallible>(Event::default().data(json)),
                Err(e) => tracing::warn!(error = %e, "failed to serialize progress event"),
            }
            if terminal {
                break;
            }
        }
    };

    Sse::new(stream)
        .keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(15))
                .text("heartbeat"),
        )
        .into_response()
}

/// 403 body for a gated-off caller, shaped for the frontend's paywall
/// prompts. Every denial carries `limitReached`; the credit-exhaustion
/// case additionally reports the zero balance.
fn deny_response(reason: DenyReason) -> Response {
    let body = match reason {
        DenyReason::UsageLimit => json!({
            "error": reason.message(),
            "limitReached": true,
        }),
        DenyReason::NoCredits => json!({
            "error": reason.message(),
            "limitReached": true,
            "creditsRemaining": 0,
        }),
    };
    (StatusCode::FORBIDDEN, Json(body)).into_response()
}

pub fn router() -> Router<AppState> {
    Router::new().route("/process", post(process_lecture))
}
