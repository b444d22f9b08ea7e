pub mod health;
pub mod lectures;
pub mod process;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /process                 POST  run the pipeline, stream progress (SSE)
///
/// /lectures                GET   list the caller's lectures
/// /lectures/{id}           GET   fetch one lecture
/// /lectures/{id}/export    GET   download as markdown or plain text
///
/// /shared/{slug}           GET   fetch a shared lecture (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(process::router())
        .merge(lectures::router())
}
