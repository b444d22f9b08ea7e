//! Lecture history, shared lookup, and export routes.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Json, Router};
use lectern_core::export::{format_lecture_markdown, format_lecture_text, ExportFormat};
use lectern_core::{CoreError, Lecture};
use lectern_db::models::lecture::LectureRow;
use lectern_db::repositories::LectureRepo;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::identity::CallerIdentity;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub format: Option<String>,
}

/// Decode a stored row into the domain aggregate, treating JSONB that
/// no longer deserializes as an internal error.
fn decode(row: LectureRow) -> Result<Lecture, AppError> {
    row.into_lecture()
        .map_err(|e| AppError::InternalError(format!("stored lecture did not deserialize: {e}")))
}

/// Load a lecture by id, scoped to the caller. Rows owned by someone
/// else read as absent, so the response does not leak their existence.
async fn load_owned(
    state: &AppState,
    caller: &CallerIdentity,
    id: Uuid,
) -> Result<LectureRow, AppError> {
    LectureRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|row| row.user_id == caller.owner())
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "lecture",
                id: id.to_string(),
            }
            .into()
        })
}

/// GET /lectures -- the caller's lecture history, newest first.
async fn list_lectures(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Vec<Lecture>>>> {
    let rows =
        LectureRepo::list_by_user(&state.pool, caller.owner(), params.limit, params.offset)
            .await?;
    let lectures = rows.into_iter().map(decode).collect::<Result<Vec<_>, _>>()?;
    Ok(Json(DataResponse { data: lectures }))
}

/// GET /lectures/{id} -- one lecture, caller-scoped.
async fn get_lecture(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<Lecture>>> {
    let row = load_owned(&state, &caller, id).await?;
    Ok(Json(DataResponse { data: decode(row)? }))
}

/// GET /lectures/{id}/export?format=markdown|text -- download the
/// lecture as a study sheet.
async fn export_lecture(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<Uuid>,
    Query(params): Query<ExportParams>,
) -> AppResult<Response> {
    let format = params.format.as_deref().unwrap_or("markdown");
    let format = ExportFormat::parse(format)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown export format: {format}")))?;

    let lecture = decode(load_owned(&state, &caller, id).await?)?;
    let body = match format {
        ExportFormat::Markdown => format_lecture_markdown(&lecture),
        ExportFormat::Text => format_lecture_text(&lecture),
    };

    let disposition = format!(
        "attachment; filename=\"lecture-{}.{}\"",
        lecture.id,
        format.extension()
    );
    Ok((
        [
            (CONTENT_TYPE, format.content_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// GET /shared/{slug} -- public lookup of a shared lecture. No
/// ownership check: the slug is the capability.
async fn get_shared_lecture(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<DataResponse<Lecture>>> {
    let row = LectureRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "shared lecture",
            id: slug,
        })?;
    Ok(Json(DataResponse { data: decode(row)? }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lectures", get(list_lectures))
        .route("/lectures/{id}", get(get_lecture))
        .route("/lectures/{id}/export", get(export_lecture))
        .route("/shared/{slug}", get(get_shared_lecture))
}
