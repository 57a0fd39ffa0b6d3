//! One-shot job status read.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /task/{jobId}
///
/// Returns the upstream status body as-is. This is how a caller resumes
/// after a 408 from one of the waiting flows.
pub async fn get_task(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let job_id = job_id.trim();
    if job_id.is_empty() {
        return Err(empty_job_id());
    }
    let music = state.music_api()?;

    let body = music.task_status(job_id).await?;
    tracing::debug!(job_id, "Fetched task status");
    Ok(Json(body))
}

/// GET /task and GET /task/
///
/// The path segment is missing entirely, which is the same client error as
/// a blank one.
pub async fn missing_job_id() -> AppResult<Json<serde_json::Value>> {
    Err(empty_job_id())
}

fn empty_job_id() -> AppError {
    AppError::BadRequest("jobId must not be empty".into())
}
