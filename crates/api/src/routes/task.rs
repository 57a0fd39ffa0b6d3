use axum::routing::get;
use axum::Router;

use crate::handlers::task;
use crate::state::AppState;

/// Status read route.
///
/// ```text
/// GET /task/{jobId}
/// GET /task            (400, no job id)
/// GET /task/           (400, no job id)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/task/{job_id}", get(task::get_task))
        .route("/task", get(task::missing_job_id))
        .route("/task/", get(task::missing_job_id))
}
