pub mod cover;
pub mod generation;
pub mod health;
pub mod task;

use axum::Router;

use crate::state::AppState;

/// Build the route tree.
///
/// Route hierarchy:
///
/// ```text
/// /generate                    launch (POST)
/// /generate/wait               launch + poll (POST)
/// /generate/wait-upload        launch + poll + re-host (POST)
///
/// /task/{jobId}                one-shot status read (GET)
///
/// /cover                       start cover (POST)
/// /cover/callback              provider notification (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(generation::router())
        .merge(task::router())
        .merge(cover::router())
}
