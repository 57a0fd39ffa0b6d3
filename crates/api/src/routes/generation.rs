//! Route definitions for song generation.
//!
//! ```text
//! POST   /generate                 generate
//! POST   /generate/wait            generate_and_wait
//! POST   /generate/wait-upload     generate_wait_upload
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Generation routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generation::generate))
        .route("/generate/wait", post(generation::generate_and_wait))
        .route("/generate/wait-upload", post(generation::generate_wait_upload))
}
