use axum::routing::post;
use axum::Router;

use crate::handlers::cover;
use crate::state::AppState;

/// Cover routes.
///
/// ```text
/// POST /cover              start_cover
/// POST /cover/callback     receive_callback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cover", post(cover::start_cover))
        .route("/cover/callback", post(cover::receive_callback))
}
