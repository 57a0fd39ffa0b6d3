use axum::{routing::get, Router};

use crate::handlers::health;
use crate::state::AppState;

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}
