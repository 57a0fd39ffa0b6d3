//! Response normalizer middleware.
//!
//! Rewrites every JSON response body through
//! [`songbridge_core::attribution::normalize`], for handler successes and
//! errors alike. Non-JSON responses pass through untouched.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use songbridge_core::attribution::normalize;

use crate::error::AppError;
use crate::state::AppState;

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

pub async fn attribute_response(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !is_json(response.headers()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            return AppError::InternalError(format!("Failed to buffer response body: {err}"))
                .into_response();
        }
    };

    let payload = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        // Labelled JSON but not parseable; leave it alone.
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    let normalized = normalize(payload, &state.config.attribution_tag);
    match serde_json::to_vec(&normalized) {
        Ok(encoded) => {
            parts.headers.remove(CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(encoded))
        }
        Err(err) => {
            AppError::InternalError(format!("Failed to encode response body: {err}")).into_response()
        }
    }
}
