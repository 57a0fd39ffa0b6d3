//! `OPTIONS` requests always answer 204 No Content.
//!
//! The CORS layer answers preflights with 200 and any other `OPTIONS` request
//! falls through to the router's 405. Both are rewritten to 204; the CORS
//! headers already on the response are kept.

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

pub async fn options_no_content(request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    let mut response = next.run(request).await;
    if matches!(
        response.status(),
        StatusCode::OK | StatusCode::METHOD_NOT_ALLOWED
    ) {
        *response.status_mut() = StatusCode::NO_CONTENT;
        *response.body_mut() = axum::body::Body::empty();
    }
    response
}
