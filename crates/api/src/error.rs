use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{json, Map, Value};
use songbridge_core::error::CoreError;
use songbridge_provider::{PollError, PollTimeout, UpstreamError};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`UpstreamError`] for failures of
/// either upstream, and adds HTTP-specific variants. Implements
/// [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `songbridge_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The music provider or file host failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The poll budget ran out before the job finished.
    #[error("Timed out waiting for job {}", .0.job_id)]
    Timeout(Box<PollTimeout>),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<PollError> for AppError {
    fn from(err: PollError) -> Self {
        match err {
            PollError::Upstream(upstream) => AppError::Upstream(upstream),
            PollError::TimedOut(timeout) => AppError::Timeout(timeout),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut extra = Map::new();

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(violations) => {
                    extra.insert("violations".into(), json!(violations));
                    (
                        StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        core.to_string(),
                    )
                }
                CoreError::Configuration(msg) => {
                    tracing::error!(error = %msg, "Missing configuration");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIGURATION_ERROR",
                        msg.clone(),
                    )
                }
            },

            // --- Upstream failures ---
            AppError::Upstream(err) => {
                tracing::warn!(error = %err, upstream_status = ?err.status(), "Upstream request failed");
                extra.insert("upstreamStatus".into(), json!(err.status()));
                extra.insert("upstreamBody".into(), err.body_json());
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
            }

            AppError::Timeout(timeout) => {
                extra.insert("jobId".into(), json!(timeout.job_id));
                extra.insert("statusUrl".into(), json!(timeout.status_url));
                extra.insert(
                    "lastStatus".into(),
                    timeout.last_status.clone().unwrap_or(Value::Null),
                );
                extra.insert("polls".into(), json!(timeout.polls));
                extra.insert(
                    "elapsedMs".into(),
                    json!(timeout.elapsed.as_millis() as u64),
                );
                (StatusCode::REQUEST_TIMEOUT, "TIMEOUT", self.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let mut body = Map::new();
        body.insert("ok".into(), Value::Bool(false));
        body.insert("error".into(), Value::String(message));
        body.insert("code".into(), Value::String(code.into()));
        body.extend(extra);

        (status, axum::Json(Value::Object(body))).into_response()
    }
}
