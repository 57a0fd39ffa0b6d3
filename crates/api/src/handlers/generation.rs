//! Handlers for song generation.
//!
//! Routes:
//! - `POST /generate`             -- launch a job and return its handle
//! - `POST /generate/wait`        -- launch and poll until done
//! - `POST /generate/wait-upload` -- launch, poll, then re-host every record

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use songbridge_core::error::CoreError;
use songbridge_core::types::{GenerationInput, JobHandle, UploadInput};
use songbridge_core::validation::{validate_generation, validate_upload};
use songbridge_provider::{poll_until_done, PolledJob, UploadOutcome};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiQuery};
use crate::query::PollParams;
use crate::state::AppState;

/// POST /generate
///
/// Validates the parameters and submits one job. Does not wait.
pub async fn generate(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<GenerationInput>,
) -> AppResult<impl IntoResponse> {
    let request = validate_generation(&input).map_err(CoreError::Validation)?;
    let music = state.music_api()?;

    let job = music.launch(&request).await?;

    Ok(Json(json!({
        "ok": true,
        "jobId": job.job_id,
        "statusUrl": job.status_url,
    })))
}

/// POST /generate/wait?timeoutMs=&pollIntervalMs=
///
/// Submits one job and polls it inside this request until it is done, the
/// upstream fails, or the budget runs out (408 with resume details).
pub async fn generate_and_wait(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PollParams>,
    ApiJson(input): ApiJson<GenerationInput>,
) -> AppResult<impl IntoResponse> {
    let request = validate_generation(&input).map_err(CoreError::Validation)?;
    let music = state.music_api()?;
    let settings = params.settings();

    let job = music.launch(&request).await?;
    tracing::info!(
        job_id = %job.job_id,
        timeout_ms = settings.timeout.as_millis() as u64,
        interval_ms = settings.interval.as_millis() as u64,
        "Waiting for generation job",
    );
    let polled = poll_until_done(&music, &job, settings).await?;

    Ok(Json(completed_body(&job, &polled)))
}

/// POST /generate/wait-upload?timeoutMs=&pollIntervalMs=
///
/// Like [`generate_and_wait`], then re-hosts every result record under
/// `kieUploadPath`. A failed upload is reported per record and never fails
/// the request.
pub async fn generate_wait_upload(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PollParams>,
    ApiJson(input): ApiJson<UploadInput>,
) -> AppResult<impl IntoResponse> {
    let (request, target) = validate_upload(&input).map_err(CoreError::Validation)?;
    // Both credentials are resolved before any upstream call.
    let music = state.music_api()?;
    let file_host = state.file_host()?;
    let settings = params.settings();

    let job = music.launch(&request).await?;
    let polled = poll_until_done(&music, &job, settings).await?;

    let outcomes = file_host
        .upload_all(
            &polled.status.records,
            &target.upload_path,
            target.file_name.as_deref(),
        )
        .await;
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    tracing::info!(
        job_id = %job.job_id,
        upload_path = %target.upload_path,
        uploaded = outcomes.len() - failed,
        failed,
        "Job records re-hosted",
    );

    let mut body = completed_body(&job, &polled);
    if let Value::Object(fields) = &mut body {
        fields.insert("uploads".into(), uploads_json(&outcomes));
    }
    Ok(Json(body))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Success body shared by both waiting flows.
fn completed_body(job: &JobHandle, polled: &PolledJob) -> Value {
    json!({
        "ok": true,
        "jobId": job.job_id,
        "statusUrl": job.status_url,
        "status": polled.status.state.as_str(),
        "records": polled.status.records,
        "polls": polled.polls,
        "elapsedMs": polled.elapsed.as_millis() as u64,
        "result": polled.status.body,
    })
}

fn uploads_json(outcomes: &[UploadOutcome]) -> Value {
    Value::Array(
        outcomes
            .iter()
            .enumerate()
            .map(|(index, outcome)| outcome.to_json(index))
            .collect(),
    )
}
