//! Handlers for audio covers.
//!
//! Routes:
//! - `POST /cover`          -- start a cover job (fire-and-forget)
//! - `POST /cover/callback` -- provider notification; re-hosts the first item
//!   of a completed job

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use songbridge_core::error::CoreError;
use songbridge_core::rehost::{cover_file_name, COVER_UPLOAD_PATH};
use songbridge_core::types::{CoverInput, ResultRecord};
use songbridge_core::validation::validate_cover;
use songbridge_provider::callback::CoverCallback;
use songbridge_provider::UploadOutcome;

use crate::error::{AppError, AppResult};
use crate::extract::ApiJson;
use crate::state::AppState;

/// POST /cover
///
/// Validates the parameters and asks the provider to start a cover of
/// `uploadUrl`. The acknowledgment is returned unchanged; the result arrives
/// later on `/cover/callback` when `CALLBACK_BASE_URL` is configured.
pub async fn start_cover(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CoverInput>,
) -> AppResult<impl IntoResponse> {
    let request = validate_cover(&input).map_err(CoreError::Validation)?;
    let music = state.music_api()?;
    let callback_url = state.config.provider.cover_callback_url();
    if callback_url.is_none() {
        tracing::warn!("CALLBACK_BASE_URL is not set; cover results will not be re-hosted");
    }

    let ack = music.start_cover(&request, callback_url.as_deref()).await?;
    Ok(Json(ack))
}

/// POST /cover/callback
///
/// Always acknowledges with 200 unless the envelope itself is malformed.
/// Upload failures and missing file host credentials are reported inline
/// under `upload`.
pub async fn receive_callback(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> AppResult<impl IntoResponse> {
    let callback = CoverCallback::parse(&body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::info!(
        code = callback.code,
        callback_type = ?callback.callback_type,
        task_id = ?callback.task_id,
        items = callback.item_count,
        "Cover callback received",
    );

    let mut ack = json!({
        "ok": true,
        "received": true,
        "code": callback.code,
        "callbackType": callback.callback_type,
        "taskId": callback.task_id,
        "callback": body,
    });

    if callback.is_actionable() {
        let upload = match callback.first_item() {
            Some(item) => rehost_cover_item(&state, callback.task_id.as_deref(), item).await,
            None => {
                tracing::warn!(
                    task_id = ?callback.task_id,
                    item_id = ?callback.first_id,
                    "First cover item has no audio URL; nothing re-hosted",
                );
                json!({
                    "index": 0,
                    "ok": false,
                    "id": callback.first_id,
                    "error": "First callback item has no audio URL",
                })
            }
        };
        if let Value::Object(fields) = &mut ack {
            fields.insert("upload".into(), upload);
        }
    }

    Ok(Json(ack))
}

/// Re-host one cover item and describe the outcome as JSON.
async fn rehost_cover_item(state: &AppState, task_id: Option<&str>, item: &ResultRecord) -> Value {
    let file_host = match state.file_host() {
        Ok(file_host) => file_host,
        Err(err) => {
            tracing::error!(error = %err, "Cannot re-host cover item");
            return json!({
                "ok": false,
                "error": err.to_string(),
                "code": "CONFIGURATION_ERROR",
            });
        }
    };

    let file_name = cover_file_name(
        task_id.unwrap_or("cover"),
        item.id.as_deref().unwrap_or("0"),
    );
    let outcome = match file_host
        .upload(&item.audio_url, COVER_UPLOAD_PATH, Some(&file_name))
        .await
    {
        Ok(result) => {
            tracing::info!(
                upload_path = COVER_UPLOAD_PATH,
                file_name = %file_name,
                download_url = %result.download_url,
                "Cover item re-hosted",
            );
            UploadOutcome::Uploaded(result)
        }
        Err(error) => {
            tracing::warn!(upload_path = COVER_UPLOAD_PATH, error = %error, "Cover item upload failed");
            UploadOutcome::Failed {
                source_audio_url: item.audio_url.clone(),
                error,
            }
        }
    };
    outcome.to_json(0)
}
