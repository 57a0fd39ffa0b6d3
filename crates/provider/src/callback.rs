//! Decoding of asynchronous cover notifications.
//!
//! The provider posts `{ code, msg, data: { callbackType, task_id, data: [..] } }`
//! several times per job (`text`, `first`, `complete`). Only a successful
//! `complete` with at least one item is actionable.

use serde_json::Value;
use songbridge_core::types::ResultRecord;

use crate::extract;

pub const CALLBACK_COMPLETE: &str = "complete";

/// Decoded cover callback envelope.
#[derive(Debug, Clone)]
pub struct CoverCallback {
    pub code: i64,
    pub msg: Option<String>,
    pub callback_type: Option<String>,
    pub task_id: Option<String>,
    /// Number of entries in the item array, decodable or not.
    pub item_count: usize,
    /// Decoded first entry. `None` when there is no entry or when the first
    /// entry carries no audio URL; later entries never stand in for it.
    pub first: Option<ResultRecord>,
    /// `id` of the first entry, kept even when it has no audio URL.
    pub first_id: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CallbackError {
    #[error("callback body must be a JSON object")]
    NotAnObject,

    #[error("callback body must carry an integer code")]
    MissingCode,
}

impl CoverCallback {
    /// Decode an envelope. Only a non-object body or a missing integer code is
    /// fatal; every other field is optional.
    pub fn parse(body: &Value) -> Result<Self, CallbackError> {
        if !body.is_object() {
            return Err(CallbackError::NotAnObject);
        }
        let code = extract::i64_at(body, &[&["code"]]).ok_or(CallbackError::MissingCode)?;
        let items: &[Value] = extract::lookup(body, &["data", "data"])
            .and_then(Value::as_array)
            .or_else(|| extract::lookup(body, &["data"]).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(Self {
            code,
            msg: extract::string_at(body, &[&["msg"]]),
            callback_type: extract::string_at(
                body,
                &[&["data", "callbackType"], &["data", "callback_type"], &["callbackType"]],
            ),
            task_id: extract::string_at(
                body,
                &[
                    &["data", "taskId"],
                    &["data", "task_id"],
                    &["taskId"],
                    &["task_id"],
                ],
            ),
            item_count: items.len(),
            first: items.first().and_then(extract::record_from),
            first_id: items
                .first()
                .and_then(|item| extract::string_at(item, &[&["id"], &["audioId"], &["audio_id"]])),
        })
    }

    /// Whether this notification should trigger re-hosting.
    pub fn is_actionable(&self) -> bool {
        self.code == 200
            && self.callback_type.as_deref() == Some(CALLBACK_COMPLETE)
            && self.item_count > 0
    }

    /// The only item that is ever re-hosted.
    pub fn first_item(&self) -> Option<&ResultRecord> {
        self.first.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn complete_envelope_is_actionable() {
        let cb = CoverCallback::parse(&json!({
            "code": 200,
            "msg": "All generated successfully.",
            "data": {
                "callbackType": "complete",
                "task_id": "task9",
                "data": [
                    { "id": "t1", "audio_url": "https://x/a.mp3" },
                    { "id": "t2", "audio_url": "https://x/b.mp3" },
                ],
            },
        }))
        .unwrap();
        assert!(cb.is_actionable());
        assert_eq!(cb.task_id.as_deref(), Some("task9"));
        assert_eq!(cb.first_item().unwrap().audio_url, "https://x/a.mp3");
    }

    #[test]
    fn text_callback_is_not_actionable() {
        let cb = CoverCallback::parse(&json!({
            "code": 200,
            "data": { "callbackType": "text", "task_id": "t", "data": [{ "audio_url": "https://x/a.mp3" }] },
        }))
        .unwrap();
        assert!(!cb.is_actionable());
    }

    #[test]
    fn failure_code_or_empty_items_is_not_actionable() {
        let failed = CoverCallback::parse(&json!({
            "code": 501,
            "data": { "callbackType": "complete", "data": [{ "audio_url": "https://x/a.mp3" }] },
        }))
        .unwrap();
        assert!(!failed.is_actionable());

        let empty = CoverCallback::parse(&json!({
            "code": 200,
            "data": { "callbackType": "complete", "data": [] },
        }))
        .unwrap();
        assert!(!empty.is_actionable());
    }

    #[test]
    fn malformed_envelopes_are_rejected() {
        assert_eq!(CoverCallback::parse(&json!([1])).unwrap_err(), CallbackError::NotAnObject);
        assert_eq!(
            CoverCallback::parse(&json!({ "msg": "hi" })).unwrap_err(),
            CallbackError::MissingCode
        );
        assert_eq!(
            CoverCallback::parse(&json!({ "code": "abc" })).unwrap_err(),
            CallbackError::MissingCode
        );
    }

    #[test]
    fn string_code_is_accepted() {
        let cb = CoverCallback::parse(&json!({ "code": "200" })).unwrap();
        assert_eq!(cb.code, 200);
        assert_eq!(cb.item_count, 0);
        assert!(cb.first_item().is_none());
    }

    #[test]
    fn first_entry_without_audio_is_not_replaced_by_a_later_one() {
        let cb = CoverCallback::parse(&json!({
            "code": 200,
            "data": {
                "callbackType": "complete",
                "task_id": "task9",
                "data": [
                    { "id": "t1" },
                    { "id": "t2", "audio_url": "https://x/b.mp3" },
                ],
            },
        }))
        .unwrap();
        assert!(cb.is_actionable());
        assert_eq!(cb.item_count, 2);
        assert_eq!(cb.first_id.as_deref(), Some("t1"));
        assert!(cb.first_item().is_none());
    }
}
