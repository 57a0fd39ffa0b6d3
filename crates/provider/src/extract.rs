//! Lenient field extraction from untyped upstream JSON.
//!
//! Each getter takes a list of candidate paths and returns the first value
//! that is present with a usable type. Nothing here panics or errors.

use serde_json::Value;
use songbridge_core::types::ResultRecord;

/// Walk `path` through nested objects.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| current.get(*key))
}

/// First non-empty string among `paths`. Numbers are stringified so numeric
/// ids survive.
pub fn string_at(value: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| match lookup(value, path)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First boolean among `paths`. Strings are not coerced.
pub fn bool_at(value: &Value, paths: &[&[&str]]) -> Option<bool> {
    paths
        .iter()
        .find_map(|path| lookup(value, path).and_then(Value::as_bool))
}

/// First non-negative integer among `paths`; accepts numeric strings.
pub fn u64_at(value: &Value, paths: &[&[&str]]) -> Option<u64> {
    paths.iter().find_map(|path| match lookup(value, path)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// First integer among `paths`; accepts numeric strings.
pub fn i64_at(value: &Value, paths: &[&[&str]]) -> Option<i64> {
    paths.iter().find_map(|path| match lookup(value, path)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// First finite number among `paths`; accepts numeric strings.
pub fn f64_at(value: &Value, paths: &[&[&str]]) -> Option<f64> {
    paths
        .iter()
        .find_map(|path| match lookup(value, path)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
        .filter(|f: &f64| f.is_finite())
}

/// Decode one result item. Items without an audio URL are unusable.
pub fn record_from(item: &Value) -> Option<ResultRecord> {
    let audio_url = string_at(item, &[&["audioUrl"], &["audio_url"], &["sourceAudioUrl"]])?;
    Some(ResultRecord {
        id: string_at(item, &[&["id"], &["audioId"], &["audio_id"]]),
        audio_url,
        image_url: string_at(item, &[&["imageUrl"], &["image_url"]]),
        title: string_at(item, &[&["title"]]),
        duration_seconds: f64_at(item, &[&["durationSeconds"], &["duration"]]),
    })
}

/// Decode every usable item of the array at `path`, keeping order.
pub fn records_in(value: &Value, path: &[&str]) -> Option<Vec<ResultRecord>> {
    let items = lookup(value, path)?.as_array()?;
    Some(items.iter().filter_map(record_from).collect())
}

/// Result records of a job status body.
///
/// Tries the known layouts in order and uses the first array found.
pub fn job_records(body: &Value) -> Vec<ResultRecord> {
    const CANDIDATES: &[&[&str]] = &[
        &["records"],
        &["data", "records"],
        &["data", "response", "sunoData"],
        &["data", "data"],
        &["data"],
    ];
    CANDIDATES
        .iter()
        .find_map(|path| records_in(body, path))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn lookup_walks_nested_objects() {
        let v = json!({ "data": { "taskId": "abc" } });
        assert_eq!(lookup(&v, &["data", "taskId"]), Some(&json!("abc")));
        assert_eq!(lookup(&v, &["data", "missing"]), None);
        assert_eq!(lookup(&json!("scalar"), &["data"]), None);
    }

    #[test]
    fn string_at_skips_blank_and_wrong_types() {
        let v = json!({ "a": "", "b": true, "c": 42, "d": " ok " });
        assert_eq!(string_at(&v, &[&["a"], &["b"], &["c"]]), Some("42".into()));
        assert_eq!(string_at(&v, &[&["a"], &["d"]]), Some("ok".into()));
        assert_eq!(string_at(&v, &[&["zzz"]]), None);
    }

    #[test]
    fn numeric_getters_accept_numeric_strings() {
        let v = json!({ "size": "1024", "neg": -3, "dur": "12.5", "code": "200" });
        assert_eq!(u64_at(&v, &[&["size"]]), Some(1024));
        assert_eq!(u64_at(&v, &[&["neg"]]), None);
        assert_eq!(f64_at(&v, &[&["dur"]]), Some(12.5));
        assert_eq!(i64_at(&v, &[&["code"]]), Some(200));
    }

    #[test]
    fn bool_at_does_not_coerce_strings() {
        let v = json!({ "success": "true", "ok": true });
        assert_eq!(bool_at(&v, &[&["success"]]), None);
        assert_eq!(bool_at(&v, &[&["success"], &["ok"]]), Some(true));
    }

    #[test]
    fn records_accept_both_naming_styles() {
        let body = json!({
            "records": [
                { "id": "r1", "audioUrl": "https://x/1.mp3", "duration": 61.2 },
                { "id": "r2", "audio_url": "https://x/2.mp3", "image_url": "https://x/2.png" },
                { "id": "r3", "title": "no audio" },
                "garbage",
            ]
        });
        let records = job_records(&body);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].audio_url, "https://x/1.mp3");
        assert_eq!(records[0].duration_seconds, Some(61.2));
        assert_eq!(records[1].image_url.as_deref(), Some("https://x/2.png"));
    }

    #[test]
    fn records_found_in_nested_layouts() {
        let body = json!({
            "data": { "response": { "sunoData": [{ "audioUrl": "https://x/a.mp3" }] } }
        });
        assert_eq!(job_records(&body).len(), 1);
        assert!(job_records(&json!({ "status": "pending" })).is_empty());
    }
}
