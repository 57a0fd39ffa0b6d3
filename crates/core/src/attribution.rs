//! Outbound response normalization.
//!
//! Upstream bodies carry their own `creator` attribution. Every response this
//! service emits drops that key and leads with its own `poweredBy` tag.

use serde_json::{Map, Value};

/// Key injected as the first field of every response object.
pub const ATTRIBUTION_KEY: &str = "poweredBy";
/// Upstream attribution key that is always removed.
pub const UPSTREAM_CREATOR_KEY: &str = "creator";

/// Strip the upstream `creator` key and prepend the attribution tag.
///
/// Non-object payloads are wrapped as `{ poweredBy, data }`. Only the top
/// level is rewritten; nested upstream bodies are passed through untouched.
pub fn normalize(payload: Value, tag: &str) -> Value {
    let mut out = Map::new();
    out.insert(ATTRIBUTION_KEY.to_string(), Value::String(tag.to_string()));

    match payload {
        Value::Object(fields) => {
            for (key, value) in fields {
                if key == UPSTREAM_CREATOR_KEY || key == ATTRIBUTION_KEY {
                    continue;
                }
                out.insert(key, value);
            }
        }
        other => {
            out.insert("data".to_string(), other);
        }
    }

    Value::Object(out)
}
