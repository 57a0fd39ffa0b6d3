//! Helpers for re-hosting generated audio on the file host.

/// Fixed upload directory for audio re-hosted from cover callbacks.
pub const COVER_UPLOAD_PATH: &str = "suno-covers";

/// Convert a byte count to megabytes rounded to two decimals.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 / 1024.0 * 100.0).round() / 100.0
}

/// File name for record `index` (0-based) of a batch of `total` records.
///
/// A single-record batch keeps the requested name. Larger batches get a
/// 1-based `-{n}` suffix before the extension so uploads never collide.
pub fn batch_file_name(requested: Option<&str>, index: usize, total: usize) -> Option<String> {
    let name = requested.map(str::trim).filter(|n| !n.is_empty())?;
    if total <= 1 {
        return Some(name.to_string());
    }
    let n = index + 1;
    Some(match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}-{n}.{ext}"),
        _ => format!("{name}-{n}"),
    })
}

/// File name for the first item of a completed cover callback.
pub fn cover_file_name(task_id: &str, item_id: &str) -> String {
    format!("{task_id}-{item_id}.mp3")
}
