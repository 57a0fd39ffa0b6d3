//! Poll budget and cadence clamping.
//!
//! Both values arrive as raw query strings. Bad input never produces an
//! error: non-numeric or non-positive values use the default, and positive
//! values are clamped into range.

use std::time::Duration;

/// Default total polling budget.
pub const DEFAULT_TIMEOUT_MS: u64 = 300_000;
/// Hard ceiling on the polling budget.
pub const MAX_TIMEOUT_MS: u64 = 900_000;

/// Default delay between polls.
pub const DEFAULT_INTERVAL_MS: u64 = 5_000;
pub const MIN_INTERVAL_MS: u64 = 1_000;
pub const MAX_INTERVAL_MS: u64 = 30_000;

/// Effective budget and cadence for one poll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
        }
    }
}

impl PollSettings {
    /// Build settings from raw `timeoutMs` / `pollIntervalMs` values.
    pub fn from_raw(timeout_ms: Option<&str>, interval_ms: Option<&str>) -> Self {
        Self {
            timeout: Duration::from_millis(clamp_timeout_ms(timeout_ms)),
            interval: Duration::from_millis(clamp_interval_ms(interval_ms)),
        }
    }
}

/// Parse a raw millisecond value. Returns `None` for anything that is not a
/// finite positive number. Fractions are truncated.
fn parse_positive_ms(raw: Option<&str>) -> Option<u64> {
    let value: f64 = raw?.trim().parse().ok()?;
    if !value.is_finite() || value < 1.0 {
        return None;
    }
    Some(if value >= u64::MAX as f64 {
        u64::MAX
    } else {
        value as u64
    })
}

pub fn clamp_timeout_ms(raw: Option<&str>) -> u64 {
    parse_positive_ms(raw)
        .map(|ms| ms.min(MAX_TIMEOUT_MS))
        .unwrap_or(DEFAULT_TIMEOUT_MS)
}

pub fn clamp_interval_ms(raw: Option<&str>) -> u64 {
    parse_positive_ms(raw)
        .map(|ms| ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS))
        .unwrap_or(DEFAULT_INTERVAL_MS)
}
