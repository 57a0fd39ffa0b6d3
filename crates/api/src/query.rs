//! Shared query parameter types for API handlers.

use serde::Deserialize;
use songbridge_core::polling::PollSettings;

/// Poll budget and cadence (`?timeoutMs=&pollIntervalMs=`).
///
/// Kept as raw strings: out-of-range or non-numeric values fall back to the
/// defaults in [`PollSettings::from_raw`] instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PollParams {
    #[serde(rename = "timeoutMs")]
    pub timeout_ms: Option<String>,
    #[serde(rename = "pollIntervalMs")]
    pub poll_interval_ms: Option<String>,
}

impl PollParams {
    pub fn settings(&self) -> PollSettings {
        PollSettings::from_raw(self.timeout_ms.as_deref(), self.poll_interval_ms.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn missing_params_use_defaults() {
        assert_eq!(PollParams::default().settings(), PollSettings::default());
    }

    #[test]
    fn raw_values_are_clamped() {
        let params = PollParams {
            timeout_ms: Some("999999999".into()),
            poll_interval_ms: Some("abc".into()),
        };
        let settings = params.settings();
        assert_eq!(settings.timeout, Duration::from_millis(900_000));
        assert_eq!(settings.interval, Duration::from_millis(5_000));
    }
}
