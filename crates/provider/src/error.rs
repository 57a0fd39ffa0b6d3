//! Upstream error type and the shared response helpers.

use serde_json::Value;

/// Errors from either upstream (music provider or file host).
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The upstream returned a non-2xx status, or an explicit failure flag.
    #[error("Upstream API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for diagnostics.
        body: String,
    },

    /// A 2xx response whose body could not be used.
    #[error("Malformed upstream response ({status}): {reason}")]
    Malformed {
        status: u16,
        body: String,
        reason: String,
    },
}

impl UpstreamError {
    /// HTTP status reported by the upstream, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Request(err) => err.status().map(|s| s.as_u16()),
            UpstreamError::Status { status, .. } | UpstreamError::Malformed { status, .. } => {
                Some(*status)
            }
        }
    }

    /// Raw upstream body, when a response was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            UpstreamError::Request(_) => None,
            UpstreamError::Status { body, .. } | UpstreamError::Malformed { body, .. } => {
                Some(body.as_str())
            }
        }
    }

    /// Upstream body as JSON when it parses, otherwise as a string.
    pub fn body_json(&self) -> Value {
        match self.body() {
            None => Value::Null,
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.into())),
        }
    }
}

/// Status code and decoded JSON body of a successful upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamBody {
    pub status: u16,
    pub json: Value,
}

impl UpstreamBody {
    /// Build a [`UpstreamError::Malformed`] from this body.
    pub fn malformed(&self, reason: impl Into<String>) -> UpstreamError {
        UpstreamError::Malformed {
            status: self.status,
            body: self.json.to_string(),
            reason: reason.into(),
        }
    }
}

/// Ensure the response has a success status code and decode its JSON body.
///
/// Non-2xx yields [`UpstreamError::Status`] with the body text; a 2xx body
/// that is not JSON yields [`UpstreamError::Malformed`].
pub(crate) async fn read_json(response: reqwest::Response) -> Result<UpstreamBody, UpstreamError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let body = response.text().await?;
    match serde_json::from_str(&body) {
        Ok(json) => Ok(UpstreamBody {
            status: status.as_u16(),
            json,
        }),
        Err(e) => Err(UpstreamError::Malformed {
            status: status.as_u16(),
            body,
            reason: format!("invalid JSON: {e}"),
        }),
    }
}
