//! REST client for the music provider.
//!
//! Wraps job creation, the one-shot status read and cover start using
//! [`reqwest`]. The credential is sent as a Bearer token on every call.

use async_trait::async_trait;
use serde_json::{json, Value};
use songbridge_core::types::{CoverRequest, GenerationRequest, JobHandle};
use url::Url;

use crate::error::{read_json, UpstreamError};
use crate::extract;
use crate::poll::StatusSource;

/// HTTP client for the music provider.
#[derive(Clone)]
pub struct MusicApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl MusicApi {
    /// Create a client reusing an existing [`reqwest::Client`] (connection
    /// pooling across requests).
    ///
    /// * `base_url` - provider base, e.g. `https://api.kie.ai/api/v1`.
    pub fn new(client: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Body sent to the job-creation endpoint.
    ///
    /// Simple mode must carry only `customMode` and `prompt`; the provider
    /// rejects blank custom fields.
    pub fn launch_payload(request: &GenerationRequest) -> Value {
        if request.custom_mode {
            json!({
                "customMode": true,
                "instrumental": request.instrumental,
                "title": request.title,
                "style": request.style,
                "prompt": request.prompt,
                "model": request.model,
                "negativeTags": request.negative_tags,
            })
        } else {
            json!({
                "customMode": false,
                "prompt": request.prompt,
            })
        }
    }

    /// Address of the status endpoint for `job_id`: `{base}/task/{job_id}`.
    pub fn status_url(&self, job_id: &str) -> String {
        match Url::parse(&self.base_url) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push("task").push(job_id);
                }
                url.to_string()
            }
            Err(_) => format!("{}/task/{}", self.base_url, job_id),
        }
    }

    /// Submit a generation job.
    ///
    /// Sends `POST {base}/generate`. Success needs a 2xx status and a job id
    /// in the body; the status address comes from the body when present.
    pub async fn launch(&self, request: &GenerationRequest) -> Result<JobHandle, UpstreamError> {
        let response = self
            .client
            .post(format!("{}/generate", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&Self::launch_payload(request))
            .send()
            .await?;

        let body = read_json(response).await?;
        let job_id = extract::string_at(
            &body.json,
            &[&["jobId"], &["taskId"], &["data", "jobId"], &["data", "taskId"]],
        )
        .ok_or_else(|| body.malformed("response has no jobId"))?;

        let status_url = extract::string_at(&body.json, &[&["statusUrl"], &["data", "statusUrl"]])
            .unwrap_or_else(|| self.status_url(&job_id));

        tracing::info!(job_id = %job_id, status_url = %status_url, "Generation job launched");
        Ok(JobHandle { job_id, status_url })
    }

    /// One-shot status read for `job_id`. Returns the raw upstream body.
    pub async fn task_status(&self, job_id: &str) -> Result<Value, UpstreamError> {
        self.fetch_status(&self.status_url(job_id)).await
    }

    /// Start a cover job. Fire-and-forget: completion arrives through the
    /// callback endpoint.
    ///
    /// Sends `POST {base}/cover` and returns the acknowledgment body.
    pub async fn start_cover(
        &self,
        request: &CoverRequest,
        callback_url: Option<&str>,
    ) -> Result<Value, UpstreamError> {
        let mut payload = Self::launch_payload(&request.params);
        if let Value::Object(fields) = &mut payload {
            fields.insert("uploadUrl".into(), Value::String(request.upload_url.clone()));
            if let Some(url) = callback_url {
                fields.insert("callBackUrl".into(), Value::String(url.to_string()));
            }
        }

        let response = self
            .client
            .post(format!("{}/cover", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let body = read_json(response).await?;
        tracing::info!(
            task_id = ?extract::string_at(&body.json, &[&["taskId"], &["data", "taskId"]]),
            "Cover job started",
        );
        Ok(body.json)
    }
}

#[async_trait]
impl StatusSource for MusicApi {
    async fn fetch_status(&self, status_url: &str) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(status_url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Ok(read_json(response).await?.json)
    }
}
