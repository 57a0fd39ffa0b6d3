//! REST client for the file host (fetch-and-persist re-hosting).
//!
//! [`FileHostApi::upload`] asks the host to download a source URL and store
//! it under `uploadPath`. [`FileHostApi::upload_all`] fans a whole job out
//! concurrently and reports every record separately.

use futures::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};
use songbridge_core::rehost::{batch_file_name, bytes_to_mb};
use songbridge_core::types::ResultRecord;

use crate::error::{read_json, UpstreamError};
use crate::extract;

/// HTTP client for the file host.
#[derive(Clone)]
pub struct FileHostApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// A file persisted by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    pub source_audio_url: String,
    pub download_url: String,
    /// `None` when the host did not report a size; serialized as `null`.
    pub file_size_bytes: Option<u64>,
    #[serde(rename = "fileSizeMB")]
    pub file_size_mb: Option<f64>,
    pub mime_type: Option<String>,
    pub file_name: Option<String>,
    pub file_path: Option<String>,
    pub uploaded_at: String,
}

/// Per-record result of a batch upload.
#[derive(Debug)]
pub enum UploadOutcome {
    Uploaded(UploadResult),
    Failed {
        source_audio_url: String,
        error: UpstreamError,
    },
}

impl UploadOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded(_))
    }

    /// JSON entry for the `uploads` array of a response.
    pub fn to_json(&self, index: usize) -> Value {
        match self {
            UploadOutcome::Uploaded(result) => {
                let mut entry = json!({ "index": index, "ok": true });
                if let (Value::Object(map), Ok(Value::Object(fields))) =
                    (&mut entry, serde_json::to_value(result))
                {
                    map.extend(fields);
                }
                entry
            }
            UploadOutcome::Failed {
                source_audio_url,
                error,
            } => json!({
                "index": index,
                "ok": false,
                "sourceAudioUrl": source_audio_url,
                "error": error.to_string(),
                "upstreamStatus": error.status(),
                "upstreamBody": error.body_json(),
            }),
        }
    }
}

impl FileHostApi {
    /// * `base_url` - host base, e.g. `https://kieai.redpandaai.co`.
    pub fn new(client: reqwest::Client, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Re-host one file.
    ///
    /// Sends `POST {base}/api/file-url-upload` with
    /// `{ fileUrl, uploadPath, fileName? }`. Non-2xx, `success: false`, or a
    /// body without a download URL are errors.
    pub async fn upload(
        &self,
        source_url: &str,
        upload_path: &str,
        file_name: Option<&str>,
    ) -> Result<UploadResult, UpstreamError> {
        let mut payload = json!({
            "fileUrl": source_url,
            "uploadPath": upload_path,
        });
        if let (Some(name), Value::Object(fields)) = (file_name, &mut payload) {
            fields.insert("fileName".into(), Value::String(name.to_string()));
        }

        let response = self
            .client
            .post(format!("{}/api/file-url-upload", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let body = read_json(response).await?;
        if extract::bool_at(&body.json, &[&["success"]]) == Some(false) {
            return Err(UpstreamError::Status {
                status: body.status,
                body: body.json.to_string(),
            });
        }

        let json = &body.json;
        let download_url = extract::string_at(json, &[&["data", "downloadUrl"], &["downloadUrl"]])
            .ok_or_else(|| body.malformed("response has no downloadUrl"))?;
        let file_size_bytes = extract::u64_at(json, &[&["data", "fileSize"], &["fileSize"]]);

        Ok(UploadResult {
            source_audio_url: source_url.to_string(),
            download_url,
            file_size_bytes,
            file_size_mb: file_size_bytes.map(bytes_to_mb),
            mime_type: extract::string_at(json, &[&["data", "mimeType"], &["mimeType"]]),
            file_name: extract::string_at(json, &[&["data", "fileName"], &["fileName"]])
                .or_else(|| file_name.map(str::to_string)),
            file_path: extract::string_at(json, &[&["data", "filePath"], &["filePath"]]),
            uploaded_at: extract::string_at(json, &[&["data", "uploadedAt"], &["uploadedAt"]])
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        })
    }

    /// Re-host every record concurrently.
    ///
    /// The output has one entry per record, in input order. A failed upload
    /// never fails its siblings.
    pub async fn upload_all(
        &self,
        records: &[ResultRecord],
        upload_path: &str,
        file_name: Option<&str>,
    ) -> Vec<UploadOutcome> {
        let total = records.len();
        let uploads = records.iter().enumerate().map(|(index, record)| {
            let name = batch_file_name(file_name, index, total);
            async move {
                match self.upload(&record.audio_url, upload_path, name.as_deref()).await {
                    Ok(result) => {
                        tracing::info!(index, upload_path, download_url = %result.download_url, "Record re-hosted");
                        UploadOutcome::Uploaded(result)
                    }
                    Err(error) => {
                        tracing::warn!(index, upload_path, error = %error, "Record upload failed");
                        UploadOutcome::Failed {
                            source_audio_url: record.audio_url.clone(),
                            error,
                        }
                    }
                }
            }
        });
        join_all(uploads).await
    }
}
