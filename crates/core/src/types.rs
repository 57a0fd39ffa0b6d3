//! Request, job and result types shared across the workspace.
//!
//! `*Input` types mirror what a client may send (every field optional, no
//! business rules applied). The validators in [`crate::validation`] turn them
//! into the normalized [`GenerationRequest`] / [`CoverRequest`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Model versions
// ---------------------------------------------------------------------------

/// Version tags accepted by the music provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelVersion {
    #[serde(rename = "V3_5")]
    V3_5,
    #[serde(rename = "V4")]
    V4,
    #[default]
    #[serde(rename = "V4_5")]
    V4_5,
    #[serde(rename = "V4_5PLUS")]
    V4_5Plus,
    #[serde(rename = "V5")]
    V5,
}

/// Size class of a model; decides the style / prompt ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Small,
    Large,
}

impl ModelVersion {
    pub const ALL: [ModelVersion; 5] = [
        ModelVersion::V3_5,
        ModelVersion::V4,
        ModelVersion::V4_5,
        ModelVersion::V4_5Plus,
        ModelVersion::V5,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelVersion::V3_5 => "V3_5",
            ModelVersion::V4 => "V4",
            ModelVersion::V4_5 => "V4_5",
            ModelVersion::V4_5Plus => "V4_5PLUS",
            ModelVersion::V5 => "V5",
        }
    }

    /// Parse an exact version tag. Matching is case-sensitive.
    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == tag)
    }

    pub fn tier(self) -> ModelTier {
        match self {
            ModelVersion::V3_5 | ModelVersion::V4 => ModelTier::Small,
            ModelVersion::V4_5 | ModelVersion::V4_5Plus | ModelVersion::V5 => ModelTier::Large,
        }
    }
}

impl ModelTier {
    pub fn prompt_limit(self) -> usize {
        match self {
            ModelTier::Small => 3000,
            ModelTier::Large => 5000,
        }
    }

    pub fn style_limit(self) -> usize {
        match self {
            ModelTier::Small => 200,
            ModelTier::Large => 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// Raw inputs
// ---------------------------------------------------------------------------

/// Generation parameters as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationInput {
    pub custom_mode: Option<bool>,
    pub instrumental: Option<bool>,
    pub title: Option<String>,
    pub style: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub negative_tags: Option<String>,
}

/// Cover parameters as submitted by a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverInput {
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(flatten)]
    pub params: GenerationInput,
}

/// Generation parameters plus where to re-host the results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadInput {
    #[serde(flatten)]
    pub params: GenerationInput,
    #[serde(default)]
    pub kie_upload_path: Option<String>,
    #[serde(default)]
    pub kie_file_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalized requests
// ---------------------------------------------------------------------------

/// Validated generation parameters, ready for the music provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub custom_mode: bool,
    pub instrumental: bool,
    pub title: String,
    pub style: String,
    pub prompt: String,
    pub model: ModelVersion,
    pub negative_tags: String,
}

impl GenerationRequest {
    /// A prompt-only request. All other fields take their empty defaults.
    pub fn simple(prompt: impl Into<String>) -> Self {
        Self {
            custom_mode: false,
            instrumental: false,
            title: String::new(),
            style: String::new(),
            prompt: prompt.into(),
            model: ModelVersion::default(),
            negative_tags: String::new(),
        }
    }
}

/// Validated cover parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverRequest {
    pub upload_url: String,
    #[serde(flatten)]
    pub params: GenerationRequest,
}

/// Destination of re-hosted files on the file host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub upload_path: String,
    pub file_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Jobs and results
// ---------------------------------------------------------------------------

/// Identity of a launched upstream job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHandle {
    pub job_id: String,
    pub status_url: String,
}

/// Lifecycle state reported by the provider for a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Processing,
    Done,
    Error,
    Unknown,
}

impl JobState {
    /// Map an upstream status string. Matching ignores case and surrounding
    /// whitespace; anything unrecognised is `Unknown`.
    pub fn from_upstream(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "queued" => JobState::Pending,
            "processing" | "running" => JobState::Processing,
            "done" => JobState::Done,
            "error" | "failed" => JobState::Error,
            _ => JobState::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Processing => "processing",
            JobState::Done => "done",
            JobState::Error => "error",
            JobState::Unknown => "unknown",
        }
    }
}

/// One generated artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub audio_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

impl ResultRecord {
    pub fn new(audio_url: impl Into<String>) -> Self {
        Self {
            id: None,
            audio_url: audio_url.into(),
            image_url: None,
            title: None,
            duration_seconds: None,
        }
    }
}
