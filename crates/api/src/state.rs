use std::sync::Arc;
use std::time::Duration;

use songbridge_core::error::CoreError;
use songbridge_provider::{FileHostApi, MusicApi};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including upstream endpoints and credentials.
    pub config: Arc<ServerConfig>,
    /// Pooled HTTP client shared by every upstream call.
    pub http: reqwest::Client,
}

impl AppState {
    /// Build the state and its HTTP client.
    pub fn new(config: ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.provider.upstream_timeout_secs))
            .build()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Music provider client. Fails when `MUSIC_API_KEY` is unset.
    pub fn music_api(&self) -> Result<MusicApi, CoreError> {
        let provider = &self.config.provider;
        Ok(MusicApi::new(
            self.http.clone(),
            &provider.music_api_base,
            provider.music_key()?,
        ))
    }

    /// File host client. Fails when `UPLOAD_API_KEY` is unset.
    pub fn file_host(&self) -> Result<FileHostApi, CoreError> {
        let provider = &self.config.provider;
        Ok(FileHostApi::new(
            self.http.clone(),
            &provider.upload_api_base,
            provider.upload_key()?,
        ))
    }
}
