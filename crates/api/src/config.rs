use songbridge_core::error::CoreError;
use songbridge_core::polling::MAX_TIMEOUT_MS;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. Upstream
/// credentials are optional here; handlers resolve them on demand.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// Outer HTTP request timeout in seconds. Defaults to
    /// [`default_request_timeout_secs`] so it outlasts the longest wait-upload
    /// flow.
    pub request_timeout_secs: u64,
    /// Value injected under `poweredBy` in every JSON response.
    pub attribution_tag: String,
    /// Upstream endpoints and credentials.
    pub provider: ProviderConfig,
}

/// Upstream endpoints and credentials.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub music_api_base: String,
    pub upload_api_base: String,
    pub music_api_key: Option<String>,
    pub upload_api_key: Option<String>,
    /// Public base URL of this service, used to build the cover `callBackUrl`.
    pub callback_base_url: Option<String>,
    /// Per-request timeout on the shared HTTP client, in seconds.
    pub upstream_timeout_secs: u64,
}

pub const DEFAULT_MUSIC_API_BASE: &str = "https://api.kie.ai/api/v1";
pub const DEFAULT_UPLOAD_API_BASE: &str = "https://kieai.redpandaai.co";
pub const DEFAULT_ATTRIBUTION_TAG: &str = "songbridge";
pub const COVER_CALLBACK_PATH: &str = "/cover/callback";

/// Headroom on top of the upstream calls in [`default_request_timeout_secs`].
const REQUEST_TIMEOUT_SLACK_SECS: u64 = 30;

/// Outer timeout that covers the slowest `/generate/wait-upload` request.
///
/// That request spends the full poll ceiling plus up to three upstream calls
/// outside it: the launch, a status poll started just before the budget ran
/// out, and the concurrent upload batch.
pub fn default_request_timeout_secs(upstream_timeout_secs: u64) -> u64 {
    MAX_TIMEOUT_MS / 1000 + 3 * upstream_timeout_secs + REQUEST_TIMEOUT_SLACK_SECS
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                       |
    /// |-------------------------|-------------------------------|
    /// | `HOST`                  | `0.0.0.0`                     |
    /// | `PORT`                  | `3000`                        |
    /// | `CORS_ORIGINS`          | `*`                           |
    /// | `REQUEST_TIMEOUT_SECS`  | derived, `1110` by default    |
    /// | `ATTRIBUTION_TAG`       | `songbridge`                  |
    /// | `MUSIC_API_BASE`        | `https://api.kie.ai/api/v1`   |
    /// | `UPLOAD_API_BASE`       | `https://kieai.redpandaai.co` |
    /// | `MUSIC_API_KEY`         | unset                         |
    /// | `UPLOAD_API_KEY`        | unset                         |
    /// | `CALLBACK_BASE_URL`     | unset                         |
    /// | `UPSTREAM_TIMEOUT_SECS` | `60`                          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let provider = ProviderConfig::from_env();

        let request_timeout_secs: u64 = optional_env("REQUEST_TIMEOUT_SECS")
            .map(|v| v.parse().expect("REQUEST_TIMEOUT_SECS must be a valid u64"))
            .unwrap_or_else(|| default_request_timeout_secs(provider.upstream_timeout_secs));

        let attribution_tag =
            optional_env("ATTRIBUTION_TAG").unwrap_or_else(|| DEFAULT_ATTRIBUTION_TAG.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            attribution_tag,
            provider,
        }
    }

    /// Whether CORS should accept any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        Self {
            music_api_base: optional_env("MUSIC_API_BASE")
                .unwrap_or_else(|| DEFAULT_MUSIC_API_BASE.into()),
            upload_api_base: optional_env("UPLOAD_API_BASE")
                .unwrap_or_else(|| DEFAULT_UPLOAD_API_BASE.into()),
            music_api_key: optional_env("MUSIC_API_KEY"),
            upload_api_key: optional_env("UPLOAD_API_KEY"),
            callback_base_url: optional_env("CALLBACK_BASE_URL"),
            upstream_timeout_secs,
        }
    }

    /// Music provider credential, or a configuration error naming the variable.
    pub fn music_key(&self) -> Result<&str, CoreError> {
        self.music_api_key
            .as_deref()
            .ok_or_else(|| CoreError::Configuration("MUSIC_API_KEY is not set".into()))
    }

    /// File host credential, or a configuration error naming the variable.
    pub fn upload_key(&self) -> Result<&str, CoreError> {
        self.upload_api_key
            .as_deref()
            .ok_or_else(|| CoreError::Configuration("UPLOAD_API_KEY is not set".into()))
    }

    /// Absolute URL the provider should call when a cover finishes.
    pub fn cover_callback_url(&self) -> Option<String> {
        self.callback_base_url
            .as_deref()
            .map(|base| format!("{}{COVER_CALLBACK_PATH}", base.trim_end_matches('/')))
    }
}

/// Read an environment variable, treating blank values as unset.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
