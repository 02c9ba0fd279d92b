use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Where the bearer token is persisted between runs.
    pub token_file: PathBuf,
    /// Token supplied directly through the environment; takes precedence over the file.
    pub token: Option<String>,
}

impl ApiConfig {
    /// Load REST API configuration from environment variables
    ///
    /// Expected environment variables:
    /// - VITE_API_URL or VITE_API_BASE_URL: REST base URL (defaults to http://localhost:5000/api)
    /// - API_TIMEOUT_SECS: request timeout (defaults to 30)
    /// - EGS_TOKEN_FILE: token file path (defaults to .egs/token)
    /// - EGS_TOKEN: optional bearer token
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading API configuration from environment variables");

        let base_url = env::var("VITE_API_URL")
            .or_else(|_| env::var("VITE_API_BASE_URL"))
            .unwrap_or_else(|_| {
                warn!("VITE_API_URL not set, using default: {}", DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            });
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        debug!("API base URL: {}", base_url);

        let timeout_secs = match env::var("API_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::ParseError(format!("API_TIMEOUT_SECS: {raw}")))?,
            Err(_) => 30,
        };

        let token_file = env::var("EGS_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".egs/token"));
        debug!("Token file: {}", token_file.display());

        let token = env::var("EGS_TOKEN").ok().filter(|t| !t.trim().is_empty());

        let config = Self {
            base_url,
            timeout_secs,
            token_file,
            token,
        };
        config.validate()?;
        info!("API configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(format!(
                "API base URL must start with http:// or https://, got {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("API timeout must be positive".to_string()));
        }
        Ok(())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Joins a resource path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            token_file: PathBuf::from(".egs/token"),
            token: None,
        }
    }
}
