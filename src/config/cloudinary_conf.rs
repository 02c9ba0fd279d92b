use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, info};

pub const DEFAULT_CLOUDINARY_API: &str = "https://api.cloudinary.com/v1_1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub api_base: String,
}

impl CloudinaryConfig {
    /// Load media host configuration from environment variables
    ///
    /// Expected environment variables:
    /// - VITE_CLOUDINARY_CLOUD_NAME: account cloud name
    /// - VITE_CLOUDINARY_UPLOAD_PRESET: unsigned upload preset
    /// - CLOUDINARY_API_BASE: optional API base (defaults to https://api.cloudinary.com/v1_1)
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading Cloudinary configuration from environment variables");

        let cloud_name = env::var("VITE_CLOUDINARY_CLOUD_NAME").map_err(|_| {
            error!("VITE_CLOUDINARY_CLOUD_NAME environment variable not found");
            ConfigError::EnvVarNotFound("VITE_CLOUDINARY_CLOUD_NAME".to_string())
        })?;
        debug!("Cloudinary cloud name: {}", cloud_name);

        let upload_preset = env::var("VITE_CLOUDINARY_UPLOAD_PRESET").map_err(|_| {
            error!("VITE_CLOUDINARY_UPLOAD_PRESET environment variable not found");
            ConfigError::EnvVarNotFound("VITE_CLOUDINARY_UPLOAD_PRESET".to_string())
        })?;

        let api_base = env::var("CLOUDINARY_API_BASE")
            .unwrap_or_else(|_| DEFAULT_CLOUDINARY_API.to_string())
            .trim_end_matches('/')
            .to_string();

        let config = Self {
            cloud_name,
            upload_preset,
            api_base,
        };
        config.validate()?;
        info!("Cloudinary configuration loaded successfully");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cloud_name.trim().is_empty() {
            error!("Cloudinary cloud name is empty");
            return Err(ConfigError::InvalidValue("Cloud name cannot be empty".to_string()));
        }
        if self.upload_preset.trim().is_empty() {
            error!("Cloudinary upload preset is empty");
            return Err(ConfigError::InvalidValue("Upload preset cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn upload_url(&self) -> String {
        format!("{}/{}/auto/upload", self.api_base, self.cloud_name)
    }
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: "demo".to_string(),
            upload_preset: "unsigned".to_string(),
            api_base: DEFAULT_CLOUDINARY_API.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_url() {
        let config = CloudinaryConfig::default();
        assert_eq!(config.upload_url(), "https://api.cloudinary.com/v1_1/demo/auto/upload");
    }

    #[test]
    fn test_validate_empty_preset() {
        let mut config = CloudinaryConfig::default();
        config.upload_preset = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
