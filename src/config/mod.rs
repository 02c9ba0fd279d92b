pub mod api_conf;
pub mod cloudinary_conf;
pub mod layout_conf;

pub use api_conf::ApiConfig;
pub use cloudinary_conf::CloudinaryConfig;
pub use layout_conf::LayoutConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}
