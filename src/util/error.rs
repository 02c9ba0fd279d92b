use crate::config::ConfigError;
use crate::repository::repository_error::RepositoryError;
use crate::service::auth_service::AuthError;
use crate::service::cascade::FilterError;
use crate::service::submission_service::SubmissionError;
use crate::service::upload_service::UploadError;

#[derive(Debug, Clone)]
pub enum ServiceError {
    NotFound(String),
    InvalidInput(String),
    Unauthorized(String),
    Config(String),
    InternalError(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ServiceError::InvalidInput(msg) => write!(f, "Invalid Input: {}", msg),
            ServiceError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ServiceError::Config(msg) => write!(f, "Configuration Error: {}", msg),
            ServiceError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl ServiceError {
    /// Process exit status for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceError::InvalidInput(_) => 2,
            ServiceError::Config(_) => 3,
            ServiceError::Unauthorized(_) => 4,
            ServiceError::NotFound(_) => 5,
            ServiceError::InternalError(_) => 1,
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => ServiceError::NotFound(msg),
            RepositoryError::Unauthorized(msg) => ServiceError::Unauthorized(msg),
            RepositoryError::ReadOnly(msg) => ServiceError::InvalidInput(msg),
            RepositoryError::Http { message, .. } => ServiceError::InternalError(message),
            RepositoryError::NetworkError(msg) => ServiceError::InternalError(msg),
            RepositoryError::SerializationError(msg) => ServiceError::InternalError(msg),
            RepositoryError::Generic(e) => ServiceError::InternalError(e.to_string()),
        }
    }
}

impl From<ConfigError> for ServiceError {
    fn from(err: ConfigError) -> Self {
        ServiceError::Config(err.to_string())
    }
}

impl From<FilterError> for ServiceError {
    fn from(err: FilterError) -> Self {
        ServiceError::InvalidInput(err.to_string())
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail | AuthError::IncompleteCode => ServiceError::InvalidInput(err.to_string()),
            AuthError::NotSignedIn | AuthError::Unauthorized(_) => ServiceError::Unauthorized(err.to_string()),
            other => ServiceError::InternalError(other.to_string()),
        }
    }
}

impl From<UploadError> for ServiceError {
    fn from(err: UploadError) -> Self {
        ServiceError::InternalError(err.to_string())
    }
}

impl From<SubmissionError> for ServiceError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Validation(msg) => ServiceError::InvalidInput(msg),
            SubmissionError::Upload(e) => e.into(),
            SubmissionError::Repository(e) => e.into(),
        }
    }
}
