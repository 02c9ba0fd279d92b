use std::fmt;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug)]
pub enum RepositoryError {
    NotFound(String),
    /// The stored token was rejected; it has already been cleared.
    Unauthorized(String),
    /// Demo data source: mutations are not persisted anywhere.
    ReadOnly(String),
    /// Non-2xx answer. `message` is the body's `message` field when present.
    Http { status: u16, message: String },
    NetworkError(String),
    SerializationError(String),
    /// Generic error that wraps any error implementing std::error::Error
    Generic(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RepositoryError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            RepositoryError::ReadOnly(msg) => write!(f, "Read Only: {}", msg),
            RepositoryError::Http { status, message } => write!(f, "HTTP {}: {}", status, message),
            RepositoryError::NetworkError(msg) => write!(f, "Network Error: {}", msg),
            RepositoryError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
            RepositoryError::Generic(err) => write!(f, "Repository Error: {}", err),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Generic(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

// Convenient constructors
impl RepositoryError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        RepositoryError::NotFound(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Unauthorized(msg.into())
    }

    pub fn read_only<T: Into<String>>(msg: T) -> Self {
        RepositoryError::ReadOnly(msg.into())
    }

    pub fn http<T: Into<String>>(status: u16, msg: T) -> Self {
        RepositoryError::Http {
            status,
            message: msg.into(),
        }
    }

    pub fn network<T: Into<String>>(msg: T) -> Self {
        RepositoryError::NetworkError(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RepositoryError::SerializationError(msg.into())
    }

    pub fn generic<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RepositoryError::Generic(Box::new(err))
    }

    /// Text shown to the operator in the table banner or a notification.
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::NotFound(msg)
            | RepositoryError::Unauthorized(msg)
            | RepositoryError::ReadOnly(msg)
            | RepositoryError::NetworkError(msg)
            | RepositoryError::SerializationError(msg) => msg.clone(),
            RepositoryError::Http { message, .. } => message.clone(),
            RepositoryError::Generic(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RepositoryError::SerializationError(format!("Invalid response body: {}", err))
        } else if err.is_timeout() {
            RepositoryError::NetworkError(format!("Request timed out: {}", err))
        } else if err.is_connect() || err.is_request() {
            RepositoryError::NetworkError(format!("Network request failed: {}", err))
        } else {
            RepositoryError::Generic(Box::new(err))
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(format!("Invalid response body: {}", err))
    }
}

// Result type alias for convenience
pub type RepositoryResult<T> = Result<T, RepositoryError>;
