use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info, warn};

/// Source of the bearer token sent with every admin request.
pub trait CredentialProvider: Send + Sync {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str) -> io::Result<()>;
    fn clear(&self);
}

/// Token kept in memory only. Used for `EGS_TOKEN` and in tests.
#[derive(Debug, Default)]
pub struct StaticCredentials {
    token: RwLock<Option<String>>,
}

impl StaticCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn store(&self, token: &str) -> io::Result<()> {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

/// Token persisted in a file between runs.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialProvider for TokenFile {
    fn token(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents.trim().to_string()).filter(|t| !t.is_empty()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!(path = %self.path.display(), "Failed to read token file: {}", e);
                None
            }
        }
    }

    fn store(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token.trim())?;
        info!(path = %self.path.display(), "Token stored");
        Ok(())
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "Token cleared"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => debug!("No token file to clear"),
            Err(e) => warn!(path = %self.path.display(), "Failed to clear token file: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials_store_and_clear() {
        let credentials = StaticCredentials::new(None);
        assert_eq!(credentials.token(), None);
        credentials.store("abc").unwrap();
        assert_eq!(credentials.token().as_deref(), Some("abc"));
        credentials.clear();
        assert_eq!(credentials.token(), None);
    }

    #[test]
    fn test_token_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = TokenFile::new(dir.path().join("nested").join("token"));
        assert_eq!(file.token(), None);
        file.store("  secret-token\n").unwrap();
        assert_eq!(file.token().as_deref(), Some("secret-token"));
        file.clear();
        assert_eq!(file.token(), None);
        // clearing twice is harmless
        file.clear();
    }
}
