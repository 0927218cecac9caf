use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::CachedToken;
use crate::traits::TokenStore;

/// Token cache backed by a single JSON file (`access_token.json`).
///
/// The whole document is rewritten on every save. Files that lack
/// `issued_at` take the file's modification time instead.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn modified_at(&self) -> Option<DateTime<Utc>> {
        let metadata = tokio::fs::metadata(&self.path).await.ok()?;
        metadata.modified().ok().map(DateTime::<Utc>::from)
    }
}

impl TokenStore for FileTokenStore {
    async fn load(&self) -> Option<CachedToken> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Failed to read token cache: {e}");
                return None;
            }
        };

        let mut token: CachedToken = match serde_json::from_slice(&raw) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "Ignoring unparsable token cache: {e}");
                return None;
            }
        };

        if token.issued_at.is_none() {
            token.issued_at = self.modified_at().await;
        }

        Some(token)
    }

    async fn save(&self, token: &CachedToken) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                AppError::StorageError(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }

        let json = serde_json::to_vec_pretty(token)
            .map_err(|e| AppError::StorageError(format!("Failed to serialize token: {e}")))?;

        tokio::fs::write(&self.path, json).await.map_err(|e| {
            AppError::StorageError(format!("Failed to write {}: {e}", self.path.display()))
        })
    }
}

/// In-memory token cache, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    slot: Arc<Mutex<Option<CachedToken>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: CachedToken) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token))),
        }
    }

    /// The token currently held, if any.
    pub fn current(&self) -> Option<CachedToken> {
        self.slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Option<CachedToken> {
        self.current()
    }

    async fn save(&self, token: &CachedToken) -> Result<(), AppError> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.clone());
        Ok(())
    }
}
