//! Session token file storage.
//!
//! Keeps the bearer token between runs in `session.json`.

use crate::paths::TaskdeckPaths;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::session::{AuthToken, TokenStore};
use tokio::io::AsyncWriteExt;

#[derive(Serialize, Deserialize)]
struct StoredSession {
    access_token: AuthToken,
    saved_at: DateTime<Utc>,
}

/// Token store backed by a JSON file.
///
/// Responsibilities:
/// - Read and write `session.json`
/// - Restrict the file to its owner on Unix
///
/// Does NOT:
/// - Check whether the token is still valid (see `SessionContext::restore_session`)
/// - Encrypt the token (plaintext JSON storage)
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location (`~/.config/taskdeck/session.json`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: TaskdeckPaths::session_file()?,
        })
    }

    /// Creates a store with a custom path (for testing).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<AuthToken>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredSession = serde_json::from_str(&content)?;
        tracing::debug!(
            "[FileTokenStore] Loaded token saved at {} from {}",
            stored.saved_at,
            self.path.display()
        );
        Ok(Some(stored.access_token))
    }

    async fn save(&self, token: &AuthToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let stored = StoredSession {
            access_token: token.clone(),
            saved_at: Utc::now(),
        };
        let content = serde_json::to_string_pretty(&stored)?;

        // Written to an owner-only sibling, then renamed into place.
        let tmp_path = self.path.with_extension("json.tmp");
        write_private(&tmp_path, content.as_bytes()).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        tracing::debug!("[FileTokenStore] Saved token to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TaskdeckError::io(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Creates `path` fresh, readable only by the owner on Unix, and writes `bytes`.
async fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}
