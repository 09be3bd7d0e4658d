//! Token storage trait.
//!
//! Defines where a session token lives between runs.

use super::model::AuthToken;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Mutex;

/// Storage for the session token.
///
/// # Security Note
///
/// Implementations persisting to disk should restrict file permissions
/// (e.g., 600 on Unix).
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Loads the stored token, if any.
    async fn load(&self) -> Result<Option<AuthToken>>;

    /// Stores `token`, replacing any previous one.
    async fn save(&self, token: &AuthToken) -> Result<()>;

    /// Removes the stored token. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
}

/// A token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<AuthToken>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<AuthToken>> {
        Ok(self.slot().clone())
    }

    async fn save(&self, token: &AuthToken) -> Result<()> {
        *self.slot() = Some(token.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}
