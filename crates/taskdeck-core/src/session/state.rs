//! Shared session token cell.

use super::model::AuthToken;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// The process-wide authentication state.
///
/// Cloning shares the same cell. `SessionContext` is the only writer; the
/// HTTP task client receives a clone at construction and reads the current
/// token for every request.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    token: Arc<RwLock<Option<AuthToken>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current token, if a session is active.
    pub fn token(&self) -> Option<AuthToken> {
        self.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Installs `token` as the active session.
    pub fn set_token(&self, token: AuthToken) {
        *self.write() = Some(token);
    }

    /// Drops the active session.
    pub fn clear(&self) {
        *self.write() = None;
    }

    // A writer panicking mid-assignment cannot leave a half-written Option.
    fn read(&self) -> RwLockReadGuard<'_, Option<AuthToken>> {
        self.token.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<AuthToken>> {
        self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
