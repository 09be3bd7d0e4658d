//! SessionContext - login lifecycle around the shared [`SessionState`].
//!
//! The context is the only writer of the session token. Consumers such as the
//! HTTP task client hold a clone of the same `SessionState` and read from it.

use std::sync::Arc;
use taskdeck_core::error::{Result, TaskdeckError};
use taskdeck_core::session::{
    AuthService, Registration, SessionState, SessionStatus, TokenStore, UserProfile,
};
use taskdeck_core::task::require_text;

pub struct SessionContext {
    auth: Arc<dyn AuthService>,
    tokens: Arc<dyn TokenStore>,
    state: SessionState,
}

impl SessionContext {
    /// Creates a context writing to `state`.
    ///
    /// # Arguments
    ///
    /// * `auth` - Remote auth endpoints
    /// * `tokens` - Where the token is kept between runs
    /// * `state` - Shared token cell handed to the task client
    pub fn new(auth: Arc<dyn AuthService>, tokens: Arc<dyn TokenStore>, state: SessionState) -> Self {
        Self { auth, tokens, state }
    }

    /// Returns a handle to the shared token cell.
    pub fn state(&self) -> SessionState {
        self.state.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Exchanges credentials for a token and makes it the active session.
    ///
    /// A token that cannot be persisted still starts the session; it just
    /// won't survive a restart.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let username = require_text("username", username)?;
        if password.is_empty() {
            return Err(TaskdeckError::validation("password must not be empty"));
        }

        let token = self
            .auth
            .login(&username, password)
            .await
            .inspect_err(|e| tracing::warn!("[SessionContext] Login failed for '{}': {}", username, e))?;

        if let Err(e) = self.tokens.save(&token).await {
            tracing::warn!("[SessionContext] Failed to persist session token: {}", e);
        }
        self.state.set_token(token);
        tracing::info!("[SessionContext] Logged in as '{}'", username);
        Ok(())
    }

    /// Provisions a new account. Does not log in.
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<UserProfile> {
        let registration = Registration {
            email: require_text("email", email)?,
            username: require_text("username", username)?,
            password: password.to_string(),
        };
        if registration.password.is_empty() {
            return Err(TaskdeckError::validation("password must not be empty"));
        }

        let profile = self.auth.register(&registration).await?;
        tracing::info!("[SessionContext] Registered user '{}'", profile.username);
        Ok(profile)
    }

    /// Ends the session. Always succeeds; no network call is made.
    pub async fn logout(&self) {
        self.state.clear();
        if let Err(e) = self.tokens.clear().await {
            tracing::warn!("[SessionContext] Failed to remove stored token: {}", e);
        }
        tracing::info!("[SessionContext] Logged out");
    }

    /// Re-activates a stored token if the server still accepts it.
    ///
    /// Any failure is reported as `NotAuthenticated`. The stored token is
    /// discarded only when the server rejects it; after a transport or
    /// server failure it is kept for the next attempt.
    pub async fn restore_session(&self) -> SessionStatus {
        let token = match self.tokens.load().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("[SessionContext] No stored session");
                return SessionStatus::NotAuthenticated;
            }
            Err(e) => {
                tracing::warn!("[SessionContext] Could not read stored session: {}", e);
                return SessionStatus::NotAuthenticated;
            }
        };

        match self.auth.profile(&token).await {
            Ok(profile) => {
                self.state.set_token(token);
                tracing::info!("[SessionContext] Restored session for '{}'", profile.username);
                SessionStatus::Authenticated(profile)
            }
            Err(e) if e.is_auth() => {
                tracing::warn!("[SessionContext] Stored session rejected, clearing: {}", e);
                self.logout().await;
                SessionStatus::NotAuthenticated
            }
            Err(e) => {
                tracing::warn!("[SessionContext] Could not verify stored session, keeping it: {}", e);
                self.state.clear();
                SessionStatus::NotAuthenticated
            }
        }
    }

    /// Fetches the profile behind the active session.
    ///
    /// # Errors
    ///
    /// `Auth` when no session is active, or whatever the server reports.
    pub async fn current_user(&self) -> Result<UserProfile> {
        let token = self
            .state
            .token()
            .ok_or_else(|| TaskdeckError::auth("not logged in"))?;
        self.auth.profile(&token).await
    }
}
